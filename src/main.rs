fn main() {
    if let Err(e) = etchosts::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
