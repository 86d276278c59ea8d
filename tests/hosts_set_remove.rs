//! set/remove against a hosts file on disk, with backups.

mod common;

use etchosts::{Entry, HostsError, HostsFile};
use std::fs;
use std::io;
use std::net::IpAddr;
use std::path::Path;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn hosts(path: &Path) -> HostsFile {
    HostsFile::new(path).with_line_ending("\n")
}

#[test]
fn set_new_host_writes_and_backs_up() {
    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), common::SAMPLE);

    let matched = hosts(&path)
        .set(Entry::new(ip("10.1.1.1"), "api.test"))
        .unwrap();
    assert_eq!(matched, 0);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("10.0.0.5 foo.test # dev box\n10.1.1.1 api.test"));
    assert!(content.starts_with("# static table\n127.0.0.1 localhost\n"));

    let backups = common::backups(&path);
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), common::SAMPLE);
}

#[test]
fn set_existing_host_updates_in_place() {
    let dir = common::temp_dir();
    let path = common::hosts_file(
        dir.path(),
        "127.0.0.1 localhost\n10.0.0.5 foo.test # dev box\n",
    );

    let matched = hosts(&path)
        .set(Entry::new(ip("10.0.0.6"), "foo.test"))
        .unwrap();
    assert_eq!(matched, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "127.0.0.1 localhost\n10.0.0.6 foo.test # dev box"
    );
}

#[test]
fn set_same_address_skips_write() {
    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), common::SAMPLE);

    let matched = hosts(&path)
        .set(Entry::new(ip("10.0.0.5"), "foo.test"))
        .unwrap();
    assert_eq!(matched, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), common::SAMPLE);
    assert!(common::backups(&path).is_empty());
}

#[test]
fn remove_miss_is_a_noop() {
    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), common::SAMPLE);

    let removed = hosts(&path).remove("10.0.0.6", "foo.test").unwrap();
    assert_eq!(removed, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), common::SAMPLE);
    assert!(common::backups(&path).is_empty());
}

#[test]
fn remove_hit_drops_the_line() {
    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), "127.0.0.1 localhost\n1.2.3.4 example.com\n");

    let removed = hosts(&path).remove("1.2.3.4", "example.com").unwrap();
    assert_eq!(removed, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost");
    assert_eq!(common::backups(&path).len(), 1);
}

#[test]
fn remove_host_drops_every_address() {
    let dir = common::temp_dir();
    let path = common::hosts_file(
        dir.path(),
        "127.0.0.1 api.test\n127.0.0.1 localhost\n::1 api.test\n",
    );

    let removed = hosts(&path).remove_host("api.test").unwrap();
    let removed: Vec<&str> = removed.iter().map(|a| a.as_str()).collect();
    assert_eq!(removed, ["127.0.0.1", "::1"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost");

    let backups = common::backups(&path);
    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read_to_string(&backups[0]).unwrap(),
        "127.0.0.1 api.test\n127.0.0.1 localhost\n::1 api.test\n"
    );

    assert!(hosts(&path).remove_host("api.test").unwrap().is_empty());
}

#[test]
fn crlf_line_ending_override() {
    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), "127.0.0.1 localhost\n");

    HostsFile::new(&path)
        .with_line_ending("\r\n")
        .set(Entry::new(ip("::1"), "localhost"))
        .unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "127.0.0.1 localhost\r\n::1 localhost"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = common::temp_dir();
    let path = dir.path().join("hosts");

    let err = hosts(&path).read(true).unwrap_err();
    assert!(matches!(err, HostsError::Io { ref source, .. } if source.kind() == io::ErrorKind::NotFound));

    assert!(hosts(&path).set(Entry::new(ip("1.2.3.4"), "a.test")).is_err());
    assert!(!path.exists());
}

#[test]
fn permission_errors_are_distinct() {
    let path = Path::new("/etc/hosts");
    let denied = HostsError::io(path, io::Error::from(io::ErrorKind::PermissionDenied));
    assert!(denied.is_permission_denied());
    assert!(denied.to_string().contains("/etc/hosts"));

    let other = HostsError::io(path, io::Error::from(io::ErrorKind::NotFound));
    assert!(!other.is_permission_denied());
}

#[cfg(unix)]
#[test]
fn write_into_read_only_dir_is_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = common::temp_dir();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    let path = common::hosts_file(&locked, "127.0.0.1 localhost\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // root ignores directory permissions
    if fs::write(locked.join("canary"), "").is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let err = hosts(&path)
        .set(Entry::new(ip("1.2.3.4"), "a.test"))
        .unwrap_err();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(err.is_permission_denied(), "{err:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost\n");
}

#[cfg(unix)]
#[test]
fn write_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = common::temp_dir();
    let path = common::hosts_file(dir.path(), "127.0.0.1 localhost\n");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    hosts(&path)
        .set(Entry::new(ip("1.2.3.4"), "a.test"))
        .unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}
