//! Order-preserving hosts document and the set/remove mutations.

use crate::line::{classify, Entry, Line};

/// Whole hosts file as classified lines, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    preserve_formatting: bool,
}

impl Document {
    /// Empty document. When `preserve_formatting` is false, non-entry lines
    /// pushed through [`Document::push_raw`] are dropped.
    pub fn new(preserve_formatting: bool) -> Self {
        Self {
            lines: Vec::new(),
            preserve_formatting,
        }
    }

    /// Classify every line of `content` (`\n` or `\r\n` terminated).
    pub fn parse(content: &str, preserve_formatting: bool) -> Self {
        let mut doc = Self::new(preserve_formatting);
        for raw in content.lines() {
            doc.push_raw(raw);
        }
        doc
    }

    /// Classify and append one raw line.
    pub fn push_raw(&mut self, raw: &str) {
        match classify(raw) {
            line @ Line::Entry(_) => self.lines.push(line),
            line @ Line::Opaque(_) if self.preserve_formatting => self.lines.push(line),
            Line::Opaque(_) => {}
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(Line::as_entry)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Insert before a trailing blank line if there is one, else append.
    pub fn insert_before_trailing_blank(&mut self, line: Line) {
        match self.lines.last() {
            Some(last) if last.is_blank() => {
                let at = self.lines.len() - 1;
                self.lines.insert(at, line);
            }
            _ => self.lines.push(line),
        }
    }

    /// Point every entry with the same host and address family at
    /// `entry.address`, or insert `entry` when none exists.
    ///
    /// Returns 0 when the entry was inserted, otherwise the number of lines
    /// updated. All matching lines are updated, not only the first; their
    /// comments are kept.
    pub fn set_entry(&mut self, entry: Entry) -> usize {
        let family = entry.family();
        let mut matched = 0;
        for line in &mut self.lines {
            if let Line::Entry(e) = line {
                if e.host == entry.host && e.family() == family {
                    e.address = entry.address.clone();
                    matched += 1;
                }
            }
        }
        if matched == 0 {
            self.insert_before_trailing_blank(Line::Entry(entry));
        }
        matched
    }

    /// Drop every entry whose address text and host equal `address` and
    /// `host`. Returns how many were removed; the document is untouched when
    /// that is 0.
    pub fn remove_entry(&mut self, address: &str, host: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| match line {
            Line::Entry(e) => !(e.address.as_str() == address && e.host == host),
            Line::Opaque(_) => true,
        });
        before - self.lines.len()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
