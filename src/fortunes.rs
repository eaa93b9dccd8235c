//! # Fortune store: text blocks published on the fortune stream.
//!
//! A fortunes resource is a plain-text file of blocks separated by lines
//! containing a single `%`:
//!
//! ```text
//! first fortune,
//! possibly multi-line
//! %
//! second fortune
//! %
//! ```
//!
//! Block lines are joined with `\n` with no trailing newline before the
//! delimiter. A trailing block that is not terminated by a final `%` is
//! silently dropped; this matches the historical reader and is kept for
//! compatibility.
//!
//! The store always contains at least the two built-in defaults. Blocks loaded
//! from a file *extend* the defaults rather than replace them, and a missing
//! or unreadable file is the documented fallback path, not an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::Rng;

/// Built-in fortunes, used as the base of every store.
pub const DEFAULT_FORTUNES: [&str; 2] = [
    "In the land of the blind, the one eyed man is king",
    "Now is the time for all good men to come to the aid of the party",
];

/// Immutable set of fortune blocks; never empty.
#[derive(Debug, Clone)]
pub struct FortuneStore {
    fortunes: Vec<String>,
}

impl FortuneStore {
    /// Builds a store from the built-in defaults only.
    pub fn defaults() -> Self {
        Self {
            fortunes: DEFAULT_FORTUNES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builds a store from the defaults extended by the blocks in `path`.
    ///
    /// A missing or unreadable file yields the defaults alone.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let mut store = Self::defaults();
        if let Ok(file) = File::open(path) {
            store.fortunes.extend(parse_blocks(BufReader::new(file)));
        }
        store
    }

    /// Picks a uniformly random fortune.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.fortunes[rng.random_range(0..self.fortunes.len())]
    }

    /// Number of fortunes in the store (at least 2).
    pub fn len(&self) -> usize {
        self.fortunes.len()
    }

    /// Always false; the defaults guarantee a non-empty store.
    pub fn is_empty(&self) -> bool {
        self.fortunes.is_empty()
    }

    /// All blocks, in load order (defaults first).
    pub fn fortunes(&self) -> &[String] {
        &self.fortunes
    }
}

/// Parses `%`-delimited blocks from a reader.
///
/// A block is pushed every time a lone `%` line is seen, even if the
/// accumulated text is empty. Text after the last `%` is dropped. An I/O
/// error mid-file keeps whatever parsed cleanly before it.
pub fn parse_blocks(reader: impl BufRead) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block = String::new();
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line == "%" {
            blocks.push(std::mem::take(&mut block));
        } else {
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(&line);
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(s: &str) -> Vec<String> {
        parse_blocks(Cursor::new(s))
    }

    #[test]
    fn parses_delimited_blocks() {
        let blocks = parse_str("A\n%\nB\nC\n%\n");
        assert_eq!(blocks, vec!["A".to_string(), "B\nC".to_string()]);
    }

    #[test]
    fn trailing_unterminated_block_is_dropped() {
        let blocks = parse_str("A\n%\nB\n");
        assert_eq!(blocks, vec!["A".to_string()]);
    }

    #[test]
    fn lone_delimiter_yields_empty_block() {
        let blocks = parse_str("%\n");
        assert_eq!(blocks, vec![String::new()]);
    }

    #[test]
    fn no_trailing_newline_inside_blocks() {
        let blocks = parse_str("one\ntwo\n%\n");
        assert_eq!(blocks, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse_str("").is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let store = FortuneStore::load("/definitely/not/a/real/path/fortunes");
        assert_eq!(store.len(), DEFAULT_FORTUNES.len());
        assert_eq!(store.fortunes()[0], DEFAULT_FORTUNES[0]);
    }

    #[test]
    fn file_blocks_extend_defaults() {
        let dir = std::env::temp_dir().join("fortunecast-test-store");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fortunes");
        std::fs::write(&path, "extra one\n%\nextra\ntwo\n%\n").unwrap();

        let store = FortuneStore::load(&path);
        assert_eq!(store.len(), DEFAULT_FORTUNES.len() + 2);
        assert_eq!(store.fortunes()[2], "extra one");
        assert_eq!(store.fortunes()[3], "extra\ntwo");
    }

    #[test]
    fn pick_returns_member_of_store() {
        let store = FortuneStore::defaults();
        let mut rng = rand::rng();
        for _ in 0..200 {
            let picked = store.pick(&mut rng);
            assert!(store.fortunes().iter().any(|f| f == picked));
        }
    }
}
