//! File Payload Module
//!
//! Reads files into line payloads for the cache demo.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Lines longer than this many bytes are classified as long.
pub const LONG_LINE_THRESHOLD: usize = 100;

// == Line Class ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Long,
    Short,
}

impl LineClass {
    pub fn of(line: &[u8]) -> Self {
        if line.len() > LONG_LINE_THRESHOLD {
            LineClass::Long
        } else {
            LineClass::Short
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineClass::Long => "long",
            LineClass::Short => "short",
        }
    }
}

// == Load Lines ==
/// Reads `path` and splits it into lines without their terminators.
///
/// A trailing newline does not produce an extra empty line; an empty file
/// yields no lines.
pub fn load_lines(path: &Path) -> Result<Vec<Vec<u8>>> {
    let contents =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(split_lines(&contents))
}

fn split_lines(contents: &[u8]) -> Vec<Vec<u8>> {
    if contents.is_empty() {
        return Vec::new();
    }
    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_lines() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"one"), vec![b"one".to_vec()]);
        assert_eq!(
            split_lines(b"one\r\ntwo\n"),
            vec![b"one".to_vec(), b"two".to_vec()]
        );
        assert_eq!(
            split_lines(b"\n\n"),
            vec![Vec::<u8>::new(), Vec::new()]
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(LineClass::of(&[b'x'; 100]), LineClass::Short);
        assert_eq!(LineClass::of(&[b'x'; 101]), LineClass::Long);
        assert_eq!(LineClass::of(b""), LineClass::Short);
        assert_eq!(LineClass::Long.as_str(), "long");
    }

    #[test]
    fn test_load_lines_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first line").unwrap();
        writeln!(file, "second line").unwrap();

        let lines = load_lines(file.path()).unwrap();
        assert_eq!(lines, vec![b"first line".to_vec(), b"second line".to_vec()]);
    }

    #[test]
    fn test_load_lines_missing_file() {
        let err = load_lines(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
