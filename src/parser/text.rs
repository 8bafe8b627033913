//! Plain text parser

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::model::Dataset;

use super::Parser;

/// Reads a text file as a sequence of lines
pub struct TextParser;

impl Parser for TextParser {
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError> {
        let content = String::from_utf8(fs::read(path)?)?;
        Ok(Dataset::Lines(split_lines(&content)))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "txt"
    }
}

/// Split on `\n` or `\r\n`, without line terminators
fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("one\r\ntwo  \n\nthree"), ["one", "two  ", "", "three"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = TextParser.parse(&path).unwrap_err();
        assert!(matches!(err, LoadError::Utf8(_)));
        assert_eq!(err.kind(), LoadErrorKind::ParseFailure);
    }
}
