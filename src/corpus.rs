use include_dir::{include_dir, Dir};
use itertools::Itertools;
use std::fs;
use std::path::Path;

use crate::error::{Result, TyperError};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Name of the word list used when nothing else is configured.
pub const DEFAULT_CORPUS: &str = "english";

/// An ordered list of distinct candidate words.
#[derive(Clone, Debug, PartialEq)]
pub struct Corpus {
    pub name: String,
    pub words: Vec<String>,
}

impl Corpus {
    /// Load one of the word lists compiled into the binary.
    pub fn bundled(name: &str) -> Result<Self> {
        let file_name = format!("{name}.txt");
        let Some(file) = WORDS_DIR.get_file(&file_name) else {
            let reason = format!(
                "no bundled word list by that name (available: {})",
                Self::bundled_names().join(", ")
            );
            return Err(TyperError::corpus_unavailable(name, reason));
        };

        let Some(text) = file.contents_utf8() else {
            return Err(TyperError::corpus_unavailable(
                name,
                "word list is not valid UTF-8",
            ));
        };

        Self::parse(name, text)
    }

    /// Load a newline-separated word list from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => return Err(TyperError::corpus_unavailable(name, e)),
        };
        Self::parse(name, &text)
    }

    /// Names of the bundled word lists, sorted.
    pub fn bundled_names() -> Vec<String> {
        WORDS_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .filter_map(|s| s.to_str())
            .map(str::to_string)
            .sorted()
            .collect()
    }

    /// Blank lines are dropped and repeated words keep their first position.
    /// A list with no words at all is rejected rather than played empty.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let words: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .unique()
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return Err(TyperError::corpus_unavailable(
                name,
                "word list contains no words",
            ));
        }

        Ok(Self { name, words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
