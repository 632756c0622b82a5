use std::io;
use thiserror::Error;

/// Startup failures. Once a session exists nothing in the engine fails.
#[derive(Debug, Error)]
pub enum TyperError {
    #[error("cannot draw {requested} words from a word list of {available}")]
    InsufficientCorpus { requested: usize, available: usize },

    #[error("word list '{source_name}' is unavailable: {reason}")]
    CorpusUnavailable { source_name: String, reason: String },

    #[error("terminal is unavailable: {0}")]
    TerminalUnavailable(#[source] io::Error),
}

impl TyperError {
    pub fn corpus_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorpusUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TyperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_corpus_message_names_both_sizes() {
        let err = TyperError::InsufficientCorpus {
            requested: 60,
            available: 12,
        };
        assert_eq!(
            err.to_string(),
            "cannot draw 60 words from a word list of 12"
        );
    }

    #[test]
    fn terminal_unavailable_keeps_io_source() {
        use std::error::Error;

        let err = TyperError::TerminalUnavailable(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdin must be a tty",
        ));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("stdin must be a tty"));
    }
}
