//! View error type.
use thiserror::Error;

use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum Error {
    #[error("view cannot render \"{template}\" because the template \"{}\" does not exist", .path.display())]
    TemplateNotFound { template: String, path: PathBuf },

    #[error("end_block called without a matching begin_block")]
    UnbalancedBlock,

    #[error("block \"{0}\" was not closed, did you forget an end_block?")]
    UnclosedBlock(String),

    #[error("no handler registered for template \"{0}\"")]
    NoHandler(String),

    #[error("variable \"{0}\" is not defined or in scope")]
    UndefinedVariable(String),

    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("serialization error")]
    SerializationError,

    #[error("failed to format a timestamp correctly, error: \"{0}\"")]
    TimeFormatError(#[from] time::error::Format),

    #[error("{0}")]
    Config(#[from] crate::config::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn syntax(line: usize, column: usize, message: impl ToString) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.to_string(),
        }
    }
}
