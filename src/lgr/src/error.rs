// mflgrrs-lgr/src/error.rs

use crate::child::LgrChildBuilderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for LGR control file operations.
pub type Result<T> = std::result::Result<T, LgrError>;

#[derive(Error, Debug)]
pub enum LgrError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A literal marker (`LGR`, `PARENTONLY`, `CHILDONLY`) is missing.
    #[error("{expected} must be entered as the first item in dataset {dataset}, found {found:?}\n  {heading}")]
    Format {
        dataset: u8,
        expected: &'static str,
        found: String,
        heading: String,
    },

    /// A numeric record does not have the expected shape.
    #[error("could not read dataset {dataset} - {expected}: {line:?}")]
    Parse {
        dataset: u8,
        expected: String,
        line: String,
    },

    #[error("unexpected end of file while reading dataset {dataset}")]
    UnexpectedEof { dataset: u8 },

    #[error("nonzero values for IUPBHSV ({iupbhsv}) and IUPBFSV ({iupbfsv}) are not supported")]
    UnsupportedConfiguration { iupbhsv: i32, iupbfsv: i32 },

    #[error("invalid coupling parameters for child grid {index}: {source}")]
    Child {
        index: usize,
        #[source]
        source: LgrChildBuilderError,
    },

    /// Failure reported by the solver model collaborator.
    #[error("solver model {namefile}: {source}")]
    Model {
        namefile: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LgrError {
    /// Dataset number the error was raised on, when it comes from the control file.
    pub fn dataset(&self) -> Option<u8> {
        match self {
            LgrError::Format { dataset, .. }
            | LgrError::Parse { dataset, .. }
            | LgrError::UnexpectedEof { dataset } => Some(*dataset),
            LgrError::UnsupportedConfiguration { .. } => Some(5),
            _ => None,
        }
    }
}

/// A workspace directory could not be created.
///
/// This is recoverable: the operation continues in `fallback` and the error
/// is handed back to the caller.
#[derive(Error, Debug)]
#[error("{} is not a valid workspace, using {} instead", .path.display(), .fallback.display())]
pub struct WorkspaceError {
    pub path: PathBuf,
    pub fallback: PathBuf,
    #[source]
    pub source: std::io::Error,
}
