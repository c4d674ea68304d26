use crate::models::SessionState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("No image files in selection")]
    NoImages,

    #[error("No files selected")]
    NoFilesSelected,

    #[error("Customer name is required")]
    EmptyCustomerName,

    #[error("No file at index {index} (working set has {len})")]
    FileIndexOutOfRange { index: usize, len: usize },

    #[error("Cannot {action} while session is {state:?}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },

    #[error("Failed to open handoff link: {0}")]
    Opener(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = WorkflowError> = std::result::Result<T, E>;
