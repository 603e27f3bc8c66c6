use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Invalid directory path: {0}")]
    InvalidDirectory(String),

    #[error("Error loading ignore file {0}: {1}")]
    IgnoreFileError(String, String),

    #[error("Error listing files: {0}")]
    WalkError(String),

    #[error("Error reading input: {0}")]
    InputError(String),

    #[error("Error writing {0}: {1}")]
    OutputError(String, String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("No files found in the given directory.")]
    NoFilesFound,

    #[error("No files selected.")]
    NoFilesSelected,
}

impl MergeError {
    /// Informational outcomes that end the run without anything going wrong.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, MergeError::NoFilesFound | MergeError::NoFilesSelected)
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::IoError(err.to_string())
    }
}

impl From<walkdir::Error> for MergeError {
    fn from(err: walkdir::Error) -> Self {
        MergeError::WalkError(err.to_string())
    }
}
