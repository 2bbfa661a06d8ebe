use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown seed format: {0}")]
    UnknownFormat(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(u64),

    #[error("No record ids left after {0}")]
    IdOverflow(u64),

    #[error("Invalid page size: {0} (expected 5, 10, 15 or 20)")]
    InvalidPageSize(usize),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
