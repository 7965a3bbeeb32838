use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
