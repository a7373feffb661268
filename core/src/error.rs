use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read document stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("index is full: document ids are exhausted")]
    Full,
}

pub type Result<T> = std::result::Result<T, Error>;
