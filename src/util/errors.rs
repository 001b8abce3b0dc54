use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HttpError: {0}")]
    HttpError(String),

    #[error("DecodingError: {0}")]
    DecodingError(String),

    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    // Hard stop: never retried, no update request is issued once raised
    #[error("StorageRootImmutable: {0}")]
    StorageRootImmutable(String),
}

impl Error {
    pub fn metric_label(&self) -> String {
        match self {
            Error::HttpError(_) => "httperror",
            Error::DecodingError(_) => "decodingerror",
            Error::InvalidArgument(_) => "invalidargument",
            Error::StorageRootImmutable(_) => "storagerootimmutable",
        }
        .to_string()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
