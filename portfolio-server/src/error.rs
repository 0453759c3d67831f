use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Document root {0} is not a directory")]
    MissingDocumentRoot(PathBuf),
    #[error("Invalid content type '{mime}' for extension '{extension}'")]
    InvalidContentType { extension: String, mime: String },
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<rocket::figment::Error>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
