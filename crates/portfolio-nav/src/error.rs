use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown page identifier: '{0}'")]
    UnknownPage(String),
    #[error("No element with id '{0}' in the document")]
    MissingElement(String),
}
