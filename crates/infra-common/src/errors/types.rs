//! Generic error type used by `infra-common` itself (config, lifecycle,
//! logging). Protocol crates (`sip-core`, `sip-transport`, `dialog-core`,
//! ...) keep their own `thiserror` `Error` enums and only touch this module
//! through the [`super::Classify`] trait.

use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;
