#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

#[macro_use]
mod tracing;

mod authority;
mod error;
mod host;
mod query;
mod split;
mod url;

pub use error::Error;
pub use query::{Query, QueryValue};
pub use url::{standard_port, Url, UrlFormat};

/// A `Result` alias where the `Err` case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
