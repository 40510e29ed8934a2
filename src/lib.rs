#![warn(missing_debug_implementations, unreachable_pub)]

//! A Rust library for downloading hero skin wallpapers from the
//! public game asset API, by reading the hero list manifest and fetching
//! every numbered skin image it describes.

extern crate async_trait;
extern crate chrono;
extern crate once_cell;
extern crate regex;
pub extern crate reqwest;
#[macro_use]
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate thiserror;
extern crate tokio;
#[macro_use]
extern crate tracing;

mod format;
pub mod job;
pub mod manifest;
pub mod options;
pub mod source;

pub use crate::job::{Report, VariantFailure};
pub use crate::manifest::{Item, Variant};
pub use crate::options::{FailurePolicy, Options, UrlTemplate};
pub use crate::source::{HttpSource, Source};

use std::path::Path;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  HttpError(#[from] reqwest::Error),
  #[error("request to {url} failed with status {status}")]
  /// Returned when a server answers with a non-success status code.
  StatusError {
    url: String,
    status: u16
  },
  #[error(transparent)]
  JsonError(#[from] serde_json::Error),
  #[error(transparent)]
  IoError(#[from] std::io::Error),
  #[error("invalid user agent: {0:?}")]
  InvalidHeader(String),
  #[error("refusing to write {0:?} outside the output directory")]
  InvalidFileName(String),
  #[error("invalid url template: {0}")]
  InvalidTemplate(String)
}

/// Downloads every skin listed in the default manifest into `output_dir`,
/// stopping at the first error.
pub async fn run(output_dir: impl AsRef<Path>) -> Result<Report, Error> {
  Options::default().output_dir(output_dir.as_ref()).run().await
}
