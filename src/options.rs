//! Options that specify where to fetch the manifest and skin images from,
//! where to save them and how to react to a failed download.
//!
//! The defaults point at the live hero list and image CDN and reproduce the
//! behavior of a plain run: a fixed browser user agent, a half second pause
//! between downloads and stopping at the first error.

use crate::job::Report;
use crate::manifest::Item;
use crate::source::{HttpSource, Source};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;



#[derive(Debug, Error, Clone, Copy)]
#[error("expected one of \"abort\" or \"continue\"")]
pub struct ParseFailurePolicyError;

/// Decides what a run does when a single skin fails to download or save.
/// Failing to get the manifest always stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Stop the run and return the error. Files already written stay on disk.
  Abort,
  /// Record the failure in the [`Report`] and move on to the next skin.
  Continue
}

impl FailurePolicy {
  pub fn to_str(self) -> &'static str {
    match self {
      FailurePolicy::Abort => "abort",
      FailurePolicy::Continue => "continue"
    }
  }
}

impl Default for FailurePolicy {
  #[inline]
  fn default() -> Self {
    FailurePolicy::Abort
  }
}

impl FromStr for FailurePolicy {
  type Err = ParseFailurePolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "abort" => Ok(FailurePolicy::Abort),
      "continue" => Ok(FailurePolicy::Continue),
      _ => Err(ParseFailurePolicyError)
    }
  }
}

impl fmt::Display for FailurePolicy {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.to_str())
  }
}

/// A URL containing `{id}` and `{variant}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
  /// Fails with [`Error::InvalidTemplate`][crate::Error::InvalidTemplate]
  /// if the template contains any other placeholder.
  pub fn new(template: impl Into<String>) -> Result<Self, crate::Error> {
    let template = template.into();
    match crate::format::find_unknown_key(&template) {
      Some(key) => Err(crate::Error::InvalidTemplate(format!("unknown placeholder {{{key}}} in {template:?}"))),
      None => Ok(UrlTemplate(template))
    }
  }

  pub fn render(&self, id: &str, variant: u32) -> String {
    crate::format::apply_template(&self.0, id, variant).into_owned()
  }

  #[inline]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for UrlTemplate {
  fn default() -> Self {
    UrlTemplate(Options::DEFAULT_ASSET_TEMPLATE.to_owned())
  }
}

impl FromStr for UrlTemplate {
  type Err = crate::Error;

  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    UrlTemplate::new(s)
  }
}

impl fmt::Display for UrlTemplate {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Options that specify where and how to download skin wallpapers.
#[derive(Debug, Clone)]
pub struct Options {
  /// The URL of the hero list manifest.
  pub manifest_url: String,
  /// The URL template of skin images.
  pub asset_template: UrlTemplate,
  /// The `User-Agent` header sent with every request.
  pub user_agent: String,
  /// The directory skin images are saved to.
  pub output_dir: PathBuf,
  /// The pause after each saved image.
  pub delay: Duration,
  pub failure_policy: FailurePolicy
}

impl Options {
  pub const DEFAULT_MANIFEST_URL: &'static str = "https://pvp.qq.com/web201605/js/herolist.json";
  pub const DEFAULT_ASSET_TEMPLATE: &'static str =
    "https://game.gtimg.cn/images/yxzj/img201606/skin/hero-info/{id}/{id}-bigskin-{variant}.jpg";
  pub const DEFAULT_USER_AGENT: &'static str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
  /// Defaults to `wallpapers`.
  pub const DEFAULT_OUTPUT_DIR: &'static str = "wallpapers";
  /// Defaults to 500 milliseconds.
  pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Options {
      manifest_url: Self::DEFAULT_MANIFEST_URL.to_owned(),
      asset_template: UrlTemplate::default(),
      user_agent: Self::DEFAULT_USER_AGENT.to_owned(),
      output_dir: output_dir.into(),
      delay: Self::DEFAULT_DELAY,
      failure_policy: FailurePolicy::default()
    }
  }

  pub fn output_dir(self, output_dir: impl Into<PathBuf>) -> Self {
    Options { output_dir: output_dir.into(), ..self }
  }

  pub fn manifest_url(self, manifest_url: impl Into<String>) -> Self {
    Options { manifest_url: manifest_url.into(), ..self }
  }

  pub fn asset_template(self, asset_template: UrlTemplate) -> Self {
    Options { asset_template, ..self }
  }

  pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
    Options { user_agent: user_agent.into(), ..self }
  }

  pub fn delay(self, delay: Duration) -> Self {
    Options { delay, ..self }
  }

  pub fn failure_policy(self, failure_policy: FailurePolicy) -> Self {
    Options { failure_policy, ..self }
  }

  /// Builds the HTTP source these options describe.
  pub fn http_source(&self) -> Result<HttpSource, crate::Error> {
    HttpSource::new(&self.user_agent)
  }

  /// Fetches and parses the manifest over HTTP.
  pub async fn request_manifest(&self) -> Result<Vec<Item>, crate::Error> {
    let source = self.http_source()?;
    self.request_manifest_from(&source).await
  }

  pub async fn request_manifest_from<S: Source + ?Sized>(&self, source: &S) -> Result<Vec<Item>, crate::Error> {
    debug!(url = %self.manifest_url, "requesting manifest");
    let bytes = source.fetch(&self.manifest_url).await?;
    Item::parse_manifest(&bytes)
  }

  /// Downloads every skin over HTTP. Equivalent to [`crate::job::run_with`]
  /// using [`Options::http_source`].
  pub async fn run(&self) -> Result<Report, crate::Error> {
    let source = self.http_source()?;
    crate::job::run_with(&source, self).await
  }
}

impl Default for Options {
  fn default() -> Self {
    Options::new(Self::DEFAULT_OUTPUT_DIR)
  }
}



#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn failure_policy_round_trips_through_str() {
    for policy in [FailurePolicy::Abort, FailurePolicy::Continue] {
      assert_eq!(policy.to_string().parse::<FailurePolicy>().unwrap(), policy);
    };
    assert!("retry".parse::<FailurePolicy>().is_err());
  }

  #[test]
  fn url_template_rejects_unknown_placeholders() {
    assert!(UrlTemplate::new("https://cdn/{id}/{skin}.jpg").is_err());
    let template = UrlTemplate::new("https://cdn/{variant}/{id}.jpg").unwrap();
    assert_eq!(template.render("7", 3), "https://cdn/3/7.jpg");
    assert_eq!(UrlTemplate::default().as_str(), Options::DEFAULT_ASSET_TEMPLATE);
  }

  #[test]
  fn defaults() {
    let options = Options::default();
    assert_eq!(options.output_dir, PathBuf::from("wallpapers"));
    assert_eq!(options.delay, Duration::from_millis(500));
    assert_eq!(options.failure_policy, FailurePolicy::Abort);

    let options = options.delay(Duration::ZERO).failure_policy(FailurePolicy::Continue);
    assert_eq!(options.delay, Duration::ZERO);
    assert_eq!(options.failure_policy, FailurePolicy::Continue);
  }
}
