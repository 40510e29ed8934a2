//! The download job: one pass over the manifest, one request per skin.

use chrono::{DateTime, Duration, Utc};

use crate::manifest::Item;
use crate::options::{FailurePolicy, Options};
use crate::source::Source;

use std::path::PathBuf;



/// The outcome of a completed run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  /// The number of manifest items that were processed.
  pub items: usize,
  /// Every file written, in download order. A path appears twice if it was overwritten.
  pub written: Vec<PathBuf>,
  /// Skins that failed to download or save.
  /// Always empty under [`FailurePolicy::Abort`].
  pub failures: Vec<VariantFailure>
}

impl Report {
  fn new(started_at: DateTime<Utc>) -> Self {
    Report {
      started_at,
      finished_at: started_at,
      items: 0,
      written: Vec::new(),
      failures: Vec::new()
    }
  }

  #[inline]
  pub fn is_complete(&self) -> bool {
    self.failures.is_empty()
  }

  #[inline]
  pub fn duration(&self) -> Duration {
    self.finished_at - self.started_at
  }
}

/// A skin that could not be downloaded or saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFailure {
  pub item_id: String,
  pub display_name: String,
  pub variant: u32,
  /// The stringified error.
  pub error: String
}

/// Runs the job against any [`Source`].
///
/// The output directory is created first, then the manifest is fetched and every
/// variant of every item is downloaded in manifest order, pausing for
/// [`Options::delay`] after each one. Manifest errors always end the run;
/// per-skin errors are handled according to [`Options::failure_policy`].
pub async fn run_with<S: Source + ?Sized>(source: &S, options: &Options) -> Result<Report, crate::Error> {
  let mut report = Report::new(Utc::now());
  tokio::fs::create_dir_all(&options.output_dir).await?;

  let items = options.request_manifest_from(source).await?;
  debug!(items = items.len(), "manifest parsed");

  for item in items.iter() {
    info!(id = %item.id, name = %item.display_name, variants = item.variant_count(), "downloading skins");
    for variant in item.variants() {
      match download_variant(source, options, item, variant.index).await {
        Ok(path) => {
          info!(file = %path.display(), "downloaded");
          report.written.push(path);
        },
        Err(error) => match options.failure_policy {
          FailurePolicy::Abort => return Err(error),
          FailurePolicy::Continue => {
            warn!(id = %item.id, name = %item.display_name, variant = variant.index, %error, "skipping skin");
            report.failures.push(VariantFailure {
              item_id: item.id.clone(),
              display_name: item.display_name.clone(),
              variant: variant.index,
              error: error.to_string()
            });
          }
        }
      };

      if !options.delay.is_zero() {
        tokio::time::sleep(options.delay).await;
      };
    };

    report.items += 1;
  };

  report.finished_at = Utc::now();
  info!(files = report.written.len(), failures = report.failures.len(), "all wallpapers downloaded");
  Ok(report)
}

async fn download_variant<S: Source + ?Sized>(source: &S, options: &Options, item: &Item, variant: u32)
-> Result<PathBuf, crate::Error> {
  let url = item.asset_url(&options.asset_template, variant);
  debug!(%url, "requesting skin");
  let path = item.file_path(&options.output_dir, variant)?;
  let bytes = source.fetch(&url).await?;
  tokio::fs::write(&path, bytes).await?;
  Ok(path)
}
