use hero_skins::Options;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let output_dir = std::env::args_os().nth(1).map(PathBuf::from);
  let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(Options::DEFAULT_OUTPUT_DIR));

  match Options::new(output_dir).run().await {
    Ok(_) => ExitCode::SUCCESS,
    Err(error) => {
      tracing::error!("{error}");
      ExitCode::FAILURE
    }
  }
}
