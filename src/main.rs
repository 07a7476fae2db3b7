use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fitplot::convergence;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fitplot", version)]
#[command(about = "Plots DRVs against mazeEndIter with a least-squares line", long_about = None)]
struct Args {
  /// Write the figure to a PNG file instead of opening a window
  #[arg(long, value_name = "PATH")]
  save: Option<PathBuf>,
}

fn main() -> Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let samples = convergence::sample_set()?;
  let (plot, fit) = convergence::figure(&samples)?;
  tracing::debug!(?fit, "built figure");

  match &args.save {
    Some(path) => plot.save(path)?,
    None => plot.show()?,
  }

  Ok(())
}
