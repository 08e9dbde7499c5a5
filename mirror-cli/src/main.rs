use std::path::PathBuf;
use std::process;

use clap::Parser;
use mirror_engine::{MirrorBuilder, MirrorError};
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};
use url::Url;

/// Mirror an HLS manifest tree to local disk.
///
/// Fetches the manifest at the given URL, recursively downloads every nested
/// playlist, segment and decryption key it references, and writes an
/// offline-playable copy with all references rewritten to local paths.
#[derive(Debug, Parser)]
#[command(name = "hls-mirror", version)]
struct Args {
    /// URL of the root manifest to mirror
    manifest_url: Url,

    /// Directory to write the manifest to
    #[arg(short, long, default_value = "manifest")]
    directory: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), MirrorError> {
    let builder = MirrorBuilder::new()?;
    builder.build(&args.manifest_url, &args.directory).await?;
    info!(directory = %args.directory.display(), "manifest mirrored");
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
