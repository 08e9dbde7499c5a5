use std::path::PathBuf;
use std::process;

use clap::Parser;
use mirror_engine::{MirrorError, decrypt_file};

/// Decrypt an AES-128-CBC encrypted segment file.
#[derive(Debug, Parser)]
#[command(name = "hls-decrypt", version)]
struct Args {
    /// Path to the raw encryption key file
    #[arg(long)]
    key: PathBuf,

    /// Hex string encryption IV (optional 0x prefix)
    #[arg(long)]
    iv: String,

    /// Path to the input file
    #[arg(long)]
    input: PathBuf,

    /// Path to the output file
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), MirrorError> {
    // The key file holds raw key material; the cipher helpers take hex.
    let key_bytes = std::fs::read(&args.key)?;
    let key_hex = hex::encode(key_bytes);

    decrypt_file(&args.iv, &key_hex, &args.input, &args.output)
}
