use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lsb_matching_with_seed::image::RasterImage;
use lsb_matching_with_seed::StegoEngine;
use tracing::info;

#[derive(Parser)]
#[command(name = "stego")]
#[command(about = "Hide or recover a payload in a lossless raster image via LSB matching", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a payload in an image under a chain of seeds
    Hide {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// May repeat to build a multi-level seed chain; each repetition
        /// hides under the next chain level
        #[arg(long = "seed", required = true)]
        seeds: Vec<String>,
        /// Treat each --seed as the 32-byte derived key directly, instead
        /// of deriving it through the hash chain
        #[arg(long)]
        raw_seed: bool,
        /// Read the payload from a file instead of stdin
        #[arg(long)]
        payload_file: Option<PathBuf>,
        /// Mark visited pixels with a per-level colour instead of writing
        /// payload bits; always requires --output
        #[arg(long)]
        test_mode: bool,
    },
    /// Recover a payload previously hidden under a chain of seeds
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[arg(long = "seed", required = true)]
        seeds: Vec<String>,
        #[arg(long)]
        raw_seed: bool,
        /// Write the recovered payload to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hide {
            input,
            output,
            seeds,
            raw_seed,
            payload_file,
            test_mode,
        } => run_hide(input, output, seeds, raw_seed, payload_file, test_mode),
        Commands::Extract {
            input,
            seeds,
            raw_seed,
            output,
        } => run_extract(input, seeds, raw_seed, output),
    }
}

fn read_payload(payload_file: Option<PathBuf>) -> Result<Vec<u8>> {
    match payload_file {
        Some(path) => fs::read(&path)
            .with_context(|| format!("reading payload file {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}

fn run_hide(
    input: PathBuf,
    output: PathBuf,
    seeds: Vec<String>,
    raw_seed: bool,
    payload_file: Option<PathBuf>,
    test_mode: bool,
) -> Result<()> {
    let payload = read_payload(payload_file)?;
    let img = image::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let mut raster = RasterImage::from_dynamic(img)?;

    let seed_bytes: Vec<Vec<u8>> = seeds.into_iter().map(String::into_bytes).collect();
    let level_count = seed_bytes.len();
    let mut engine = StegoEngine::new(&mut raster, seed_bytes, raw_seed, test_mode)?;

    for level in 1..=level_count {
        info!(level, "hiding payload at chain level");
        engine.hide(&payload)?;
        if level < level_count {
            engine.advance()?;
        }
    }

    raster
        .into_dynamic()
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

fn run_extract(
    input: PathBuf,
    seeds: Vec<String>,
    raw_seed: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let img = image::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let mut raster = RasterImage::from_dynamic(img)?;

    let seed_bytes: Vec<Vec<u8>> = seeds.into_iter().map(String::into_bytes).collect();
    let level_count = seed_bytes.len();
    if level_count == 0 {
        bail!("at least one --seed is required");
    }
    let mut engine = StegoEngine::new(&mut raster, seed_bytes, raw_seed, false)?;

    let mut payload = Vec::new();
    for level in 1..=level_count {
        info!(level, "extracting payload at chain level");
        payload = engine.extract()?;
        if level < level_count {
            engine.advance()?;
        }
    }

    match output {
        Some(path) => fs::write(&path, &payload)
            .with_context(|| format!("writing {}", path.display()))?,
        None => io::stdout().write_all(&payload)?,
    }
    Ok(())
}
