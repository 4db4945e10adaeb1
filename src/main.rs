//! huffcodec CLI
//! Usage:
//!   huffcodec compress   <input> [-o <output>] [--verify]
//!   huffcodec decompress <input> [-o <output>]
//!   huffcodec info       <input>

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use huffcodec::{CodecOptions, ContainerInfo, HuffmanCodec};

const EXTENSION: &str = "huff";

#[derive(Parser, Debug)]
#[command(name = "huffcodec", version, about = "Huffman compression for arbitrary files")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a .huff container
    Compress {
        input: PathBuf,
        /// Defaults to <input>.huff
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Decode the container again before writing it
        #[arg(long)]
        verify: bool,
    },
    /// Restore the original file from a container
    Decompress {
        input: PathBuf,
        /// Defaults to <input> without .huff, or <input>.out
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print container statistics without decoding
    Info { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Compress {
            input,
            output,
            verify,
        } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            log::info!("Reading {}...", input.display());
            let data = fs::read(&input)?;

            log::info!("Encoding {} bytes...", data.len());
            let container = HuffmanCodec::compress_with(&data, &CodecOptions { verify })?;

            fs::write(&output, &container)?;
            log::info!(
                "Compression complete: {} ({} bytes -> {} bytes)",
                output.display(),
                data.len(),
                container.len()
            );
        }
        Command::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            log::info!("Reading {}...", input.display());
            let container = fs::read(&input)?;

            let decoded = huffcodec::decompress(&container)?;

            fs::write(&output, &decoded)?;
            log::info!(
                "Decompression complete: {} ({} bytes -> {} bytes)",
                output.display(),
                container.len(),
                decoded.len()
            );
        }
        Command::Info { input } => {
            let container = fs::read(&input)?;
            let info = ContainerInfo::inspect(&container)?;
            println!("{}", input.display());
            println!("{}", info);
        }
    }
    Ok(())
}

fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}
