use byte_ring::config::{load_config, Config, Overrides};
use byte_ring::fd::FdStream;
use byte_ring::pump::{pump, PumpStats};
use byte_ring::{Error, RingBuffer};
use clap::Parser;
use log::{error, info};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

/// Copy a byte stream through a fixed-size ring buffer.
#[derive(Debug, Parser)]
#[command(name = "ringpump", version)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Usable ring buffer capacity in bytes
    #[arg(long)]
    capacity: Option<usize>,
    /// Bytes moved per read/write call
    #[arg(long)]
    chunk: Option<usize>,
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<PumpStats, Error> {
    let file_cfg = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let cfg = file_cfg.resolve(Overrides {
        capacity: cli.capacity,
        chunk: cli.chunk,
        input: cli.input,
        output: cli.output,
    })?;

    let mut rb = RingBuffer::new(cfg.capacity)?;

    let input_file = cfg.input.as_ref().map(File::open).transpose()?;
    let output_file = cfg.output.as_ref().map(File::create).transpose()?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut input = match &input_file {
        Some(file) => FdStream::new(file),
        None => FdStream::new(&stdin),
    };
    let mut output = match &output_file {
        Some(file) => FdStream::new(file),
        None => FdStream::new(&stdout),
    };

    pump(&mut rb, &mut input, &mut output, cfg.chunk)
}

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(stats) => info!(
            "Pumped {} bytes in, {} bytes out ({} reads, {} writes)",
            stats.bytes_in, stats.bytes_out, stats.reads, stats.writes
        ),
        Err(e) => {
            error!("ringpump failed: {}", e);
            eprintln!("ringpump: {}", e);
            process::exit(e.to_status_code());
        }
    }
}
