use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand};
use lz77pack::{
    compress_gated, decompress_with_report, CompressConfig, CompressOutcome, MatchStrategy,
};

#[derive(Parser, Debug)]
#[command(name = "lz77pack")]
#[command(about = "Compress and decompress files with a sliding-window LZ77 codec")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Verbose output (repeat for per-token tracing)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress a file
    Compress(CompressArgs),
    /// Decompress a file
    Decompress(DecompressArgs),
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Search window in bytes (1-4095)
    #[arg(short, long, default_value = "20")]
    window: usize,

    /// Longest match searched for (lengths above 15 are split)
    #[arg(short, long, default_value = "15")]
    lookahead: usize,

    /// Match search strategy: brute or indexed
    #[arg(long, default_value = "indexed")]
    strategy: MatchStrategy,

    /// Write the output even when it is not smaller than the input
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Compressed input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Write whatever was recovered even if decoding aborted
    #[arg(long)]
    lenient: bool,
}

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_NOT_SMALLER: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match &cli.command {
        Cmd::Compress(args) => run_compress(args, cli.verbose > 0),
        Cmd::Decompress(args) => run_decompress(args, cli.verbose > 0),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    let mut data = Vec::new();
    let result = if is_stdio(path) {
        io::stdin().lock().read_to_end(&mut data)
    } else {
        File::open(path).and_then(|mut f| f.read_to_end(&mut data))
    };
    result.map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    Ok(data)
}

/// Write `data` in full to a file or stdout
fn write_output(path: &Path, data: &[u8]) -> Result<(), String> {
    let result = if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data).and_then(|_| stdout.flush())
    } else {
        File::create(path).and_then(|f| {
            let mut writer = BufWriter::new(f);
            writer.write_all(data)?;
            writer.flush()
        })
    };
    result.map_err(|e| format!("cannot write '{}': {}", path.display(), e))
}

fn run_compress(args: &CompressArgs, verbose: bool) -> Result<u8, String> {
    let config = CompressConfig::new(args.window, args.lookahead).with_strategy(args.strategy);
    let data = read_input(&args.input)?;

    let start = Instant::now();
    let outcome = compress_gated(&data, &config)
        .map_err(|e| format!("compress '{}': {}", args.input.display(), e))?;
    let elapsed = start.elapsed();

    let (output, code) = match outcome {
        CompressOutcome::Compressed(bytes) => (bytes, EXIT_OK),
        CompressOutcome::NotSmaller { original_len, compressed } => {
            eprintln!(
                "'{}' did not shrink ({} -> {} bytes)",
                args.input.display(),
                original_len,
                compressed.len()
            );
            if !args.force {
                eprintln!("Output not written; use --force to keep it anyway");
                return Ok(EXIT_NOT_SMALLER);
            }
            (compressed, EXIT_OK)
        }
    };

    write_output(&args.output, &output)?;

    if verbose {
        eprintln!("Compression complete:");
        eprintln!("  Strategy:         {}", config.strategy);
        eprintln!("  Window:           {}", config.window_size);
        eprintln!("  Lookahead:        {}", config.lookahead_size);
        eprintln!("  Input bytes:      {}", data.len());
        eprintln!("  Output bytes:     {}", output.len());
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(code)
}

fn run_decompress(args: &DecompressArgs, verbose: bool) -> Result<u8, String> {
    let data = read_input(&args.input)?;

    let start = Instant::now();
    let report = decompress_with_report(&data);
    let elapsed = start.elapsed();

    // Individual warnings are already logged by the decoder
    if !report.warnings.is_empty() {
        eprintln!(
            "Warning: '{}': {} recoverable problem(s) while decoding",
            args.input.display(),
            report.warnings.len()
        );
    }

    if let Some(e) = &report.error {
        if !args.lenient {
            return Err(format!(
                "decompress '{}': {} ({} bytes recovered, use --lenient to keep them)",
                args.input.display(),
                e,
                report.data.len()
            ));
        }
        eprintln!("Warning: '{}': {}; writing partial output", args.input.display(), e);
    }

    write_output(&args.output, &report.data)?;

    if verbose {
        eprintln!("Decompression complete:");
        eprintln!("  Input bytes:      {}", report.stats.input_bytes);
        eprintln!("  Output bytes:     {}", report.stats.output_bytes);
        eprintln!("  Literals:         {}", report.stats.literals);
        eprintln!("  Matches:          {}", report.stats.matches);
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    if report.error.is_some() {
        Ok(EXIT_ERROR)
    } else {
        Ok(EXIT_OK)
    }
}
