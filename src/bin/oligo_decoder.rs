use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use oligostore::io_utils::{io_cli_error, read_records, simple_cli_error};
use oligostore::{CodecConfig, PoolId, PoolManager, PrimerRegistry, Reconstructor};

/// Reconstruct a file from per-(pool, block) oligo CSVs.
#[derive(Parser)]
struct Args {
    /// Input CSV files named pool{P}_block{B}.csv
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Resolve the (pool, block) association from the file name convention.
fn pool_block_of(path: &Path) -> Option<(PoolId, usize)> {
    let stem = path.file_stem()?.to_str()?;
    let (pool_part, block_part) = stem.split_once('_')?;
    let pool = pool_part.strip_prefix("pool")?.parse().ok()?;
    let block = block_part.strip_prefix("block")?.parse().ok()?;
    Some((pool, block))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let manager = PoolManager::new(PrimerRegistry::new(), CodecConfig::default())?;
    let mut recon = Reconstructor::new();
    let mut valid = 0usize;
    let mut invalid = 0usize;
    let mut missing = 0usize;
    let mut skipped = 0usize;

    for path in &args.inputs {
        let Some((pool, block)) = pool_block_of(path) else {
            return Err(simple_cli_error(&format!(
                "cannot resolve pool/block from '{}': expected pool{{P}}_block{{B}}.csv",
                path.display()
            ))
            .into());
        };
        let records = read_records(path)
            .map_err(|e| simple_cli_error(&format!("reading '{}': {e}", path.display())))?;
        let (result, report) = manager.decode_partition(pool, block, &records);
        valid += report.crc.valid;
        invalid += report.crc.invalid;
        missing += report.crc.missing;
        skipped += report.errors.total();
        recon.add(result);
    }

    let bytes = recon.finish()?;
    fs::write(&args.output, &bytes)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;

    eprintln!(
        "Reconstructed {} bytes ({} oligos valid, {} invalid, {} missing CRC, {} skipped)",
        bytes.len(),
        valid,
        invalid,
        missing,
        skipped
    );
    Ok(())
}
