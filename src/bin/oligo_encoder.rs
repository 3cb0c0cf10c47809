use std::fs;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use oligostore::io_utils::{io_cli_error, simple_cli_error, write_records};
use oligostore::{
    round_robin_pools, CodecConfig, PoolManager, PrimerRegistry, RandomSynonyms,
};

/// Encode a binary file into DNA oligo tables, one CSV per (pool, block).
#[derive(Parser)]
struct Args {
    /// Input binary file
    input: PathBuf,
    /// Output directory for pool{P}_block{B}.csv files
    out_dir: PathBuf,
    /// Block size in bytes
    #[arg(long, default_value_t = 5120)]
    block_size: usize,
    /// Number of pools to round-robin blocks across
    #[arg(long, default_value_t = 3)]
    pools: u32,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.pools == 0 {
        return Err(simple_cli_error("--pools must be at least 1").into());
    }
    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    fs::create_dir_all(&args.out_dir)
        .map_err(|e| io_cli_error("creating output directory", &args.out_dir, e))?;

    let config = CodecConfig {
        block_size: args.block_size,
        ..CodecConfig::default()
    };
    let manager = PoolManager::new(PrimerRegistry::new(), config)?;
    let mut synonyms = RandomSynonyms::from_entropy();
    let outputs = manager.distribute(&data, round_robin_pools(args.pools), &mut synonyms);

    let bar = ProgressBar::new(outputs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} blocks")
            .expect("static progress template"),
    );

    let mut total_oligos = 0usize;
    for entry in &outputs {
        let records = entry.encoded.clone().into_result().map_err(|e| {
            simple_cli_error(&format!(
                "encoding block {} for pool {} failed: {e}",
                entry.block_index, entry.pool
            ))
        })?;
        let path = args
            .out_dir
            .join(format!("pool{}_block{}.csv", entry.pool, entry.block_index));
        write_records(&path, &records)
            .map_err(|e| simple_cli_error(&format!("writing '{}': {e}", path.display())))?;
        total_oligos += records.len();
        bar.inc(1);
    }
    bar.finish();

    eprintln!(
        "Encoded {} bytes into {} oligos across {} block files",
        data.len(),
        total_oligos,
        outputs.len()
    );
    Ok(())
}
