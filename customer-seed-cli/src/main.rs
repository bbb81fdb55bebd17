use std::error::Error;
use std::ffi::OsString;
use std::time::Instant;

use clap::{ErrorKind, Parser};
use log::{info, warn};
use rand::thread_rng;

use customer_seed::factory::CustomerFactory;
use customer_seed::writer::seed_file;

const NUM_RECORDS: u32 = 22_000;
const OUTPUT_FILE: &str = "mock_customers.csv";

/// Writes `mock_customers.csv` to the current directory with synthetic customer
/// seed data. Existing content is overwritten.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {}

/// Only `--help` and `--version` stop the run; any other argument is logged and ignored.
fn check_args<I, T>(args: I) -> Result<(), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(Cli {}) => Ok(()),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Err(e)
        }
        Err(e) => {
            warn!("Ignoring command-line arguments: {:?}", e.kind());
            Ok(())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    if let Err(e) = check_args(std::env::args_os()) {
        e.exit();
    }

    let factory = CustomerFactory::today()?;
    let (earliest, latest) = factory.birth_date_range();
    info!("Birth dates range from {earliest} to {latest}");

    let start = Instant::now();
    seed_file(OUTPUT_FILE, NUM_RECORDS, &factory, &mut thread_rng())?;
    info!(
        "Generated {NUM_RECORDS} customers in {OUTPUT_FILE}, took: {:.2?}",
        start.elapsed()
    );

    Ok(())
}
