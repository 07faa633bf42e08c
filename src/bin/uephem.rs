//! Sample one item of a JPL DE binary ephemeris as CSV.
//!
//! ```text
//! uephem <file> <item ID> <t0> [<t1> <resolution>]
//! ```
//!
//! Each output row is the Julian Date, the item components and, for items
//! 0 to 12, their rates per day.

use std::{io::BufWriter, process::ExitCode};

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use uephem::{
    ephemeris_query::{parse_item_id, parse_julian_date, parse_resolution, EphemerisQuery},
    jpl_ephem::{horizon::horizon_data::HorizonOptions, open_ephemeris},
    output::SampleWriter,
    uephem_errors::UephemError,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Evaluate a JPL DE binary ephemeris",
    allow_negative_numbers = true
)]
struct Args {
    /// DE binary file (e.g. linux_p1550p2650.440)
    file: Utf8PathBuf,

    /// Item ID, 0 to 14 (decimal, 0x hexadecimal or 0 octal)
    #[arg(required_unless_present = "constants")]
    item: Option<String>,

    /// Julian Date (TDB) of the first sample
    #[arg(required_unless_present = "constants")]
    t0: Option<String>,

    /// Julian Date (TDB) of the last sample
    #[arg(requires = "resolution")]
    t1: Option<String>,

    /// Number of samples between t0 and t1
    resolution: Option<String>,

    /// Print the decoded header to stderr before sampling
    #[arg(long, default_value_t = false)]
    info: bool,

    /// Print the constant table (name, value) instead of sampling
    #[arg(long, default_value_t = false)]
    constants: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] UephemError),

    #[error("output failed: {0}")]
    Output(#[from] csv::Error),
}

fn build_query(args: &Args) -> Result<EphemerisQuery, UephemError> {
    let (Some(item), Some(t0)) = (&args.item, &args.t0) else {
        return Err(UephemError::InvalidArgument(
            "item ID and t0 are required".to_string(),
        ));
    };
    let item = parse_item_id(item)?;
    let t0 = parse_julian_date(t0)?;

    match (&args.t1, &args.resolution) {
        (Some(t1), Some(resolution)) => EphemerisQuery::range(
            item,
            t0,
            parse_julian_date(t1)?,
            parse_resolution(resolution)?,
        ),
        _ => EphemerisQuery::at(item, t0),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut data = open_ephemeris(&args.file, HorizonOptions::default())?;
    if args.info {
        eprint!("{}", data.header());
    }

    let mut out = SampleWriter::new(BufWriter::new(std::io::stdout().lock()));

    if args.constants {
        for constant in data.constants()? {
            out.write_constant(&constant.name, constant.value)?;
        }
    } else {
        let query = build_query(args)?;
        data.evaluate_query(&query, |sample| {
            out.write_sample(&sample).map_err(CliError::from)
        })?;
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
