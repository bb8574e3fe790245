#[macro_use]
extern crate derive_more;

use std::{
    collections::BTreeSet,
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use failure::Fail;
use itertools::Itertools;
use lfsr_periods::{summary::PeriodIndex, table};
use log::info;
use structopt::StructOpt;

/// Collect period lengths from the register matrices and cross-index
/// them over register counts.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Highest register count to load (LFSR_1.csv .. LFSR_{n}.csv).
    #[structopt(short = "r", long = "max-registers", default_value = "14")]
    max_registers: u32,
    /// Directory holding the period matrices.
    #[structopt(short = "d", long = "dir", default_value = ".")]
    dir: PathBuf,
}

#[derive(Fail, Debug, From)]
enum Error {
    #[fail(display = "io: {}", _0)]
    Io(#[cause] std::io::Error),
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let opt = Opt::from_args();

    info!("searching period lengths from CSV files");

    let mut index = PeriodIndex::new();
    let mut register_lines = Vec::new();
    for register_count in 1..=opt.max_registers {
        let path = opt.dir.join(format!("LFSR_{}.csv", register_count));
        let content = fs::read_to_string(&path)?;
        let mut periods = BTreeSet::new();
        for line in content.lines().skip(1) {
            periods.extend(table::parse_periods(line));
        }
        info!(
            "{:>2} registers: [{}]",
            register_count,
            periods.iter().join(", ")
        );
        for &period in &periods {
            index.record(register_count, period);
        }
        register_lines.push(table::index_row(register_count, periods.iter()));
    }
    write_lines(&opt.dir.join("registerPeriods.csv"), &register_lines)?;

    info!("possible register counts for each period, ordered by minimum register count:");
    let mut by_register_lines = Vec::new();
    for (period, registers) in index.by_first_register() {
        info!("period {:>5}: [{}]", period, registers.iter().join(", "));
        by_register_lines.push(table::index_row(period, registers.iter()));
    }
    write_lines(
        &opt.dir.join("periodRegisters-byRegister.csv"),
        &by_register_lines,
    )?;

    info!("possible register counts for each period, ordered by period:");
    let mut by_period_lines = Vec::new();
    for (period, registers) in index.by_period() {
        info!("period {:>5}: [{}]", period, registers.iter().join(", "));
        by_period_lines.push(table::index_row(period, registers.iter()));
    }
    write_lines(
        &opt.dir.join("periodRegisters-byPeriod.csv"),
        &by_period_lines,
    )?;

    Ok(())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
