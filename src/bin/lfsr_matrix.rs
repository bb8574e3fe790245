#[macro_use]
extern crate derive_more;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use failure::Fail;
use lfsr_periods::{summary, sweep, table, State};
use log::info;
use serde::Serialize;
use structopt::StructOpt;

/// Enumerate shift-register periods and write them as CSV matrices.
#[derive(Debug, StructOpt)]
enum Opt {
    /// Multiply-shift register: rows are start values, columns are moduli.
    Modulo {
        /// Size of the square matrix.
        #[structopt(short = "n", long = "size", default_value = "128")]
        size: State,
        #[structopt(short = "o", long = "out", default_value = "lfsr_periods.csv")]
        out: PathBuf,
    },
    /// Fibonacci registers: one matrix per register count, rows are tap
    /// masks, columns are start states.
    Fibonacci {
        #[structopt(short = "r", long = "max-registers", default_value = "14")]
        max_registers: u32,
        #[structopt(short = "d", long = "out-dir", default_value = ".")]
        out_dir: PathBuf,
        /// Also dump every cycle with its member states as JSON.
        #[structopt(long = "cycles")]
        cycles: Option<PathBuf>,
    },
}

#[derive(Fail, Debug, From)]
enum Error {
    #[fail(display = "search: {}", _0)]
    Search(#[cause] lfsr_periods::Error),
    #[fail(display = "serialization: {}", _0)]
    Serialization(#[cause] serde_json::Error),
    #[fail(display = "io: {}", _0)]
    Io(#[cause] std::io::Error),
}

#[derive(Serialize)]
struct CycleDump {
    register_count: u32,
    taps: State,
    perfect: bool,
    cycles: Vec<Vec<State>>,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    match Opt::from_args() {
        Opt::Modulo { size, out } => write_modulo_matrix(size, &out),
        Opt::Fibonacci {
            max_registers,
            out_dir,
            cycles,
        } => write_register_matrices(max_registers, &out_dir, cycles.as_ref().map(|p| p.as_path())),
    }
}

fn write_modulo_matrix(size: State, out: &Path) -> Result<(), Error> {
    info!("enumerating multiply-shift periods up to modulus {}", size);
    let runs = sweep::sweep_moduli(size)?;
    let mut lines = vec![table::matrix_header(1..=size)];
    for start in 1..=size {
        let cells = runs.iter().map(|run| period_cell(&run.partition, start));
        lines.push(table::matrix_row(start, cells));
    }
    write_lines(out, &lines)?;
    info!("created '{}'", out.display());
    Ok(())
}

fn write_register_matrices(
    max_registers: u32,
    dir: &Path,
    cycles_out: Option<&Path>,
) -> Result<(), Error> {
    let mut dump = Vec::new();
    for register_count in 1..=max_registers {
        let mut runs = sweep::sweep_registers(register_count)?;
        summary::rank(&mut runs);
        let perfect = summary::perfect_taps(&runs);
        info!(
            "{:>2} registers: {} tap sets, {} perfect: {:?}",
            register_count,
            runs.len(),
            perfect.len(),
            perfect
        );

        let max_state = (1u64 << register_count) - 1;
        let mut lines = vec![table::matrix_header(1..=max_state)];
        for run in &runs {
            let cells = (1..=max_state).map(|start| period_cell(&run.partition, start));
            lines.push(table::matrix_row(run.taps, cells));
        }
        let path = dir.join(format!("LFSR_{}.csv", register_count));
        write_lines(&path, &lines)?;
        info!("created '{}'", path.display());

        if cycles_out.is_some() {
            dump.extend(runs.iter().map(|run| CycleDump {
                register_count: run.register_count,
                taps: run.taps,
                perfect: run.partition.is_perfect(),
                cycles: run.partition.cycles().to_vec(),
            }));
        }
    }
    if let Some(path) = cycles_out {
        write!(File::create(path)?, "{}", serde_json::to_string(&dump)?)?;
        info!("created '{}'", path.display());
    }
    Ok(())
}

// A period the enumeration could not attribute renders as a blank cell
// rather than aborting the row.
fn period_cell(partition: &sweep::Partition, start: State) -> String {
    match partition.period_of(start) {
        Some(period) => period.to_string(),
        None => " ".to_string(),
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
