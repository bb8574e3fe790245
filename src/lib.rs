//! Exhaustive cycle-structure search over the state graphs of linear
//! feedback shift registers.
//!
//! Two register variants are supported: a multiply-shift register reduced
//! by a modulus, and a tap-masked Fibonacci register. For each
//! configuration the nonzero state space is partitioned into disjoint
//! cycles, tap sets whose states form a single full cycle are singled
//! out, and period lengths are cross-indexed over register counts.

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

use failure::Fail;

pub mod orbit;
pub mod summary;
pub mod sweep;
pub mod table;
pub mod transition;

pub use crate::{
    orbit::{detect, Orbit},
    summary::PeriodIndex,
    sweep::{partition, sweep_moduli, sweep_registers, Partition},
    transition::{FibonacciTransition, ModuloTransition, Transition},
};

/// Packed shift-register content; bit 0 is the first register.
pub type State = u64;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum Error {
    /// The modulus of a multiply-shift register must be positive.
    #[fail(display = "modulus must be positive")]
    ZeroModulus,
    /// Register counts are limited to the width of a packed state word.
    #[fail(display = "register count {} out of range", _0)]
    InvalidRegisterCount(u32),
    /// Tap masks must fit the register file and tap the first register.
    #[fail(
        display = "not a valid tap set: {:#b} over {} registers",
        taps, register_count
    )]
    InvalidTaps { register_count: u32, taps: State },
    /// A logic defect, never a recoverable runtime condition.
    #[fail(display = "invariant violated in {}: {}", _0, _1)]
    Invariant(&'static str, &'static str),
}

impl Error {
    /// Invalid configurations exclude a single configuration before any
    /// state is walked; invariant violations abort the enumeration.
    pub fn is_invalid_configuration(&self) -> bool {
        match self {
            Error::ZeroModulus | Error::InvalidRegisterCount(_) | Error::InvalidTaps { .. } => true,
            Error::Invariant(..) => false,
        }
    }
}
