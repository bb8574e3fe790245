//! Exhaustive enumeration over configurations and start states.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    orbit::detect,
    transition::{FibonacciTransition, ModuloTransition, Transition},
    Error, State,
};

/// Disjoint-cycle decomposition of the sweep range under one transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Partition {
    max_state: State,
    cycles: Vec<Vec<State>>,
    periods: HashMap<State, u64>,
}

impl Partition {
    /// The discovered cycles, in discovery order. Each visited state
    /// appears on exactly one of them.
    pub fn cycles(&self) -> &[Vec<State>] {
        &self.cycles
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    pub fn max_state(&self) -> State {
        self.max_state
    }

    /// Length of the cycle `state` eventually falls into. Known for
    /// every state the enumeration walked, tail-only states included;
    /// state 0 is period 1 by convention.
    pub fn period_of(&self, state: State) -> Option<u64> {
        if state == 0 {
            return Some(1);
        }
        self.periods.get(&state).copied()
    }

    /// Longest cycle in the partition.
    pub fn max_period(&self) -> u64 {
        self.cycles
            .iter()
            .map(|cycle| cycle.len() as u64)
            .max()
            .unwrap_or(0)
    }

    /// A configuration is perfect when its whole sweep range lies on a
    /// single cycle.
    pub fn is_perfect(&self) -> bool {
        self.cycles.len() == 1
    }
}

/// Partition start states `1..=max_state` into disjoint cycles.
///
/// Start states already claimed by an earlier orbit are skipped with an
/// O(1) membership test. A walk whose cycle is new contributes it to the
/// partition; a walk that merely found a longer tail into a known cycle
/// contributes nothing but its tail states. Either way every state on
/// the walk is associated with the length of the cycle it leads into.
pub fn partition<T: Transition>(f: &T, max_state: State) -> Result<Partition, Error> {
    let mut visited = HashSet::new();
    let mut cycles = Vec::new();
    let mut periods = HashMap::new();
    for start in 1..=max_state {
        if visited.contains(&start) {
            continue;
        }
        let orbit = detect(f, start)?;
        let period = orbit.period();
        // Any previously seen cycle state implies the whole cycle is on
        // record already, so probing the entry state is enough.
        if !visited.contains(&orbit.cycle[0]) {
            for &state in &orbit.cycle {
                visited.insert(state);
                periods.insert(state, period);
            }
            cycles.push(orbit.cycle);
        }
        for &state in &orbit.tail {
            if visited.insert(state) {
                periods.insert(state, period);
            }
        }
    }
    Ok(Partition {
        max_state,
        cycles,
        periods,
    })
}

/// Tap masks at one register width whose mandatory first-register tap is
/// set. Callers validate the register count; widths outside `1..=63`
/// have no domain.
pub fn tap_domain(register_count: u32) -> Range<State> {
    let low = 1 << (register_count - 1);
    low..low << 1
}

/// One Fibonacci configuration and its decomposition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TapRun {
    pub register_count: u32,
    pub taps: State,
    pub partition: Partition,
}

/// One modulus and its decomposition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModulusRun {
    pub modulus: State,
    pub partition: Partition,
}

/// Enumerate every valid tap mask at one register width over start
/// states `1..=2^register_count - 1`. Configurations share no state, so
/// the tap domain fans out across the rayon pool.
pub fn sweep_registers(register_count: u32) -> Result<Vec<TapRun>, Error> {
    if register_count == 0 || register_count > 63 {
        return Err(Error::InvalidRegisterCount(register_count));
    }
    let max_state = (1 << register_count) - 1;
    tap_domain(register_count)
        .into_par_iter()
        .map(|taps| {
            let f = FibonacciTransition::new(register_count, taps)?;
            Ok(TapRun {
                register_count,
                taps,
                partition: partition(&f, max_state)?,
            })
        })
        .collect()
}

/// Enumerate moduli `1..=size` over start states `1..=size`.
pub fn sweep_moduli(size: State) -> Result<Vec<ModulusRun>, Error> {
    (1..size + 1)
        .into_par_iter()
        .map(|modulus| {
            let f = ModuloTransition::new(modulus)?;
            Ok(ModulusRun {
                modulus,
                partition: partition(&f, size)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_domain_keeps_the_mandatory_bit() {
        assert_eq!(tap_domain(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(tap_domain(3).collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        for taps in tap_domain(7) {
            assert!(taps & (1 << 6) != 0);
        }
    }

    #[test]
    fn longer_tails_into_a_known_cycle_add_no_duplicate() {
        // Modulus 8 drains every start into the fixed point 0; the cycle
        // [0] must be recorded once despite four disjoint tails.
        let f = ModuloTransition::new(8).unwrap();
        let partition = partition(&f, 7).unwrap();
        assert_eq!(partition.cycle_count(), 1);
        assert_eq!(partition.cycles()[0], vec![0]);
        for start in 1..=7 {
            assert_eq!(partition.period_of(start), Some(1));
        }
    }

    #[test]
    fn tail_states_report_the_period_of_their_cycle() {
        // 5 and 10 are tail-only; 8 and 4 lie on the cycle.
        let f = ModuloTransition::new(12).unwrap();
        let partition = partition(&f, 12).unwrap();
        assert_eq!(partition.period_of(5), Some(2));
        assert_eq!(partition.period_of(10), Some(2));
        assert_eq!(partition.period_of(8), Some(2));
    }

    #[test]
    fn out_of_range_register_counts_are_excluded() {
        assert!(sweep_registers(0).unwrap_err().is_invalid_configuration());
        assert!(sweep_registers(64).unwrap_err().is_invalid_configuration());
    }
}
