//! Cycle detection over a single trajectory.
//!
//! Iterating a transition from a start state traces a rho-shaped path: a
//! possibly empty tail of transient states feeding into a cycle that then
//! repeats forever. [`detect`] walks the path once, recording the
//! position at which each state first appeared, and splits the history at
//! the first recorded position of the state that terminated the walk.
//! Since the walk stops at the first repeat, the history is
//! duplicate-free and that position is the earliest split consistent with
//! the cycle wrapping back onto itself.

use std::collections::HashMap;

use crate::{transition::Transition, Error, State};

/// One trajectory, split into its transient prefix and its cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orbit {
    /// States walked before entering the cycle, in visit order.
    pub tail: Vec<State>,
    /// The cycle itself; the transition maps its last state to its first.
    pub cycle: Vec<State>,
}

impl Orbit {
    /// Length of the cycle this trajectory falls into.
    pub fn period(&self) -> u64 {
        self.cycle.len() as u64
    }
}

/// Walk from `start` until a state repeats, then split the history into
/// tail and cycle.
///
/// Start 0 is a fixed point under every variant and is returned as the
/// period-1 cycle `[0]` without consulting the transition at all.
pub fn detect<T: Transition>(f: &T, start: State) -> Result<Orbit, Error> {
    if start == 0 {
        return Ok(Orbit {
            tail: vec![],
            cycle: vec![0],
        });
    }
    let mut visited = Vec::new();
    let mut first_position = HashMap::new();
    let mut state = start;
    let entry = loop {
        if let Some(&position) = first_position.get(&state) {
            break position;
        }
        first_position.insert(state, visited.len());
        visited.push(state);
        state = f.next(state)?;
    };
    let cycle = visited.split_off(entry);
    let orbit = Orbit {
        tail: visited,
        cycle,
    };
    // The split must account for every state of the walk exactly once.
    if orbit.tail.len() + orbit.cycle.len() != first_position.len() {
        return Err(Error::Invariant(
            "orbit",
            "tail and cycle do not cover the walk",
        ));
    }
    Ok(orbit)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transition::{FibonacciTransition, ModuloTransition};

    #[test]
    fn start_zero_is_period_one_by_convention() {
        let f = ModuloTransition::new(37).unwrap();
        let orbit = detect(&f, 0).unwrap();
        assert_eq!(orbit.tail, Vec::<State>::new());
        assert_eq!(orbit.cycle, vec![0]);
        assert_eq!(orbit.period(), 1);
    }

    #[test]
    fn rho_shaped_trajectory_splits_at_the_cycle_entry() {
        // 5 -> 10 -> 8 -> 4 -> 8 -> ...
        let f = ModuloTransition::new(12).unwrap();
        let orbit = detect(&f, 5).unwrap();
        assert_eq!(orbit.tail, vec![5, 10]);
        assert_eq!(orbit.cycle, vec![8, 4]);
    }

    #[test]
    fn pure_cycle_has_an_empty_tail() {
        // 1 -> 2 -> 4 -> 3 -> 1
        let f = ModuloTransition::new(5).unwrap();
        let orbit = detect(&f, 1).unwrap();
        assert_eq!(orbit.tail, Vec::<State>::new());
        assert_eq!(orbit.cycle, vec![1, 2, 4, 3]);
    }

    #[test]
    fn trajectory_draining_into_zero_ends_in_the_fixed_point() {
        // 3 -> 6 -> 4 -> 0 -> 0 -> ...
        let f = ModuloTransition::new(8).unwrap();
        let orbit = detect(&f, 3).unwrap();
        assert_eq!(orbit.tail, vec![3, 6, 4]);
        assert_eq!(orbit.cycle, vec![0]);
        assert_eq!(orbit.period(), 1);
    }

    #[test]
    fn nonzero_fixed_point_is_a_singleton_cycle() {
        // All-ones state under a single top tap maps to itself.
        let f = FibonacciTransition::new(3, 0b100).unwrap();
        let orbit = detect(&f, 7).unwrap();
        assert_eq!(orbit.tail, Vec::<State>::new());
        assert_eq!(orbit.cycle, vec![7]);
    }

    #[test]
    fn cycle_wraps_back_onto_its_first_state() {
        let f = FibonacciTransition::new(4, 0b1001).unwrap();
        let orbit = detect(&f, 1).unwrap();
        assert_eq!(orbit.cycle.len(), 15);
        let last = *orbit.cycle.last().unwrap();
        assert_eq!(f.next(last).unwrap(), orbit.cycle[0]);
    }
}
