use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

/// States from `start` onwards repeat every `length` steps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cycle {
    pub start: usize,
    pub length: usize,
}

impl Cycle {
    /// Earliest step with the same state as `step`.
    pub fn normalize(&self, step: usize) -> usize {
        if step < self.start {
            return step;
        }
        self.start + (step - self.start) % self.length
    }
}

/// Every state from the initial one up to a target step, or up to the first
/// repeat if that comes earlier.
#[derive(Debug, Clone)]
pub struct History<S> {
    states: Vec<S>,
    cycle: Option<Cycle>,
}

impl<S> History<S> {
    pub fn record<K: Hash + Eq>(
        initial: S,
        mut step: impl FnMut(&S) -> S,
        mut fingerprint: impl FnMut(&S) -> K,
        target: usize,
    ) -> Self {
        let mut first_seen: HashMap<K, usize> = HashMap::new();
        let mut states = vec![initial];

        loop {
            let index = states.len() - 1;
            let key = fingerprint(&states[index]);
            if let Some(&start) = first_seen.get(&key) {
                states.pop();
                let cycle = Cycle {
                    start,
                    length: index - start,
                };
                debug!(?cycle, "state repeated");
                return Self {
                    states,
                    cycle: Some(cycle),
                };
            }
            if index == target {
                return Self {
                    states,
                    cycle: None,
                };
            }
            first_seen.insert(key, index);
            let next = step(&states[index]);
            states.push(next);
        }
    }

    pub fn cycle(&self) -> Option<Cycle> {
        self.cycle
    }

    /// Number of distinct states recorded.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn index_of(&self, step: usize) -> Option<usize> {
        if step < self.states.len() {
            return Some(step);
        }
        self.cycle.map(|cycle| cycle.normalize(step))
    }

    pub fn state_at(&self, step: usize) -> Option<&S> {
        self.index_of(step).map(|i| &self.states[i])
    }

    pub fn into_state_at(mut self, step: usize) -> Option<S> {
        let i = self.index_of(step)?;
        Some(self.states.swap_remove(i))
    }
}

/// The state reached after applying `step` `target` times, skipping ahead as
/// soon as a state repeats.
pub fn state_after<S: Clone + Hash + Eq>(
    initial: S,
    step: impl FnMut(&S) -> S,
    target: usize,
) -> S {
    state_after_by(initial, step, S::clone, target)
}

/// Like [`state_after`], but two states count as equal when their
/// fingerprints are.
pub fn state_after_by<S, K: Hash + Eq>(
    initial: S,
    step: impl FnMut(&S) -> S,
    fingerprint: impl FnMut(&S) -> K,
    target: usize,
) -> S {
    let mut history = History::record(initial, step, fingerprint, target);
    // A finished recording always reaches `target` or a cycle.
    let i = history.index_of(target).unwrap_or(history.states.len() - 1);
    history.states.swap_remove(i)
}

/// Steps from `initial` until some state repeats. Only terminates for
/// sequences that eventually cycle.
pub fn find_cycle<S: Clone + Hash + Eq>(initial: S, mut step: impl FnMut(&S) -> S) -> Cycle {
    let mut first_seen: HashMap<S, usize> = HashMap::new();
    let mut current = initial;
    let mut index = 0;

    loop {
        if let Some(&start) = first_seen.get(&current) {
            return Cycle {
                start,
                length: index - start,
            };
        }
        let next = step(&current);
        first_seen.insert(current, index);
        current = next;
        index += 1;
    }
}
