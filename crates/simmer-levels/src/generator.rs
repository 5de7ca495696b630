//! Level-array generation and trimming.
//!
//! The generator runs the finder and order policy for every species,
//! locates the level holding the initial amount, and then trims away
//! levels the species can never reach given its reaction roles.

use simmer_core::{Properties, ReactionNetwork, SpeciesId};

use crate::{find_levels, LevelError, LevelOrder, LevelSource};

/// The discretization of one species.
///
/// `values` is strictly increasing and never empty; `initial` indexes
/// the level that holds the species' initial amount.
#[derive(Clone, Debug, PartialEq)]
pub struct CriticalLevels {
    values: Vec<f64>,
    initial: usize,
}

impl CriticalLevels {
    /// Build a level array, validating the invariants the analyzers
    /// rely on: at least one value, strictly increasing, `initial` in
    /// range.
    pub fn new(values: Vec<f64>, initial: usize) -> Result<Self, LevelError> {
        if values.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, pair) in values.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(LevelError::NotAscending { index: i + 1 });
            }
        }
        if initial >= values.len() {
            return Err(LevelError::InitialOutOfRange {
                initial,
                len: values.len(),
            });
        }
        Ok(Self { values, initial })
    }

    /// The level values, ascending.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a level array holds at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the level holding the initial amount.
    pub fn initial_index(&self) -> usize {
        self.initial
    }

    /// Value of the level holding the initial amount.
    pub fn initial_value(&self) -> f64 {
        self.values[self.initial]
    }

    /// Value at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }
}

/// Generate the discretization for every species in the network.
///
/// Returned arrays are indexed by [`SpeciesId`]. Infallible once the
/// source and order policies are resolved: every species has at least
/// the sentinel level, and trimming never empties an array.
pub fn generate(
    network: &ReactionNetwork,
    props: &Properties,
    source: LevelSource,
    order: LevelOrder,
) -> Vec<CriticalLevels> {
    (0..network.species_count())
        .map(|i| {
            let id = SpeciesId(i as u32);
            let raw = find_levels(network, id, props, source);
            let values = order.apply(raw);
            trim(network, id, values)
        })
        .collect()
}

/// Locate the initial index and drop unreachable levels.
///
/// A species no reaction produces can never climb above its starting
/// level; one no reaction consumes can never fall below it; one with
/// neither role is pinned to the starting level alone.
fn trim(network: &ReactionNetwork, id: SpeciesId, mut values: Vec<f64>) -> CriticalLevels {
    let initial_amount = network.species()[id.index()].initial_amount;

    // Largest index whose value does not exceed the initial amount.
    // The 0.0 sentinel guarantees a hit for any non-negative amount.
    let mut initial = 0;
    for (i, &v) in values.iter().enumerate() {
        if v <= initial_amount {
            initial = i;
        }
    }

    let produced = network.is_produced(id);
    let consumed = network.is_consumed(id);
    if !produced && !consumed {
        let pinned = values[initial];
        values.clear();
        values.push(pinned);
        initial = 0;
    } else if consumed && !produced {
        values.truncate(initial + 1);
    } else if produced && !consumed {
        values.drain(..initial);
        initial = 0;
    }

    CriticalLevels { values, initial }
}
