//! Strongly-typed identifiers used throughout the Simmer workspace.

use std::fmt;

/// Identifies a species within a reaction network.
///
/// Species are registered at network construction and assigned sequential
/// IDs. `SpeciesId(n)` corresponds to the n-th species in the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    /// The species' position in the network's species list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpeciesId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a reaction within a reaction network.
///
/// `ReactionId(n)` corresponds to the n-th reaction in the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactionId(pub u32);

impl ReactionId {
    /// The reaction's position in the network's reaction list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ReactionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a discrete state in a state-space arena.
///
/// States live in a flat `Vec` and refer to each other by index, so a
/// `StateIndex` is only meaningful together with the space that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(pub usize);

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StateIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(SpeciesId(3).to_string(), "3");
        assert_eq!(ReactionId(7).to_string(), "7");
        assert_eq!(StateIndex(42).to_string(), "42");
    }

    #[test]
    fn ids_roundtrip_through_from() {
        assert_eq!(SpeciesId::from(5), SpeciesId(5));
        assert_eq!(ReactionId::from(9), ReactionId(9));
        assert_eq!(StateIndex::from(11), StateIndex(11));
    }

    #[test]
    fn index_matches_raw_value() {
        assert_eq!(SpeciesId(4).index(), 4);
        assert_eq!(ReactionId(0).index(), 0);
    }
}
