//! Reusable fixture networks.
//!
//! Three small models that cover the shapes the analyzers care about:
//! a birth-death species, a linear degradation chain, and a pair of
//! decoupled species for mixed-radix composition tests.

use simmer_core::{Reaction, ReactionNetwork, Species, SpeciesId};

/// One species `X` starting at 0: constant production at rate `birth`,
/// first-order degradation at rate `death * X`.
pub fn birth_death(birth: f64, death: f64) -> ReactionNetwork {
    let species = vec![Species::new("X", 0.0)];
    let reactions = vec![
        Reaction::new("birth", birth.to_string()).product(SpeciesId(0), 1.0),
        Reaction::new("death", format!("{death} * X")).reactant(SpeciesId(0), 1.0),
    ];
    ReactionNetwork::new(species, reactions).expect("birth-death fixture is valid")
}

/// Linear chain `S0 -> S1 -> … -> S{n-1}` of first-order conversions,
/// all mass starting in `S0`.
///
/// # Panics
/// Panics if `n` is zero.
pub fn degradation_chain(n: usize) -> ReactionNetwork {
    assert!(n > 0);
    let species: Vec<Species> = (0..n)
        .map(|i| Species::new(format!("S{i}"), if i == 0 { 10.0 } else { 0.0 }))
        .collect();
    let reactions: Vec<Reaction> = (0..n.saturating_sub(1))
        .map(|i| {
            Reaction::new(format!("step{i}"), format!("0.5 * S{i}"))
                .reactant(SpeciesId(i as u32), 1.0)
                .product(SpeciesId(i as u32 + 1), 1.0)
        })
        .collect();
    ReactionNetwork::new(species, reactions).expect("degradation-chain fixture is valid")
}

/// Two species with no coupling: each has its own constant birth and
/// first-order death reaction. `A` starts at 1, `B` at 0.
pub fn independent_pair() -> ReactionNetwork {
    let species = vec![Species::new("A", 1.0), Species::new("B", 0.0)];
    let reactions = vec![
        Reaction::new("birth_a", "2.0").product(SpeciesId(0), 1.0),
        Reaction::new("decay_a", "1.5 * A").reactant(SpeciesId(0), 1.0),
        Reaction::new("birth_b", "2.0").product(SpeciesId(1), 1.0),
        Reaction::new("decay_b", "1.5 * B").reactant(SpeciesId(1), 1.0),
    ];
    ReactionNetwork::new(species, reactions).expect("independent-pair fixture is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_death_roles() {
        let net = birth_death(2.0, 0.5);
        let x = net.species_id("X").unwrap();
        assert!(net.is_produced(x));
        assert!(net.is_consumed(x));
    }

    #[test]
    fn degradation_chain_links_neighbours() {
        let net = degradation_chain(3);
        assert_eq!(net.species_count(), 3);
        assert_eq!(net.reaction_count(), 2);
        let s1 = net.species_id("S1").unwrap();
        assert!(net.is_produced(s1));
        assert!(net.is_consumed(s1));
        let s2 = net.species_id("S2").unwrap();
        assert!(net.is_produced(s2));
        assert!(!net.is_consumed(s2));
    }

    #[test]
    fn independent_pair_has_no_cross_dependents() {
        let net = independent_pair();
        let a = net.species_id("A").unwrap();
        assert_eq!(net.dependents(a).len(), 2);
    }
}
