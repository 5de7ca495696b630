//! Plain-text report of a per-state probability distribution.
//!
//! One `#`-prefixed header line naming the columns, then one
//! space-separated data line per state: the state index, the discretized
//! level value of every species at that state, and the probability.

use std::io::{self, Write};

use simmer_core::{ReactionNetwork, StateIndex};

use crate::StateSpace;

/// Write the distribution `probabilities` over `space` to `out`.
///
/// Column headers are the species names from `network`, in
/// [`SpeciesId`](simmer_core::SpeciesId) order. Values use default float
/// formatting.
///
/// # Panics
/// Panics if `probabilities` does not hold one entry per state, or if
/// `network` does not match the space's axes.
pub fn write_report(
    network: &ReactionNetwork,
    space: &StateSpace,
    probabilities: &[f64],
    out: &mut dyn Write,
) -> io::Result<()> {
    assert_eq!(probabilities.len(), space.state_count());
    assert_eq!(network.species_count(), space.axes().len());

    write!(out, "# state")?;
    for sp in network.species() {
        write!(out, " {}", sp.name)?;
    }
    writeln!(out, " probability")?;

    for (s, prob) in probabilities.iter().enumerate() {
        write!(out, "{s}")?;
        for value in space.level_values(StateIndex(s)) {
            write!(out, " {value}")?;
        }
        writeln!(out, " {prob}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simmer_core::{Reaction, Species, SpeciesId};
    use simmer_levels::CriticalLevels;

    #[test]
    fn report_lists_every_state_with_levels() {
        let net = ReactionNetwork::new(
            vec![Species::new("X", 10.0)],
            vec![Reaction::new("decay", "0.4 * X").reactant(SpeciesId(0), 1.0)],
        )
        .unwrap();
        let eval = simmer_core::ExpressionEvaluator::new(&net).unwrap();
        let axes = vec![CriticalLevels::new(vec![0.0, 5.0, 10.0], 2).unwrap()];
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        let mut out = Vec::new();
        write_report(&net, &space, &[0.25, 0.5, 0.25], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "# state X probability\n\
             0 0 0.25\n\
             1 5 0.5\n\
             2 10 0.25\n"
        );
    }

    #[test]
    fn report_interleaves_two_species_columns() {
        let net = ReactionNetwork::new(
            vec![Species::new("A", 1.0), Species::new("B", 0.0)],
            vec![
                Reaction::new("birth_a", "2.0").product(SpeciesId(0), 1.0),
                Reaction::new("decay_a", "1.5 * A").reactant(SpeciesId(0), 1.0),
                Reaction::new("birth_b", "2.0").product(SpeciesId(1), 1.0),
                Reaction::new("decay_b", "1.5 * B").reactant(SpeciesId(1), 1.0),
            ],
        )
        .unwrap();
        let eval = simmer_core::ExpressionEvaluator::new(&net).unwrap();
        let axes = vec![
            CriticalLevels::new(vec![0.0, 1.0], 1).unwrap(),
            CriticalLevels::new(vec![0.0, 1.0], 0).unwrap(),
        ];
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        let mut out = Vec::new();
        write_report(&net, &space, &[0.25; 4], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# state A B probability"));
        assert_eq!(lines.next(), Some("0 0 0 0.25"));
        assert_eq!(lines.next(), Some("1 1 0 0.25"));
        assert_eq!(lines.next(), Some("2 0 1 0.25"));
        assert_eq!(lines.next(), Some("3 1 1 0.25"));
        assert_eq!(lines.next(), None);
    }
}
