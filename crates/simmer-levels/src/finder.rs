//! Candidate-level collection.
//!
//! Raw candidates come from the property map: for a species named `X`,
//! the keys `criticalLevelX0`, `criticalLevelX1`, … are read in order
//! until the first missing index. The floor sentinel `0.0` is always
//! seeded so every species ends up with at least one level.

use simmer_core::{Properties, ReactionNetwork, SpeciesId};

use crate::LevelError;

/// Where candidate critical levels come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelSource {
    /// Numbered configuration keys only.
    Properties,
    /// Structural analysis only. The analysis is a hook for now and
    /// contributes no candidates.
    Calculated,
    /// Union of both sources.
    #[default]
    Both,
}

impl LevelSource {
    /// Resolve a configured source name.
    pub fn from_name(name: &str) -> Result<Self, LevelError> {
        match name {
            "properties" => Ok(Self::Properties),
            "calculated" => Ok(Self::Calculated),
            "both" => Ok(Self::Both),
            other => Err(LevelError::UnknownSource {
                name: other.to_string(),
            }),
        }
    }
}

/// Collect raw level candidates for one species.
///
/// The scan stops at the first missing numbered key. A key that exists
/// but fails to parse, or parses to a non-finite value, contributes no
/// candidate; the scan keeps going. Duplicates and ordering are the
/// order policy's concern, not handled here.
///
/// # Panics
/// Panics if `species` did not come from `network`.
pub fn find_levels(
    network: &ReactionNetwork,
    species: SpeciesId,
    props: &Properties,
    source: LevelSource,
) -> Vec<f64> {
    let mut raw = vec![0.0];
    if matches!(source, LevelSource::Properties | LevelSource::Both) {
        let name = network.species_name(species);
        for k in 0u32.. {
            let key = format!("criticalLevel{name}{k}");
            match props.get(&key) {
                Some(value) => {
                    if let Ok(v) = value.trim().parse::<f64>() {
                        if v.is_finite() {
                            raw.push(v);
                        }
                    }
                }
                None => break,
            }
        }
    }
    if matches!(source, LevelSource::Calculated | LevelSource::Both) {
        raw.extend(calculated_levels(network, species));
    }
    raw
}

/// Structural-analysis candidate source. Yields nothing.
fn calculated_levels(_network: &ReactionNetwork, _species: SpeciesId) -> Vec<f64> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use simmer_core::Species;

    fn one_species_network() -> ReactionNetwork {
        ReactionNetwork::new(vec![Species::new("X", 10.0)], vec![]).unwrap()
    }

    #[test]
    fn sentinel_is_always_present() {
        let net = one_species_network();
        let raw = find_levels(&net, SpeciesId(0), &Properties::new(), LevelSource::Both);
        assert_eq!(raw, vec![0.0]);
    }

    #[test]
    fn numbered_keys_are_read_in_order() {
        let net = one_species_network();
        let props = Properties::new()
            .with("criticalLevelX0", "5.0")
            .with("criticalLevelX1", "10.0");
        let raw = find_levels(&net, SpeciesId(0), &props, LevelSource::Properties);
        assert_eq!(raw, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn scan_stops_at_first_gap() {
        let net = one_species_network();
        let props = Properties::new()
            .with("criticalLevelX0", "5.0")
            .with("criticalLevelX2", "99.0");
        let raw = find_levels(&net, SpeciesId(0), &props, LevelSource::Properties);
        assert_eq!(raw, vec![0.0, 5.0]);
    }

    #[test]
    fn malformed_value_is_skipped_without_stopping() {
        let net = one_species_network();
        let props = Properties::new()
            .with("criticalLevelX0", "plenty")
            .with("criticalLevelX1", "10.0");
        let raw = find_levels(&net, SpeciesId(0), &props, LevelSource::Properties);
        assert_eq!(raw, vec![0.0, 10.0]);
    }

    #[test]
    fn non_finite_value_is_skipped() {
        let net = one_species_network();
        let props = Properties::new()
            .with("criticalLevelX0", "inf")
            .with("criticalLevelX1", "3.0");
        let raw = find_levels(&net, SpeciesId(0), &props, LevelSource::Properties);
        assert_eq!(raw, vec![0.0, 3.0]);
    }

    #[test]
    fn calculated_source_contributes_nothing() {
        let net = one_species_network();
        let props = Properties::new().with("criticalLevelX0", "5.0");
        let raw = find_levels(&net, SpeciesId(0), &props, LevelSource::Calculated);
        assert_eq!(raw, vec![0.0]);
    }

    #[test]
    fn source_names_resolve() {
        assert_eq!(
            LevelSource::from_name("properties").unwrap(),
            LevelSource::Properties
        );
        assert_eq!(LevelSource::from_name("both").unwrap(), LevelSource::Both);
        let err = LevelSource::from_name("guesswork").unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownSource {
                name: "guesswork".into()
            }
        );
    }
}
