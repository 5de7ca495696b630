//! Ordering policies for raw level candidates.

use crate::LevelError;

/// How raw candidates are turned into an ordered level array.
///
/// Policies are resolved from configuration once, by name; algorithms
/// only ever see the resolved variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelOrder {
    /// Ascending order with exact duplicates removed. The only shipped
    /// policy, configured as `"distinct"`.
    #[default]
    DistinctAscending,
}

impl LevelOrder {
    /// Resolve a configured policy name.
    pub fn from_name(name: &str) -> Result<Self, LevelError> {
        match name {
            "distinct" => Ok(Self::DistinctAscending),
            other => Err(LevelError::UnknownOrder {
                name: other.to_string(),
            }),
        }
    }

    /// Apply the policy to raw candidates.
    pub fn apply(self, mut raw: Vec<f64>) -> Vec<f64> {
        match self {
            Self::DistinctAscending => {
                raw.sort_by(f64::total_cmp);
                raw.dedup();
                raw
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_sorts_and_deduplicates() {
        let order = LevelOrder::DistinctAscending;
        assert_eq!(
            order.apply(vec![10.0, 0.0, 5.0, 10.0, 0.0]),
            vec![0.0, 5.0, 10.0]
        );
    }

    #[test]
    fn distinct_keeps_single_value() {
        assert_eq!(LevelOrder::DistinctAscending.apply(vec![0.0]), vec![0.0]);
    }

    #[test]
    fn unknown_policy_is_a_typed_error() {
        let err = LevelOrder::from_name("shuffled").unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownOrder {
                name: "shuffled".into()
            }
        );
    }

    #[test]
    fn default_policy_is_distinct() {
        assert_eq!(LevelOrder::default(), LevelOrder::DistinctAscending);
    }
}
