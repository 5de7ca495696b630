//! Kinetic-law evaluation.
//!
//! [`RateEvaluator`] is the seam between network structure and rate
//! arithmetic. The shipped implementations are
//! [`ExpressionEvaluator`], which parses each reaction's law string once
//! and binds species names at evaluation time, and
//! [`MassActionEvaluator`], which needs only per-reaction rate constants.

use std::str::FromStr;

use meval::{Context, ContextProvider, Expr};
use smallvec::SmallVec;

use crate::{EvalError, ReactionId, ReactionNetwork, SpeciesLink};

/// Computes instantaneous reaction rates from per-species amounts.
///
/// `amounts` is indexed by [`SpeciesId`](crate::SpeciesId) and must cover
/// every species in the network the evaluator was built for. A
/// non-finite return value means the law could not be evaluated; callers
/// clamp such results to zero at the point of use.
///
/// ```
/// use simmer_core::{RateEvaluator, ReactionId};
///
/// struct Constant(f64);
/// impl RateEvaluator for Constant {
///     fn rate(&self, _reaction: ReactionId, _amounts: &[f64]) -> f64 {
///         self.0
///     }
/// }
///
/// let law = Constant(2.5);
/// assert_eq!(law.rate(ReactionId(0), &[4.0]), 2.5);
/// ```
pub trait RateEvaluator {
    /// Rate of `reaction` given the current per-species amounts.
    fn rate(&self, reaction: ReactionId, amounts: &[f64]) -> f64;
}

// ── ExpressionEvaluator ────────────────────────────────────────────

/// Binds species names to the amount slice during expression evaluation.
/// Species names shadow the built-in constants of the fallback context.
struct AmountContext<'a> {
    names: &'a [String],
    amounts: &'a [f64],
}

impl ContextProvider for AmountContext<'_> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.amounts[i])
    }
}

/// Evaluates the kinetic-law expression attached to each reaction.
///
/// Laws are parsed once at construction; evaluation binds species names
/// through a context, with the standard math functions and constants
/// available as a fallback. An evaluation failure (for example a law
/// that references an unknown name) yields NaN, which downstream code
/// treats as rate zero.
#[derive(Clone, Debug)]
pub struct ExpressionEvaluator {
    exprs: Vec<Expr>,
    names: Vec<String>,
}

impl ExpressionEvaluator {
    /// Parse every reaction's law in `network`.
    ///
    /// Returns the first parse failure, naming the offending reaction.
    pub fn new(network: &ReactionNetwork) -> Result<Self, EvalError> {
        let mut exprs = Vec::with_capacity(network.reaction_count());
        for reaction in network.reactions() {
            let expr = Expr::from_str(&reaction.law).map_err(|e| EvalError::LawParse {
                reaction: reaction.name.clone(),
                detail: e.to_string(),
            })?;
            exprs.push(expr);
        }
        let names = network.species().iter().map(|s| s.name.clone()).collect();
        Ok(Self { exprs, names })
    }
}

impl RateEvaluator for ExpressionEvaluator {
    fn rate(&self, reaction: ReactionId, amounts: &[f64]) -> f64 {
        let ctx = (
            AmountContext {
                names: &self.names,
                amounts,
            },
            Context::new(),
        );
        self.exprs[reaction.index()]
            .eval_with_context(ctx)
            .unwrap_or(f64::NAN)
    }
}

// ── MassActionEvaluator ────────────────────────────────────────────

/// Stochastic mass-action kinetics: rate constant times the falling
/// factorial of each reactant's amount.
///
/// For a reactant with amount `x` and stoichiometry `m`, the factor is
/// `x * (x - 1) * … * (x - m + 1)`, the number of distinct reactant
/// combinations. Stoichiometries are rounded to the nearest integer
/// order. Useful for models without law strings and as a cross-check in
/// tests.
#[derive(Clone, Debug)]
pub struct MassActionEvaluator {
    constants: Vec<f64>,
    reactants: Vec<SmallVec<[SpeciesLink; 2]>>,
}

impl MassActionEvaluator {
    /// Build from per-reaction rate constants, indexed like the
    /// network's reaction list.
    pub fn new(network: &ReactionNetwork, constants: Vec<f64>) -> Result<Self, EvalError> {
        if constants.len() != network.reaction_count() {
            return Err(EvalError::ConstantCount {
                expected: network.reaction_count(),
                got: constants.len(),
            });
        }
        for (i, &k) in constants.iter().enumerate() {
            if !k.is_finite() {
                return Err(EvalError::InvalidConstant {
                    reaction: ReactionId(i as u32),
                    value: k,
                });
            }
        }
        let reactants = network
            .reactions()
            .iter()
            .map(|r| r.reactants.clone())
            .collect();
        Ok(Self {
            constants,
            reactants,
        })
    }
}

impl RateEvaluator for MassActionEvaluator {
    fn rate(&self, reaction: ReactionId, amounts: &[f64]) -> f64 {
        let mut rate = self.constants[reaction.index()];
        for link in &self.reactants[reaction.index()] {
            let amount = amounts[link.species.index()];
            let order = link.stoichiometry.round() as u64;
            for k in 0..order {
                rate *= amount - k as f64;
            }
        }
        rate
    }
}
