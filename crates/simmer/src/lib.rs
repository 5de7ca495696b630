//! Simmer: discrete-state stochastic analysis of reaction networks.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Simmer sub-crates. For most users, adding `simmer` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use simmer::prelude::*;
//!
//! // One species X decaying at rate 0.4 * X, discretized at the
//! // critical levels {0, 5, 10}.
//! let network = ReactionNetwork::new(
//!     vec![Species::new("X", 10.0)],
//!     vec![Reaction::new("decay", "0.4 * X").reactant(SpeciesId(0), 1.0)],
//! )
//! .unwrap();
//! let props = Properties::new()
//!     .with("criticalLevelX0", "5.0")
//!     .with("criticalLevelX1", "10.0")
//!     .with("transientTimeLimit", "1.0");
//!
//! let evaluator = ExpressionEvaluator::new(&network).unwrap();
//! let axes = simmer::levels::generate(
//!     &network,
//!     &props,
//!     LevelSource::Both,
//!     LevelOrder::default(),
//! );
//! let space = StateSpace::build(&network, &evaluator, axes).unwrap();
//!
//! let result = analyze_transient(&space, &TransientConfig::from_props(&props));
//! let total: f64 = result.probabilities.iter().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `simmer-core` | Network model, IDs, laws, properties |
//! | [`levels`] | `simmer-levels` | Critical-level discretization |
//! | [`ctmc`] | `simmer-ctmc` | State space and probability analyses |
//! | [`ssa`] | `simmer-ssa` | Gillespie simulation engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod driver;

pub use driver::{run_analysis, AnalysisKind, AnalysisOutcome, DriverError};

/// Network model, IDs, kinetic laws, and configuration (`simmer-core`).
pub use simmer_core as model;

/// Critical-level discretization (`simmer-levels`).
///
/// [`levels::generate`] turns a network plus configuration into one
/// strictly increasing level array per species.
pub use simmer_levels as levels;

/// State space and CTMC probability analyses (`simmer-ctmc`).
///
/// [`ctmc::StateSpace`] is the mixed-radix arena;
/// [`ctmc::analyze_transient`] and [`ctmc::analyze_stationary`] compute
/// distributions over it.
pub use simmer_ctmc as ctmc;

/// Gillespie stochastic simulation (`simmer-ssa`).
///
/// [`ssa::GillespieEngine`] samples exact trajectories with pluggable
/// [`ssa::TerminationDecider`]s and [`ssa::TrajectoryWriter`]s.
pub use simmer_ssa as ssa;

/// Common imports for typical Simmer usage.
///
/// ```rust
/// use simmer::prelude::*;
/// ```
pub mod prelude {
    pub use simmer_core::{
        ExpressionEvaluator, MassActionEvaluator, Properties, RateEvaluator, Reaction,
        ReactionId, ReactionNetwork, Species, SpeciesId, SpeciesLink, StateIndex,
    };

    pub use simmer_levels::{CriticalLevels, LevelOrder, LevelSource};

    pub use simmer_ctmc::{
        analyze_leaky_stationary, analyze_stationary, analyze_transient, write_report,
        StateSpace, StationaryConfig, TransientConfig, Transition,
    };

    pub use simmer_ssa::{
        Comparator, GillespieEngine, NullTrajectoryWriter, SsaConfig, TerminationDecider,
        ThresholdDecider, TimeLimitDecider, TrajectoryWriter, TsvTrajectoryWriter,
    };

    pub use crate::driver::{run_analysis, AnalysisKind, AnalysisOutcome, DriverError};
}
