//! Core types for the Simmer reaction-network analysis toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the network model (species, reactions, kinetic laws), strongly-typed
//! IDs, the rate-evaluation and trajectory-sink seams, the string
//! property map used for run configuration, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod id;
mod law;
mod model;
mod props;
mod trace;

pub use error::{EvalError, ModelError};
pub use id::{ReactionId, SpeciesId, StateIndex};
pub use law::{ExpressionEvaluator, MassActionEvaluator, RateEvaluator};
pub use model::{LinkList, Reaction, ReactionNetwork, Species, SpeciesLink};
pub use props::Properties;
pub use trace::TrajectoryWriter;
