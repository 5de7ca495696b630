//! Configuration-driven analysis pipeline.
//!
//! Resolves the requested analysis once from the property map, wires
//! the matching pipeline (levels → state space → analyzer → report, or
//! the simulation engine), and reports failures as a single typed error
//! whose `Display` reads "class: operation: detail".

use std::error::Error;
use std::fmt;
use std::io::{self, Write};

use simmer_core::{EvalError, ExpressionEvaluator, Properties, ReactionNetwork};
use simmer_ctmc::{
    analyze_leaky_stationary, analyze_stationary, analyze_transient, write_report, SpaceError,
    StateSpace, StationaryConfig, StationaryStats, TransientConfig, TransientStats,
};
use simmer_levels::{generate, LevelError, LevelOrder, LevelSource};
use simmer_ssa::{
    GillespieEngine, RunStats, SsaConfig, SsaError, TerminationDecider, TimeLimitDecider,
    TrajectoryWriter,
};

/// The analysis families the driver can run.
///
/// Resolved once from the `analysis` property; algorithms never see the
/// string form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Explicit transient probability propagation over the CTMC.
    #[default]
    Transient,
    /// Embedded-chain stationary distribution.
    Stationary,
    /// Stationary distribution under a uniform per-state escape rate.
    LeakyStationary,
    /// Gillespie trajectory sampling over the raw network.
    Stochastic,
}

impl AnalysisKind {
    /// Resolve the `analysis` property (default `"transient"`).
    pub fn from_props(props: &Properties) -> Result<Self, DriverError> {
        match props.str_or("analysis", "transient") {
            "transient" => Ok(Self::Transient),
            "stationary" => Ok(Self::Stationary),
            "leakyStationary" => Ok(Self::LeakyStationary),
            "stochastic" => Ok(Self::Stochastic),
            other => Err(DriverError::UnknownAnalysis {
                name: other.to_string(),
            }),
        }
    }
}

/// Counters returned by [`run_analysis`], by analysis family.
#[derive(Clone, Debug)]
pub enum AnalysisOutcome {
    /// Step counters from a transient analysis.
    Transient(TransientStats),
    /// Iteration counters from a (leaky) stationary analysis.
    Stationary(StationaryStats),
    /// Per-run counters from a simulation batch.
    Stochastic(Vec<RunStats>),
}

/// Errors from the analysis pipeline.
#[derive(Debug)]
pub enum DriverError {
    /// The `analysis` property names no known analysis.
    UnknownAnalysis {
        /// The unrecognized name.
        name: String,
    },
    /// Level-policy resolution failed.
    Level(LevelError),
    /// A kinetic law failed to parse.
    Eval(EvalError),
    /// State-space construction failed.
    Space(SpaceError),
    /// Simulation setup failed.
    Ssa(SsaError),
    /// Writing the report or trajectory failed.
    Io(io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAnalysis { name } => {
                write!(f, "config: resolving analysis: unknown analysis '{name}'")
            }
            Self::Level(e) => write!(f, "config: resolving critical levels: {e}"),
            Self::Eval(e) => write!(f, "model: parsing kinetic laws: {e}"),
            Self::Space(e) => write!(f, "analysis: building state space: {e}"),
            Self::Ssa(e) => write!(f, "analysis: configuring simulation: {e}"),
            Self::Io(e) => write!(f, "output: writing results: {e}"),
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownAnalysis { .. } => None,
            Self::Level(e) => Some(e),
            Self::Eval(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Ssa(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<LevelError> for DriverError {
    fn from(e: LevelError) -> Self {
        Self::Level(e)
    }
}

impl From<EvalError> for DriverError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

impl From<SpaceError> for DriverError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<SsaError> for DriverError {
    fn from(e: SsaError) -> Self {
        Self::Ssa(e)
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Run the analysis the properties select.
///
/// CTMC analyses write their distribution to `report`; the stochastic
/// analysis streams snapshots to `trajectory` and writes the decider's
/// summary to `report`. Property keys consulted: `analysis`,
/// `levelSource`, `levelOrder`, `escapeRate`, plus the per-analyzer
/// keys documented on the config types.
pub fn run_analysis(
    network: &ReactionNetwork,
    props: &Properties,
    report: &mut dyn Write,
    trajectory: &mut dyn TrajectoryWriter,
) -> Result<AnalysisOutcome, DriverError> {
    let kind = AnalysisKind::from_props(props)?;
    let evaluator = ExpressionEvaluator::new(network)?;

    match kind {
        AnalysisKind::Stochastic => run_stochastic(network, &evaluator, props, report, trajectory),
        AnalysisKind::Transient => {
            let space = build_space(network, &evaluator, props)?;
            let result = analyze_transient(&space, &TransientConfig::from_props(props));
            write_report(network, &space, &result.probabilities, report)?;
            Ok(AnalysisOutcome::Transient(result.stats))
        }
        AnalysisKind::Stationary => {
            let space = build_space(network, &evaluator, props)?;
            let result = analyze_stationary(&space, &StationaryConfig::from_props(props));
            write_report(network, &space, &result.probabilities, report)?;
            Ok(AnalysisOutcome::Stationary(result.stats))
        }
        AnalysisKind::LeakyStationary => {
            let space = build_space(network, &evaluator, props)?;
            let escape = vec![props.f64_or("escapeRate", 0.0); space.state_count()];
            let result =
                analyze_leaky_stationary(&space, &escape, &StationaryConfig::from_props(props));
            write_report(network, &space, &result.probabilities, report)?;
            Ok(AnalysisOutcome::Stationary(result.stats))
        }
    }
}

fn build_space(
    network: &ReactionNetwork,
    evaluator: &ExpressionEvaluator,
    props: &Properties,
) -> Result<StateSpace, DriverError> {
    let source = LevelSource::from_name(props.str_or("levelSource", "both"))?;
    let order = LevelOrder::from_name(props.str_or("levelOrder", "distinct"))?;
    let axes = generate(network, props, source, order);
    Ok(StateSpace::build(network, evaluator, axes)?)
}

fn run_stochastic(
    network: &ReactionNetwork,
    evaluator: &ExpressionEvaluator,
    props: &Properties,
    report: &mut dyn Write,
    trajectory: &mut dyn TrajectoryWriter,
) -> Result<AnalysisOutcome, DriverError> {
    let config = SsaConfig::from_props(props);
    let mut decider = TimeLimitDecider::new(config.time_limit);
    let engine = GillespieEngine::new(network, evaluator, config)?;
    let stats = engine.run_all(&mut decider, trajectory)?;
    decider.report(report)?;
    Ok(AnalysisOutcome::Stochastic(stats))
}
