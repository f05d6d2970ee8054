//! Outcome model: innings phases, delivery context, and the probability
//! model that turns two player profiles into a per-ball distribution.

pub mod phase;
pub mod context;
pub mod probability;

pub use phase::Phase;
pub use context::{DeliveryContext, Target};
pub use probability::{
    OutcomeDistribution, ProbabilityModel, MAX_EXTRAS_RATE, MAX_WICKET_PROBABILITY,
    MIN_WICKET_PROBABILITY,
};
