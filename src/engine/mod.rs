//! Match simulation: innings state, single deliveries, bowler rotation and
//! the match lifecycle.
//!
//! `MatchEngine` is the entry point. Everything else here is the state it
//! owns and the steps it runs for each ball.

pub mod event;
pub mod innings;
pub mod ball;
pub mod rotation;
pub mod result;
pub mod summary;
pub mod snapshot;
pub mod match_engine;

pub use event::{BallEvent, Extra, ExtraKind, WicketDetail};
pub use innings::{BattingStatus, BattingTracker, BowlingTracker, Extras, Innings, UNUSED_BOWLER_ECONOMY};
pub use ball::{sample_outcome, DeliveryOutcome, EXTRA_PENALTY};
pub use rotation::{bowler_score, select_bowler};
pub use result::{Margin, MatchResult, Winner};
pub use summary::MatchSummary;
pub use snapshot::MatchSnapshot;
pub use match_engine::{MatchEngine, MatchStatus, StepEvent, StepOutcome, TossDecision, TossResult};
