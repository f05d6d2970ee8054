//! Ball events: the immutable record of one delivery.

use serde::{Deserialize, Serialize};

use crate::core::PlayerKey;
use crate::players::DismissalKind;

/// Kind of illegal delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraKind {
    Wide,
    NoBall,
}

impl std::fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtraKind::Wide => f.write_str("Wide"),
            ExtraKind::NoBall => f.write_str("No ball"),
        }
    }
}

/// Extra runs conceded on an illegal delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub kind: ExtraKind,
    /// Penalty runs, not counting runs off the bat.
    pub runs: u32,
}

/// How a wicket fell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WicketDetail {
    pub kind: DismissalKind,
    pub batsman: PlayerKey,
    pub bowler: PlayerKey,
    /// False for run-outs.
    pub bowler_credit: bool,
    /// Catcher, for caught dismissals.
    pub fielder: Option<PlayerKey>,
}

impl WicketDetail {
    /// Scorecard dismissal text, e.g. `"c Jadeja b Bumrah"`.
    #[must_use]
    pub fn how_out(&self) -> String {
        match self.kind {
            DismissalKind::Bowled => format!("b {}", self.bowler),
            DismissalKind::Caught => match &self.fielder {
                Some(fielder) if *fielder == self.bowler => format!("c & b {}", self.bowler),
                Some(fielder) => format!("c {} b {}", fielder, self.bowler),
                None => format!("c ? b {}", self.bowler),
            },
            DismissalKind::Lbw => format!("lbw b {}", self.bowler),
            DismissalKind::Stumped => format!("st b {}", self.bowler),
            DismissalKind::RunOut => "run out".to_string(),
            DismissalKind::HitWicket => format!("hit wicket b {}", self.bowler),
        }
    }
}

/// One delivery, as logged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    /// 1 or 2.
    pub innings: u8,
    /// Legal balls bowled in the innings after this delivery.
    pub ball_number: u32,
    /// Completed overs before this delivery.
    pub over: u32,
    /// Legal ball within the over (1-6); for an illegal delivery, the
    /// legal balls already bowled in the over.
    pub ball_in_over: u32,

    // === Participants ===
    pub striker: PlayerKey,
    pub non_striker: Option<PlayerKey>,
    pub bowler: PlayerKey,

    // === Outcome ===
    /// Runs off the bat.
    pub runs: u32,
    pub extra: Option<Extra>,
    pub wicket: Option<WicketDetail>,

    // === Snapshot after the ball ===
    pub score_after: u32,
    pub wickets_after: u8,

    pub commentary: String,
}

impl BallEvent {
    /// Position label, e.g. `"4.3"`.
    #[must_use]
    pub fn over_label(&self) -> String {
        format!("{}.{}", self.over, self.ball_in_over)
    }

    /// False for wides and no-balls.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.extra.is_none()
    }

    /// Runs off the bat plus extras.
    #[must_use]
    pub fn total_runs(&self) -> u32 {
        self.runs + self.extra.map_or(0, |e| e.runs)
    }

    /// True if a wicket fell.
    #[must_use]
    pub fn is_wicket(&self) -> bool {
        self.wicket.is_some()
    }

    /// True for the sixth legal ball of an over.
    #[must_use]
    pub fn completes_over(&self) -> bool {
        self.is_legal() && self.ball_in_over == 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(kind: DismissalKind, fielder: Option<&str>) -> WicketDetail {
        WicketDetail {
            kind,
            batsman: PlayerKey::new("BAT"),
            bowler: PlayerKey::new("JB"),
            bowler_credit: kind.bowler_credit(),
            fielder: fielder.map(PlayerKey::new),
        }
    }

    #[test]
    fn test_how_out() {
        assert_eq!(detail(DismissalKind::Bowled, None).how_out(), "b JB");
        assert_eq!(detail(DismissalKind::Caught, Some("RJ")).how_out(), "c RJ b JB");
        assert_eq!(detail(DismissalKind::Caught, Some("JB")).how_out(), "c & b JB");
        assert_eq!(detail(DismissalKind::Lbw, None).how_out(), "lbw b JB");
        assert_eq!(detail(DismissalKind::Stumped, None).how_out(), "st b JB");
        assert_eq!(detail(DismissalKind::RunOut, None).how_out(), "run out");
        assert_eq!(detail(DismissalKind::HitWicket, None).how_out(), "hit wicket b JB");
    }

    #[test]
    fn test_event_helpers() {
        let event = BallEvent {
            innings: 1,
            ball_number: 12,
            over: 1,
            ball_in_over: 6,
            striker: PlayerKey::new("A"),
            non_striker: Some(PlayerKey::new("B")),
            bowler: PlayerKey::new("C"),
            runs: 4,
            extra: None,
            wicket: None,
            score_after: 20,
            wickets_after: 0,
            commentary: String::new(),
        };
        assert_eq!(event.over_label(), "1.6");
        assert!(event.completes_over());
        assert_eq!(event.total_runs(), 4);

        let no_ball = BallEvent {
            extra: Some(Extra {
                kind: ExtraKind::NoBall,
                runs: 1,
            }),
            ..event
        };
        assert!(!no_ball.is_legal());
        assert!(!no_ball.completes_over());
        assert_eq!(no_ball.total_runs(), 5);
    }
}
