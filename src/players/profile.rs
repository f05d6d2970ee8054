//! Player statistics: raw career aggregates and the derived rate profile.
//!
//! `RawPlayerStats` mirrors the roster's JSON record. Every field is
//! optional because source records are often incomplete. `PlayerProfile`
//! is the typed result of normalization: missing fields are filled from
//! the placeholder record once, counts become rates, and nothing
//! downstream has to check for presence again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rates::{DismissalKind, DismissalRates, OverFrequencies, RunOutcome, RunRates};
use crate::core::{PlayerKey, OVERS_PER_INNINGS};

/// Run-out rate used for a bowling record with no run-out entry.
pub const BOWLER_RUN_OUT_BASELINE: f64 = 0.005;

/// Over-frequency weight given to every over in a placeholder profile.
pub const PLACEHOLDER_OVER_WEIGHT: f64 = 0.05;

/// Raw career aggregates, as stored in the roster JSON.
///
/// Histogram maps are keyed the way the source data keys them
/// (`"0"`..`"6"` for runs, `"bowled"`, `"runOut"`, ... for dismissals).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlayerStats {
    pub player_initials: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "BowlingSkill")]
    pub bowling_skill: Option<String>,
    pub bat_style: Option<String>,
    #[serde(rename = "BattingHand")]
    pub batting_hand: Option<String>,

    pub bat_run_denominations: Option<BTreeMap<String, f64>>,
    pub bat_out_types: Option<BTreeMap<String, f64>>,
    pub bat_balls_total: Option<f64>,
    pub bat_outs_total: Option<f64>,
    pub runned_out: Option<f64>,
    pub catches: Option<f64>,
    pub matches: Option<f64>,

    pub bowl_run_denominations: Option<BTreeMap<String, f64>>,
    pub bowl_out_types: Option<BTreeMap<String, f64>>,
    pub bowl_balls_total: Option<f64>,
    pub bowl_outs_total: Option<f64>,
    pub bowl_wides: Option<f64>,
    pub bowl_noballs: Option<f64>,

    pub over_numbers: Option<OverNumbers>,

    pub by_batsman: Option<BTreeMap<String, serde_json::Value>>,
    pub by_bowler: Option<BTreeMap<String, serde_json::Value>>,
}

/// Historical overs bowled, in either of the two source shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverNumbers {
    /// One entry per over bowled in a career (over index 0-19).
    List(Vec<u32>),
    /// Already aggregated weight per over, keyed `"0"`..`"19"`.
    PerOver(BTreeMap<String, f64>),
}

fn histogram(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

impl RawPlayerStats {
    /// The complete default record used for unknown players and to fill
    /// gaps in partial ones.
    #[must_use]
    pub fn placeholder(key: &PlayerKey) -> Self {
        let runs = histogram(&[("0", 10.0), ("1", 10.0), ("2", 2.0), ("3", 0.0), ("4", 1.0), ("6", 1.0)]);
        Self {
            player_initials: Some(key.to_string()),
            display_name: Some(key.to_string()),
            bowling_skill: Some("Unknown".to_string()),
            bat_style: Some("Unknown".to_string()),
            batting_hand: Some("Unknown".to_string()),
            bat_run_denominations: Some(runs.clone()),
            bat_out_types: Some(histogram(&[
                ("bowled", 1.0),
                ("caught", 1.0),
                ("runOut", 0.0),
                ("lbw", 0.0),
                ("stumped", 0.0),
                ("hitwicket", 0.0),
            ])),
            bat_balls_total: Some(25.0),
            bat_outs_total: Some(2.0),
            runned_out: Some(0.0),
            catches: Some(0.0),
            matches: Some(1.0),
            bowl_run_denominations: Some(runs),
            bowl_out_types: Some(histogram(&[("bowled", 1.0), ("caught", 1.0), ("lbw", 0.0), ("stumped", 0.0)])),
            bowl_balls_total: Some(25.0),
            bowl_outs_total: Some(1.0),
            bowl_wides: Some(1.0),
            bowl_noballs: Some(0.0),
            over_numbers: Some(OverNumbers::PerOver(
                (0..OVERS_PER_INNINGS)
                    .map(|o| (o.to_string(), PLACEHOLDER_OVER_WEIGHT))
                    .collect(),
            )),
            by_batsman: Some(BTreeMap::new()),
            by_bowler: Some(BTreeMap::new()),
        }
    }

    /// Fill every missing field from `defaults`, keeping present ones.
    ///
    /// Histogram maps that are present keep their entries and only gain
    /// the keys they lack.
    #[must_use]
    pub fn merged_with(&self, defaults: &RawPlayerStats) -> RawPlayerStats {
        fn pick<T: Clone>(own: &Option<T>, fallback: &Option<T>) -> Option<T> {
            own.clone().or_else(|| fallback.clone())
        }

        fn fill_map<V: Clone>(
            own: &Option<BTreeMap<String, V>>,
            fallback: &Option<BTreeMap<String, V>>,
        ) -> Option<BTreeMap<String, V>> {
            match (own, fallback) {
                (Some(own), Some(fallback)) => {
                    let mut merged = own.clone();
                    for (k, v) in fallback {
                        merged.entry(k.clone()).or_insert_with(|| v.clone());
                    }
                    Some(merged)
                }
                _ => pick(own, fallback),
            }
        }

        RawPlayerStats {
            player_initials: pick(&self.player_initials, &defaults.player_initials),
            display_name: pick(&self.display_name, &defaults.display_name),
            bowling_skill: pick(&self.bowling_skill, &defaults.bowling_skill),
            bat_style: pick(&self.bat_style, &defaults.bat_style),
            batting_hand: pick(&self.batting_hand, &defaults.batting_hand),
            bat_run_denominations: fill_map(&self.bat_run_denominations, &defaults.bat_run_denominations),
            bat_out_types: fill_map(&self.bat_out_types, &defaults.bat_out_types),
            bat_balls_total: pick(&self.bat_balls_total, &defaults.bat_balls_total),
            bat_outs_total: pick(&self.bat_outs_total, &defaults.bat_outs_total),
            runned_out: pick(&self.runned_out, &defaults.runned_out),
            catches: pick(&self.catches, &defaults.catches),
            matches: pick(&self.matches, &defaults.matches),
            bowl_run_denominations: fill_map(&self.bowl_run_denominations, &defaults.bowl_run_denominations),
            bowl_out_types: fill_map(&self.bowl_out_types, &defaults.bowl_out_types),
            bowl_balls_total: pick(&self.bowl_balls_total, &defaults.bowl_balls_total),
            bowl_outs_total: pick(&self.bowl_outs_total, &defaults.bowl_outs_total),
            bowl_wides: pick(&self.bowl_wides, &defaults.bowl_wides),
            bowl_noballs: pick(&self.bowl_noballs, &defaults.bowl_noballs),
            over_numbers: pick(&self.over_numbers, &defaults.over_numbers),
            by_batsman: fill_map(&self.by_batsman, &defaults.by_batsman),
            by_bowler: fill_map(&self.by_bowler, &defaults.by_bowler),
        }
    }
}

/// Broad bowling style, from the free-text skill description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BowlingStyle {
    /// Spinners ("Right-arm offbreak", "Slow left-arm orthodox spin", ...).
    Spin,
    /// Seamers ("Right-arm fast", "Left-arm medium", ...).
    Pace,
    /// Some other recognised bowling skill.
    Other,
    /// Does not bowl.
    None,
}

impl BowlingStyle {
    /// Classify a skill description.
    #[must_use]
    pub fn classify(skill: &str) -> Self {
        let skill = skill.trim().to_lowercase();
        if matches!(skill.as_str(), "" | "none" | "na" | "unknown") {
            BowlingStyle::None
        } else if skill.contains("spin") || skill.contains("break") {
            BowlingStyle::Spin
        } else if skill.contains("fast") || skill.contains("medium") {
            BowlingStyle::Pace
        } else {
            BowlingStyle::Other
        }
    }

    /// True for anyone who bowls.
    #[must_use]
    pub fn is_bowler(self) -> bool {
        self != BowlingStyle::None
    }
}

/// Per-ball batting rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattingRates {
    pub runs: RunRates,
    pub dismissals: DismissalRates,
    /// Dismissals per ball faced.
    pub out_rate: f64,
    /// Run-outs per ball faced.
    pub run_out_rate: f64,
}

/// Per-ball bowling rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BowlingRates {
    /// Runs conceded per outcome.
    pub runs: RunRates,
    pub dismissals: DismissalRates,
    /// Wickets per ball bowled.
    pub wicket_rate: f64,
    pub wide_rate: f64,
    pub no_ball_rate: f64,
}

/// Head-to-head history. Carried through but not read by the model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub by_batsman: BTreeMap<String, serde_json::Value>,
    pub by_bowler: BTreeMap<String, serde_json::Value>,
}

/// Normalized player profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub key: PlayerKey,
    pub display_name: String,
    pub bowling_skill: String,
    pub bowling_style: BowlingStyle,
    pub bat_style: String,
    pub batting_hand: String,
    pub batting: BattingRates,
    pub bowling: BowlingRates,
    /// Catches per match.
    pub catch_rate: f64,
    pub over_frequencies: OverFrequencies,
    pub head_to_head: HeadToHead,
    /// True when built without any source record.
    pub is_placeholder: bool,
}

fn divisor(count: Option<f64>, default: f64) -> f64 {
    let value = count.unwrap_or(default);
    if value == 0.0 || !value.is_finite() {
        1.0
    } else {
        value
    }
}

fn rate(count: Option<f64>, divisor: f64) -> f64 {
    let count = count.unwrap_or(0.0);
    if count.is_finite() {
        (count / divisor).max(0.0)
    } else {
        0.0
    }
}

fn run_rates(histogram: &Option<BTreeMap<String, f64>>, divisor: f64) -> RunRates {
    let mut rates = RunRates::default();
    for (key, &count) in histogram.iter().flatten() {
        if let Some(outcome) = RunOutcome::from_key(key) {
            rates[outcome] = rate(Some(count), divisor);
        }
    }
    rates
}

fn dismissal_rates(histogram: &Option<BTreeMap<String, f64>>, divisor: f64) -> (DismissalRates, bool) {
    let mut rates = DismissalRates::default();
    let mut has_run_out = false;
    for (key, &count) in histogram.iter().flatten() {
        if let Some(kind) = DismissalKind::from_key(key) {
            rates[kind] = rate(Some(count), divisor);
            has_run_out |= kind == DismissalKind::RunOut;
        }
    }
    (rates, has_run_out)
}

fn over_frequencies(over_numbers: &Option<OverNumbers>, matches: f64) -> OverFrequencies {
    let mut freq = OverFrequencies::default();
    match over_numbers {
        Some(OverNumbers::List(overs)) => {
            let mut counts = [0u32; OVERS_PER_INNINGS as usize];
            for &over in overs {
                if let Some(count) = counts.get_mut(over as usize) {
                    *count += 1;
                }
            }
            for (slot, count) in freq.0.iter_mut().zip(counts) {
                *slot = f64::from(count) / matches;
            }
        }
        Some(OverNumbers::PerOver(map)) => {
            for (key, &weight) in map {
                let Ok(over) = key.trim().parse::<usize>() else {
                    continue;
                };
                if let Some(slot) = freq.0.get_mut(over) {
                    *slot = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
                }
            }
        }
        None => {}
    }
    freq
}

impl PlayerProfile {
    /// Normalize raw statistics into a profile.
    ///
    /// `None` builds the full placeholder profile. A partial record is
    /// merged with the placeholder first. Zero divisors (balls faced,
    /// balls bowled, matches) are treated as 1. Pure: no RNG, no I/O.
    #[must_use]
    pub fn from_raw(key: &PlayerKey, raw: Option<&RawPlayerStats>) -> Self {
        let placeholder = RawPlayerStats::placeholder(key);
        let is_placeholder = raw.is_none();
        let stats = match raw {
            Some(raw) => raw.merged_with(&placeholder),
            None => placeholder,
        };

        let bat_balls = divisor(stats.bat_balls_total, 0.0);
        let (bat_dismissals, _) = dismissal_rates(&stats.bat_out_types, bat_balls);
        let batting = BattingRates {
            runs: run_rates(&stats.bat_run_denominations, bat_balls),
            dismissals: bat_dismissals,
            out_rate: rate(stats.bat_outs_total, bat_balls),
            run_out_rate: rate(stats.runned_out, bat_balls),
        };

        let bowl_balls = divisor(stats.bowl_balls_total, 0.0);
        let (mut bowl_dismissals, has_run_out) = dismissal_rates(&stats.bowl_out_types, bowl_balls);
        if !has_run_out {
            bowl_dismissals[DismissalKind::RunOut] = BOWLER_RUN_OUT_BASELINE;
        }
        let bowling = BowlingRates {
            runs: run_rates(&stats.bowl_run_denominations, bowl_balls),
            dismissals: bowl_dismissals,
            wicket_rate: rate(stats.bowl_outs_total, bowl_balls),
            wide_rate: rate(stats.bowl_wides, bowl_balls),
            no_ball_rate: rate(stats.bowl_noballs, bowl_balls),
        };

        let matches = divisor(stats.matches, 1.0);
        let bowling_skill = stats.bowling_skill.unwrap_or_default();

        Self {
            key: key.clone(),
            display_name: key.to_string(),
            bowling_style: BowlingStyle::classify(&bowling_skill),
            bowling_skill,
            bat_style: stats.bat_style.unwrap_or_default(),
            batting_hand: stats.batting_hand.unwrap_or_default(),
            batting,
            bowling,
            catch_rate: rate(stats.catches, matches),
            over_frequencies: over_frequencies(&stats.over_numbers, matches),
            head_to_head: HeadToHead {
                by_batsman: stats.by_batsman.unwrap_or_default(),
                by_bowler: stats.by_bowler.unwrap_or_default(),
            },
            is_placeholder,
        }
    }

    /// The placeholder profile for an unknown player.
    #[must_use]
    pub fn placeholder(key: &PlayerKey) -> Self {
        Self::from_raw(key, None)
    }
}
