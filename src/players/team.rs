//! A team as fielded in a match: profiles, batting order, bowling pool.
//!
//! Built once from a `RosterProvider` and immutable afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::profile::PlayerProfile;
use super::roster::{RosterProvider, TeamRecord};
use crate::core::{
    Diagnostic, Diagnostics, LookupError, PlayerKey, SimError, TeamCode, DEATH_OVERS_START,
    MAX_BALLS_PER_BOWLER, MAX_LEGAL_BALLS, MIDDLE_OVERS_START, OVERS_PER_INNINGS,
};
use crate::model::Phase;

/// Bowlers needed to get through an innings under the per-bowler cap.
pub const MIN_BOWLING_POOL: usize = (MAX_LEGAL_BALLS / MAX_BALLS_PER_BOWLER) as usize;

/// Display metadata passed through from the team record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub full_name: String,
    pub logo: Option<String>,
    pub color_primary: Option<String>,
}

/// Bowlers ranked by how often they bowl in each phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseBowlers {
    pub powerplay: Vec<PlayerKey>,
    pub middle: Vec<PlayerKey>,
    pub death: Vec<PlayerKey>,
}

impl PhaseBowlers {
    /// Priority list for a phase.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &[PlayerKey] {
        match phase {
            Phase::Powerplay => &self.powerplay,
            Phase::Middle => &self.middle,
            Phase::Death => &self.death,
        }
    }
}

/// A team ready to play.
#[derive(Clone, Debug)]
pub struct Team {
    pub code: TeamCode,
    pub info: TeamInfo,
    /// Every player in roster order.
    pub players: Vec<PlayerKey>,
    /// Batting order.
    pub batting_order: Vec<PlayerKey>,
    /// Players who may bowl, in roster order.
    pub bowlers: Vec<PlayerKey>,
    pub phase_bowlers: PhaseBowlers,
    profiles: FxHashMap<PlayerKey, PlayerProfile>,
}

impl Team {
    /// Load a team and its player profiles.
    ///
    /// Unknown or unreadable players get placeholder profiles and a
    /// diagnostic. Fails only if the team is unknown or has no players.
    pub fn load(
        provider: &dyn RosterProvider,
        code: &TeamCode,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, SimError> {
        let record = provider.team(code)?;

        let mut players = Vec::with_capacity(record.players.len());
        let mut profiles = FxHashMap::default();

        for entry in &record.players {
            let key = PlayerKey::new(entry);
            if key.is_empty() {
                diagnostics.warn(Diagnostic::BlankRosterEntry { team: code.clone() });
                continue;
            }
            if profiles.contains_key(&key) {
                diagnostics.warn(Diagnostic::DuplicateRosterEntry {
                    team: code.clone(),
                    player: key,
                });
                continue;
            }

            let raw = match provider.player_stats(&key) {
                Ok(raw) => Some(raw),
                Err(LookupError::NotFound) => {
                    diagnostics.warn(Diagnostic::UnknownPlayer {
                        team: code.clone(),
                        player: key.clone(),
                    });
                    None
                }
                Err(LookupError::Malformed(reason)) => {
                    diagnostics.warn(Diagnostic::MalformedStats {
                        team: code.clone(),
                        player: key.clone(),
                        reason,
                    });
                    None
                }
            };

            profiles.insert(key.clone(), PlayerProfile::from_raw(&key, raw.as_ref()));
            players.push(key);
        }

        if players.is_empty() {
            return Err(SimError::EmptyRoster(code.clone()));
        }

        Ok(Self::assemble(code.clone(), &record, players, profiles, diagnostics))
    }

    fn assemble(
        code: TeamCode,
        record: &TeamRecord,
        players: Vec<PlayerKey>,
        profiles: FxHashMap<PlayerKey, PlayerProfile>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut batting_order: Vec<PlayerKey> = players
            .iter()
            .filter(|p| profiles.contains_key(*p))
            .cloned()
            .collect();
        if batting_order.is_empty() {
            batting_order = profiles.keys().cloned().collect();
            batting_order.sort();
        }

        let mut bowlers: Vec<PlayerKey> = players
            .iter()
            .filter(|p| profiles.get(*p).is_some_and(|pr| pr.bowling_style.is_bowler()))
            .cloned()
            .collect();
        if bowlers.is_empty() {
            bowlers = players.clone();
        } else if bowlers.len() < MIN_BOWLING_POOL {
            let needed = MIN_BOWLING_POOL - bowlers.len();
            let added: Vec<PlayerKey> = players
                .iter()
                .filter(|p| !bowlers.contains(p))
                .take(needed)
                .cloned()
                .collect();
            if !added.is_empty() {
                diagnostics.warn(Diagnostic::PartTimeBowlers {
                    team: code.clone(),
                    added: added.clone(),
                });
                bowlers.extend(added);
            }
        }

        let rank = |overs: std::ops::Range<u32>| -> Vec<PlayerKey> {
            let mut ranked: Vec<(PlayerKey, f64)> = bowlers
                .iter()
                .map(|b| {
                    let weight = profiles
                        .get(b)
                        .map_or(0.0, |p| p.over_frequencies.sum_range(overs.clone()));
                    (b.clone(), weight)
                })
                .collect();
            // Stable: equal weights keep roster order.
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ranked.into_iter().map(|(k, _)| k).collect()
        };

        let phase_bowlers = PhaseBowlers {
            powerplay: rank(0..MIDDLE_OVERS_START),
            middle: rank(MIDDLE_OVERS_START..DEATH_OVERS_START),
            death: rank(DEATH_OVERS_START..OVERS_PER_INNINGS),
        };

        let info = TeamInfo {
            name: record.name.clone().unwrap_or_else(|| code.upper()),
            full_name: record
                .full_name
                .clone()
                .or_else(|| record.name.clone())
                .unwrap_or_else(|| code.upper()),
            logo: record.logo.clone(),
            color_primary: record.color_primary.clone(),
        };

        Self {
            code,
            info,
            players,
            batting_order,
            bowlers,
            phase_bowlers,
            profiles,
        }
    }

    /// Profile for a player on this team.
    #[must_use]
    pub fn profile(&self, player: &PlayerKey) -> Option<&PlayerProfile> {
        self.profiles.get(player)
    }

    /// True if the player is on this team.
    #[must_use]
    pub fn contains(&self, player: &PlayerKey) -> bool {
        self.profiles.contains_key(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{InMemoryRoster, OverNumbers, RawPlayerStats};

    fn bowler(skill: &str, overs: Vec<u32>) -> RawPlayerStats {
        RawPlayerStats {
            bowling_skill: Some(skill.to_string()),
            over_numbers: Some(OverNumbers::List(overs)),
            ..Default::default()
        }
    }

    fn batter() -> RawPlayerStats {
        RawPlayerStats {
            bowling_skill: Some("None".to_string()),
            ..Default::default()
        }
    }

    fn roster() -> InMemoryRoster {
        InMemoryRoster::new()
            .with_team("ab", TeamRecord::new(["B1", "B2", "P1", "S1", "P2", "S2", "P3", " "]))
            .with_player("B1", &batter())
            .with_player("B2", &batter())
            .with_player("P1", &bowler("Right-arm fast", vec![0, 1, 2, 18, 19]))
            .with_player("S1", &bowler("Right-arm offbreak", vec![8, 9, 10, 11]))
            .with_player("P2", &bowler("Left-arm medium", vec![17, 18, 19, 19]))
            .with_player("S2", &bowler("Legbreak", vec![7]))
    }

    #[test]
    fn test_load_team() {
        let mut diags = Diagnostics::new();
        let team = Team::load(&roster(), &TeamCode::new("AB"), &mut diags).unwrap();

        assert_eq!(team.players.len(), 7);
        assert_eq!(team.batting_order[0], PlayerKey::new("B1"));
        // P3 is unknown: placeholder profile, does not bowl.
        assert!(team.profile(&PlayerKey::new("P3")).unwrap().is_placeholder);
        assert_eq!(team.bowlers.len(), 5);
        assert!(diags
            .entries()
            .iter()
            .any(|d| matches!(d, Diagnostic::UnknownPlayer { .. })));
        assert!(diags
            .entries()
            .iter()
            .any(|d| matches!(d, Diagnostic::BlankRosterEntry { .. })));
    }

    #[test]
    fn test_phase_ranking() {
        let mut diags = Diagnostics::new();
        let team = Team::load(&roster(), &TeamCode::new("ab"), &mut diags).unwrap();

        assert_eq!(team.phase_bowlers.powerplay[0], PlayerKey::new("P1"));
        assert_eq!(team.phase_bowlers.middle[0], PlayerKey::new("S1"));
        assert_eq!(team.phase_bowlers.death[0], PlayerKey::new("P2"));
        assert_eq!(team.phase_bowlers.death[1], PlayerKey::new("P1"));
        assert_eq!(team.phase_bowlers.for_phase(Phase::Middle).len(), team.bowlers.len());
    }

    #[test]
    fn test_part_timers_added() {
        let mut diags = Diagnostics::new();
        let team = Team::load(&roster(), &TeamCode::new("ab"), &mut diags).unwrap();

        // Four recognised bowlers, topped up with the first non-bowler.
        assert_eq!(team.bowlers.len(), MIN_BOWLING_POOL);
        assert_eq!(team.bowlers[4], PlayerKey::new("B1"));
        assert!(diags
            .entries()
            .iter()
            .any(|d| matches!(d, Diagnostic::PartTimeBowlers { .. })));
    }

    #[test]
    fn test_no_bowlers_uses_everyone() {
        let provider = InMemoryRoster::new()
            .with_team("x", TeamRecord::new(["A", "B"]))
            .with_player("A", &batter())
            .with_player("B", &batter());
        let mut diags = Diagnostics::new();
        let team = Team::load(&provider, &TeamCode::new("x"), &mut diags).unwrap();

        assert_eq!(team.bowlers, team.players);
    }

    #[test]
    fn test_duplicate_entries_skipped() {
        let provider = InMemoryRoster::new()
            .with_team("x", TeamRecord::new(["X", " X", "Y", "X"]))
            .with_player("X", &batter())
            .with_player("Y", &batter());
        let mut diags = Diagnostics::new();
        let team = Team::load(&provider, &TeamCode::new("x"), &mut diags).unwrap();

        assert_eq!(team.players, vec![PlayerKey::new("X"), PlayerKey::new("Y")]);
        assert_eq!(team.batting_order, team.players);
        let repeats = diags
            .entries()
            .iter()
            .filter(|d| matches!(d, Diagnostic::DuplicateRosterEntry { player, .. } if player.as_str() == "X"))
            .count();
        assert_eq!(repeats, 2);
    }

    #[test]
    fn test_empty_roster_fails() {
        let provider = InMemoryRoster::new().with_team("x", TeamRecord::new(["  ", ""]));
        let mut diags = Diagnostics::new();
        let err = Team::load(&provider, &TeamCode::new("x"), &mut diags).unwrap_err();
        assert!(matches!(err, SimError::EmptyRoster(_)));
    }

    #[test]
    fn test_team_info_defaults() {
        let mut diags = Diagnostics::new();
        let team = Team::load(&roster(), &TeamCode::new("ab"), &mut diags).unwrap();
        assert_eq!(team.info.name, "AB");
        assert_eq!(team.info.full_name, "AB");
        assert!(team.info.logo.is_none());
    }
}
