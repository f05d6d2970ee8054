//! Roster data source.
//!
//! The engine reads teams and player statistics through `RosterProvider`.
//! `InMemoryRoster` is the stock implementation, loaded from the same two
//! JSON documents the data pipeline produces (teams keyed by code, player
//! statistics keyed by player key).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::profile::RawPlayerStats;
use crate::core::{LookupError, PlayerKey, SimError, TeamCode};

/// A team as stored in the roster data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamRecord {
    /// Short name, e.g. "Chennai".
    pub name: Option<String>,
    /// Full name, e.g. "Chennai Super Kings".
    pub full_name: Option<String>,
    /// Player keys in batting order.
    pub players: Vec<String>,
    /// Display metadata, passed through untouched.
    pub logo: Option<String>,
    pub color_primary: Option<String>,
}

impl TeamRecord {
    /// Create a record from player keys in batting order.
    pub fn new<S: Into<String>>(players: impl IntoIterator<Item = S>) -> Self {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set short and full display names.
    #[must_use]
    pub fn with_names(mut self, name: impl Into<String>, full_name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.full_name = Some(full_name.into());
        self
    }

    /// Set logo and primary color.
    #[must_use]
    pub fn with_branding(mut self, logo: impl Into<String>, color_primary: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self.color_primary = Some(color_primary.into());
        self
    }
}

/// Supplies rosters and raw player statistics.
pub trait RosterProvider {
    /// Get a team's record.
    ///
    /// Fails with `SimError::UnknownTeam` if the code is not known.
    fn team(&self, code: &TeamCode) -> Result<TeamRecord, SimError>;

    /// Get a player's raw statistics.
    fn player_stats(&self, player: &PlayerKey) -> Result<RawPlayerStats, LookupError>;
}

/// Roster held in memory.
///
/// Player statistics are stored as JSON values and decoded on lookup, so
/// one bad record is reported as `LookupError::Malformed` for that player
/// instead of failing the whole load.
///
/// ## Example
///
/// ```
/// use cricket_sim::players::{InMemoryRoster, RosterProvider, TeamRecord};
/// use cricket_sim::core::{PlayerKey, TeamCode};
///
/// let roster = InMemoryRoster::new()
///     .with_team("csk", TeamRecord::new(["RG", "FD"]))
///     .with_player_json("RG", serde_json::json!({"batBallsTotal": 300}));
///
/// assert!(roster.team(&TeamCode::new("CSK")).is_ok());
/// assert!(roster.player_stats(&PlayerKey::new("RG")).is_ok());
/// assert!(roster.player_stats(&PlayerKey::new("FD")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRoster {
    teams: FxHashMap<TeamCode, TeamRecord>,
    players: FxHashMap<PlayerKey, serde_json::Value>,
}

impl InMemoryRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a teams document (`{"csk": {"players": [...], ...}}`) and a
    /// players document (`{"MSD": {...raw stats...}}`).
    pub fn from_json(teams_json: &str, players_json: &str) -> Result<Self, SimError> {
        let teams: FxHashMap<String, TeamRecord> = serde_json::from_str(teams_json)?;
        let players: FxHashMap<String, serde_json::Value> = serde_json::from_str(players_json)?;

        Ok(Self {
            teams: teams
                .into_iter()
                .map(|(code, record)| (TeamCode::new(code), record))
                .collect(),
            players: players
                .into_iter()
                .map(|(key, value)| (PlayerKey::new(key), value))
                .collect(),
        })
    }

    /// Add or replace a team.
    #[must_use]
    pub fn with_team(mut self, code: impl AsRef<str>, record: TeamRecord) -> Self {
        self.insert_team(code, record);
        self
    }

    /// Add or replace a player's statistics.
    #[must_use]
    pub fn with_player(mut self, key: impl AsRef<str>, stats: &RawPlayerStats) -> Self {
        self.insert_player(key, stats);
        self
    }

    /// Add or replace a player's statistics from raw JSON.
    #[must_use]
    pub fn with_player_json(mut self, key: impl AsRef<str>, value: serde_json::Value) -> Self {
        self.players.insert(PlayerKey::new(key), value);
        self
    }

    /// Add or replace a team.
    pub fn insert_team(&mut self, code: impl AsRef<str>, record: TeamRecord) {
        self.teams.insert(TeamCode::new(code), record);
    }

    /// Add or replace a player's statistics.
    pub fn insert_player(&mut self, key: impl AsRef<str>, stats: &RawPlayerStats) {
        // Serializing plain maps, numbers and strings cannot fail.
        if let Ok(value) = serde_json::to_value(stats) {
            self.players.insert(PlayerKey::new(key), value);
        }
    }

    /// Number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Number of players with statistics.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

impl RosterProvider for InMemoryRoster {
    fn team(&self, code: &TeamCode) -> Result<TeamRecord, SimError> {
        self.teams
            .get(code)
            .cloned()
            .ok_or_else(|| SimError::UnknownTeam(code.clone()))
    }

    fn player_stats(&self, player: &PlayerKey) -> Result<RawPlayerStats, LookupError> {
        let value = self.players.get(player).ok_or(LookupError::NotFound)?;
        serde_json::from_value(value.clone()).map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS: &str = r##"{
        "CSK": {"name": "Chennai", "fullName": "Chennai Super Kings",
                "players": ["RG", "MSD"], "logo": "csk.png", "colorPrimary": "#f9cd05"},
        "mi": {"players": []}
    }"##;

    const PLAYERS: &str = r#"{
        "RG": {"batBallsTotal": 400, "BowlingSkill": "None"},
        "MSD": {"batBallsTotal": "lots"}
    }"#;

    #[test]
    fn test_from_json() {
        let roster = InMemoryRoster::from_json(TEAMS, PLAYERS).unwrap();

        assert_eq!(roster.team_count(), 2);
        assert_eq!(roster.player_count(), 2);

        let csk = roster.team(&TeamCode::new("csk")).unwrap();
        assert_eq!(csk.players, vec!["RG", "MSD"]);
        assert_eq!(csk.full_name.as_deref(), Some("Chennai Super Kings"));
        assert_eq!(csk.color_primary.as_deref(), Some("#f9cd05"));
    }

    #[test]
    fn test_unknown_team() {
        let roster = InMemoryRoster::from_json(TEAMS, PLAYERS).unwrap();
        let err = roster.team(&TeamCode::new("kkr")).unwrap_err();
        assert!(matches!(err, SimError::UnknownTeam(_)));
    }

    #[test]
    fn test_player_lookup() {
        let roster = InMemoryRoster::from_json(TEAMS, PLAYERS).unwrap();

        let rg = roster.player_stats(&PlayerKey::new("RG")).unwrap();
        assert_eq!(rg.bat_balls_total, Some(400.0));

        assert!(matches!(
            roster.player_stats(&PlayerKey::new("MSD")),
            Err(LookupError::Malformed(_))
        ));
        assert_eq!(
            roster.player_stats(&PlayerKey::new("XX")),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(InMemoryRoster::from_json("not json", "{}").is_err());
    }

    #[test]
    fn test_builder() {
        let stats = RawPlayerStats {
            catches: Some(4.0),
            ..Default::default()
        };
        let roster = InMemoryRoster::new()
            .with_team("RR", TeamRecord::new(["A"]).with_names("Rajasthan", "Rajasthan Royals"))
            .with_player("A", &stats);

        assert_eq!(roster.player_stats(&PlayerKey::new("A")).unwrap().catches, Some(4.0));
        assert_eq!(
            roster.team(&TeamCode::new("rr")).unwrap().name.as_deref(),
            Some("Rajasthan")
        );
    }
}
