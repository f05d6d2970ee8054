//! Match engine bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{MatchConfig, PitchFactors, SimError};
use crate::engine::{MatchEngine, MatchSnapshot};
use crate::players::InMemoryRoster;
use crate::scorecard;

fn to_py_err(err: SimError) -> PyErr {
    match err {
        SimError::StepLimit(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn config(seed: u64, pace: f64, spin: f64, outfield: f64) -> MatchConfig {
    MatchConfig::default()
        .with_seed(seed)
        .with_pitch(PitchFactors::new(pace, spin, outfield))
}

/// Python wrapper for MatchEngine.
///
/// Rosters are passed as JSON: a map of team code to team record and a map
/// of player key to raw stats.
#[pyclass(name = "MatchEngine")]
pub struct PyMatchEngine {
    roster: InMemoryRoster,
    engine: MatchEngine,
}

#[pymethods]
impl PyMatchEngine {
    /// Create a match.
    ///
    /// # Arguments
    /// - teams_json: Team records keyed by team code
    /// - players_json: Player stats keyed by player name
    /// - team_a, team_b: Team codes (case-insensitive)
    /// - seed: RNG seed for a deterministic match
    /// - pace, spin, outfield: Pitch factors
    #[new]
    #[pyo3(signature = (
        teams_json,
        players_json,
        team_a,
        team_b,
        seed = 42,
        pace = 1.0,
        spin = 1.0,
        outfield = 1.0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        teams_json: &str,
        players_json: &str,
        team_a: &str,
        team_b: &str,
        seed: u64,
        pace: f64,
        spin: f64,
        outfield: f64,
    ) -> PyResult<Self> {
        let roster = InMemoryRoster::from_json(teams_json, players_json).map_err(to_py_err)?;
        let engine =
            MatchEngine::new(&roster, team_a, team_b, config(seed, pace, spin, outfield)).map_err(to_py_err)?;
        Ok(Self { roster, engine })
    }

    /// Perform the toss. Returns the toss result as JSON.
    fn perform_toss(&mut self) -> PyResult<String> {
        let toss = self.engine.perform_toss().map_err(to_py_err)?;
        to_json(&toss)
    }

    /// Play one step. Returns the step outcome (summary and event) as JSON.
    fn simulate_one_ball(&mut self) -> PyResult<String> {
        let outcome = self.engine.simulate_one_ball().map_err(to_py_err)?;
        to_json(&outcome)
    }

    /// Current match summary as JSON.
    fn summary(&self) -> PyResult<String> {
        to_json(&self.engine.summary())
    }

    /// Diagnostics raised so far, as strings.
    fn diagnostics(&self) -> Vec<String> {
        self.engine.diagnostics().iter().map(ToString::to_string).collect()
    }

    /// Serialize the match state.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.engine.snapshot().to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Replace the match state with a snapshot taken from an engine with the
    /// same teams.
    fn resume(&mut self, snapshot: &[u8]) -> PyResult<()> {
        let snapshot = MatchSnapshot::from_bytes(snapshot).map_err(to_py_err)?;
        let teams = self.engine.teams();
        let (team_a, team_b) = (teams[0].code.clone(), teams[1].code.clone());
        self.engine =
            MatchEngine::resume_for(&self.roster, team_a.as_str(), team_b.as_str(), snapshot).map_err(to_py_err)?;
        Ok(())
    }

    #[getter]
    fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    #[getter]
    fn balls_played(&self) -> usize {
        self.engine.balls_played()
    }

    fn __repr__(&self) -> String {
        let teams = self.engine.teams();
        format!(
            "MatchEngine({} vs {}, status={:?}, balls={})",
            teams[0].code,
            teams[1].code,
            self.engine.status(),
            self.engine.balls_played()
        )
    }
}

/// Simulate a whole match and return its scorecard as JSON.
#[pyfunction]
#[pyo3(signature = (
    teams_json,
    players_json,
    team_a,
    team_b,
    seed = 42,
    pace = 1.0,
    spin = 1.0,
    outfield = 1.0
))]
#[allow(clippy::too_many_arguments)]
pub fn simulate_scorecard(
    teams_json: &str,
    players_json: &str,
    team_a: &str,
    team_b: &str,
    seed: u64,
    pace: f64,
    spin: f64,
    outfield: f64,
) -> PyResult<String> {
    let roster = InMemoryRoster::from_json(teams_json, players_json).map_err(to_py_err)?;
    let card = scorecard::simulate_match(&roster, team_a, team_b, config(seed, pace, spin, outfield))
        .map_err(to_py_err)?;
    to_json(&card)
}
