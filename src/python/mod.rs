//! Python bindings for the cricket simulator.
//!
//! Structured results cross the boundary as JSON strings and snapshots as
//! bytes.
//!
//! # Quick Start
//!
//! ```python
//! import json
//! import cricket_sim
//!
//! engine = cricket_sim.MatchEngine(teams_json, players_json, "csk", "mi", seed=7)
//! engine.perform_toss()
//! while not engine.is_complete:
//!     step = json.loads(engine.simulate_one_ball())
//!     print(step["event"])
//!
//! saved = engine.snapshot()
//! card = json.loads(cricket_sim.simulate_scorecard(teams_json, players_json, "csk", "mi"))
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// cricket_sim: ball-by-ball Twenty20 match simulation.
#[pymodule]
fn cricket_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatchEngine>()?;
    m.add_function(wrap_pyfunction!(simulate_scorecard, m)?)?;
    Ok(())
}
