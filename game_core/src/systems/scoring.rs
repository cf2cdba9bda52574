use tracing::{info, warn};

use crate::{HighScoreStore, RunState, Score, StoreError};

/// Accumulate survival time. Frozen once the run has ended.
pub fn tick_score(score: &mut Score, run_state: &RunState, dt: f32) {
    if run_state.is_running() {
        score.tick(dt);
    }
}

/// Close out a run and save the best score if it was beaten.
///
/// Returns whether a new record was set.
pub fn persist_best<S: HighScoreStore + ?Sized>(
    score: &mut Score,
    store: &mut S,
) -> Result<bool, StoreError> {
    if !score.finalize() {
        return Ok(false);
    }
    info!(best = score.best, "new high score");
    store.save(score.best)?;
    Ok(true)
}

/// Load the best score, treating unreadable storage as "no score yet"
pub fn load_best<S: HighScoreStore + ?Sized>(store: &S) -> f32 {
    match store.load() {
        Ok(best) => best.unwrap_or(0.0),
        Err(e) => {
            warn!(error = %e, "ignoring stored high score");
            0.0
        }
    }
}
