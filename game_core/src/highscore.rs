//! Persisted best score
//!
//! The browser keeps a single number in local storage. The core only sees
//! this trait so the scoring rules can be tested without a browser.

use crate::StoreError;

pub trait HighScoreStore {
    /// Read the stored best score, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<f32>, StoreError>;

    fn save(&mut self, best: f32) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and when browser storage is unavailable
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<f32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(best: f32) -> Self {
        Self { value: Some(best) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<f32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, best: f32) -> Result<(), StoreError> {
        self.value = Some(best);
        Ok(())
    }
}

/// Parse a stored score string
pub fn parse_high_score(raw: &str) -> Result<f32, StoreError> {
    let value: f32 = raw.trim().parse().map_err(|e| StoreError::Corrupt {
        value: raw.to_string(),
        source: Some(e),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(StoreError::Corrupt {
            value: raw.to_string(),
            source: None,
        });
    }
    Ok(value)
}
