//! High score persistence in `window.localStorage`

use game_core::{parse_high_score, HighScoreStore, Params, StoreError};
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<f32>, StoreError> {
        let raw = self
            .storage
            .get_item(Params::HIGH_SCORE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        raw.as_deref().map(parse_high_score).transpose()
    }

    fn save(&mut self, best: f32) -> Result<(), StoreError> {
        self.storage
            .set_item(Params::HIGH_SCORE_KEY, &best.to_string())
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}
