//! DOM overlay: score, best score and the game-over / pause panels.
//! Missing elements are skipped so the page layout stays optional.

use game_core::Score;
use web_sys::{Document, Element};

use crate::fsm::FsmState;

pub struct Hud {
    document: Option<Document>,
    last_score: Option<(u32, u32)>,
    last_state: Option<FsmState>,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            last_score: None,
            last_state: None,
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.element(id) {
            let classes = el.class_list();
            let result = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
            if let Err(e) = result {
                tracing::warn!("failed to toggle #{id}: {e:?}");
            }
        }
    }

    /// Refresh the overlay; the DOM is only touched when something changed
    pub fn update(&mut self, score: &Score, state: FsmState) {
        let shown = (score.display(), score.best_display());
        if self.last_score != Some(shown) {
            self.set_text("score", &shown.0.to_string());
            self.set_text("high-score", &shown.1.to_string());
            self.last_score = Some(shown);
        }

        if self.last_state != Some(state) {
            self.set_hidden("start", state != FsmState::Ready);
            self.set_hidden("pause", state != FsmState::Paused);
            self.set_hidden("game-over", state != FsmState::GameOver);
            self.last_state = Some(state);
        }
    }
}
