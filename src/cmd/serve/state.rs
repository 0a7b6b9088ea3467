// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::sync::oneshot::Sender;
use vocabmaster_core::error::VocabError;
use vocabmaster_core::provider::Definition;
use vocabmaster_core::quiz::mode::GameMode;
use vocabmaster_core::quiz::session::SessionState;
use vocabmaster_core::review::ReviewSession;
use vocabmaster_core::rng::TinyRng;

use crate::db::Database;
use crate::gemini::GeminiClient;

#[derive(Clone)]
pub struct ServerState {
    /// `None` when no API key is configured. Everything but word lookup
    /// still works.
    pub gemini: Option<GeminiClient>,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

impl ServerState {
    /// Lock the mutable state. A lock poisoned by a panicking handler is
    /// recovered.
    pub fn lock(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct MutableState {
    pub db: Database,
    pub rng: TinyRng,
    pub game: SessionState,
    /// The mode picked on the games page, remembered across games.
    pub selected_mode: GameMode,
    /// The current review pass, started on the first visit to the review page.
    pub review: Option<ReviewSession>,
    /// A definition fetched but not yet saved.
    pub pending: Option<PendingWord>,
    /// Shown once, on the next page render.
    pub flash: Option<Flash>,
}

impl MutableState {
    pub fn new(db: Database, rng: TinyRng) -> Self {
        Self {
            db,
            rng,
            game: SessionState::new(),
            selected_mode: GameMode::DefinitionMatch,
            review: None,
            pending: None,
            flash: None,
        }
    }

    pub fn fail(&mut self, error: &VocabError) {
        log::warn!("{error}");
        self.flash = Some(Flash::from_error(error));
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::Success(message.into()));
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct PendingWord {
    pub word: String,
    pub definition: Definition,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Flash {
    Success(String),
    Error {
        message: String,
        /// The provider's raw reply, when there is one.
        raw: Option<String>,
    },
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Flash::Error {
            message: message.into(),
            raw: None,
        }
    }

    pub fn from_error(error: &VocabError) -> Self {
        Flash::Error {
            message: error.to_string(),
            raw: error.raw_response().map(|raw| raw.to_string()),
        }
    }
}
