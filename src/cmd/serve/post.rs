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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::Redirect;
use serde::Deserialize;
use vocabmaster_core::error::VocabError;
use vocabmaster_core::quiz::mode::GameMode;
use vocabmaster_core::quiz::question::Answer;
use vocabmaster_core::quiz::session::Phase;
use vocabmaster_core::review::ReviewSession;
use vocabmaster_core::stats::MasteryFilter;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;
use vocabmaster_core::types::word::NewWord;
use vocabmaster_core::types::word::WordId;

use crate::cmd::serve::state::Flash;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::PendingWord;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::Tab;
use crate::utils::plural;

#[derive(Deserialize)]
pub struct AddForm {
    action: String,
    word: Option<String>,
    note: Option<String>,
}

pub async fn add_action(State(state): State<ServerState>, Form(form): Form<AddForm>) -> Redirect {
    match form.action.as_str() {
        "Analyze" => {
            let word = form.word.unwrap_or_default().trim().to_string();
            analyze(&state, word).await;
        }
        "Save" => {
            let mut m = state.lock();
            save(&mut m, form.note);
        }
        "Discard" => {
            state.lock().pending = None;
        }
        other => unknown_action(&mut state.lock(), other),
    }
    Redirect::to(Tab::Add.path())
}

/// Look the word up. The lock is only taken once the provider has answered.
async fn analyze(state: &ServerState, word: String) {
    if word.is_empty() {
        state.lock().flash = Some(Flash::error("Enter a word to analyze."));
        return;
    }
    let Some(client) = &state.gemini else {
        state.lock().flash = Some(Flash::error(
            "No Gemini API key is configured. Set GEMINI_API_KEY and restart.",
        ));
        return;
    };
    let result = client.define(&word).await;
    let mut m = state.lock();
    match result {
        Ok(definition) => {
            log::debug!("Fetched a definition of '{word}'");
            m.pending = Some(PendingWord { word, definition });
            m.succeed("Analysis complete!");
        }
        Err(e) => {
            m.pending = None;
            m.fail(&e);
        }
    }
}

fn save(m: &mut MutableState, note: Option<String>) {
    let Some(pending) = m.pending.take() else {
        m.flash = Some(Flash::error("There is no analyzed word to save."));
        return;
    };
    let new = NewWord::new(
        pending.word.clone(),
        pending.definition.meanings.clone(),
        pending.definition.examples.clone(),
        note,
    );
    match m.db.create(new, Timestamp::now()) {
        Ok(entry) => {
            log::info!("Saved '{}' with id {}", entry.word, entry.id);
            m.succeed(format!("'{}' added to your collection!", entry.word));
        }
        Err(e) => {
            // Keep the definition so saving can be retried.
            m.pending = Some(pending);
            m.fail(&e);
        }
    }
}

#[derive(Deserialize)]
pub struct GameForm {
    action: String,
    mode: Option<String>,
    choice: Option<i64>,
    text: Option<String>,
    verdict: Option<bool>,
}

impl GameForm {
    fn answer(&self) -> Option<Answer> {
        if let Some(id) = self.choice {
            Some(Answer::Choice(WordId::new(id)))
        } else if let Some(text) = &self.text {
            Some(Answer::Text(text.clone()))
        } else {
            self.verdict.map(Answer::Verdict)
        }
    }
}

pub async fn games_action(
    State(state): State<ServerState>,
    Form(form): Form<GameForm>,
) -> Redirect {
    let mut guard = state.lock();
    let m: &mut MutableState = &mut guard;
    let result: Result<(), VocabError> = match form.action.as_str() {
        "Start" => match form.mode.as_deref().map(GameMode::try_from) {
            Some(Ok(mode)) => {
                m.selected_mode = mode;
                let reset = match m.game.phase() {
                    Phase::Finished => m.game.play_again(),
                    _ => Ok(()),
                };
                reset.and_then(|()| m.db.list_all()).and_then(|words| {
                    log::debug!("Starting {mode} over {} words", words.len());
                    m.game.start_game(mode, words, &mut m.rng)
                })
            }
            Some(Err(e)) => {
                m.flash = Some(Flash::error(e.message()));
                Ok(())
            }
            None => {
                m.flash = Some(Flash::error("Choose a game mode."));
                Ok(())
            }
        },
        "Answer" => match form.answer() {
            Some(answer) => m
                .game
                .submit_answer(&answer, Timestamp::now(), &mut m.db)
                .map(|report| {
                    if report.finished {
                        log::info!("Game over: {}/{}", report.score, report.answered);
                    }
                }),
            None => {
                m.flash = Some(Flash::error("Give an answer first."));
                Ok(())
            }
        },
        "Next" => m.game.next_question(&mut m.rng),
        "PlayAgain" => m.game.play_again(),
        other => {
            unknown_action(m, other);
            Ok(())
        }
    };
    if let Err(e) = result {
        m.fail(&e);
    }
    Redirect::to(Tab::Games.path())
}

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
}

pub async fn review_action(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    let mut guard = state.lock();
    let m: &mut MutableState = &mut guard;
    let now = Timestamp::now();
    match form.action.as_str() {
        "Remembered" | "Forgot" => {
            let remembered = form.action == "Remembered";
            let result = match m.review.as_mut() {
                Some(review) => review.answer(remembered, now, &mut m.db).map(Some),
                None => Ok(None),
            };
            match result {
                Ok(Some(Some(update))) if remembered => {
                    let days = now.days_until(update.next_review).max(0) as usize;
                    m.succeed(format!("Great job! See you in {}.", plural(days, "day")))
                }
                Ok(Some(Some(_))) => m.succeed("That's okay! You'll see it again soon."),
                Ok(Some(None)) => {
                    log::debug!("Skipped a review word that is gone or no longer due");
                    m.flash = Some(Flash::error("That word is no longer due for review."));
                }
                Ok(None) => {}
                Err(e) => m.fail(&e),
            }
        }
        "Restart" => match m.db.list_all() {
            Ok(words) => m.review = Some(ReviewSession::start(words, now)),
            Err(e) => m.fail(&e),
        },
        other => unknown_action(m, other),
    }
    Redirect::to(Tab::Review.path())
}

#[derive(Deserialize)]
pub struct CollectionForm {
    action: String,
    id: Option<i64>,
    filter: Option<String>,
}

pub async fn collection_action(
    State(state): State<ServerState>,
    Form(form): Form<CollectionForm>,
) -> Redirect {
    let filter = form
        .filter
        .as_deref()
        .and_then(|f| MasteryFilter::try_from(f).ok())
        .unwrap_or_default();
    let mut m = state.lock();
    match (form.action.as_str(), form.id) {
        ("Delete", Some(id)) => {
            let id = WordId::new(id);
            let result = m.db.get(id).and_then(|word| {
                m.db.delete(id)?;
                Ok(word)
            });
            match result {
                Ok(word) => {
                    log::info!("Deleted word {id}");
                    let name = word.map(|w| w.word).unwrap_or_else(|| id.to_string());
                    m.succeed(format!("Deleted '{name}'."));
                }
                Err(e) => m.fail(&e),
            }
        }
        ("Delete", None) => m.flash = Some(Flash::error("No word was selected.")),
        (other, _) => unknown_action(&mut m, other),
    }
    Redirect::to(&format!("{}?filter={}", Tab::Collection.path(), filter.as_str()))
}

pub async fn shutdown_action(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let sender = state
        .shutdown_tx
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    if let Some(tx) = sender {
        let _ = tx.send(());
    }
    (
        StatusCode::OK,
        Html("Vocab Master has shut down. You can close this tab.".to_string()),
    )
}

fn unknown_action(m: &mut MutableState, action: &str) {
    log::warn!("Unknown action: {action}");
    m.flash = Some(Flash::error(format!("Unknown action: {action}")));
}
