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

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::Redirect;
use maud::Markup;
use maud::html;
use serde::Deserialize;
use vocabmaster_core::quiz::mode::GameMode;
use vocabmaster_core::quiz::question::Question;
use vocabmaster_core::quiz::session::AnswerReport;
use vocabmaster_core::quiz::session::Phase;
use vocabmaster_core::quiz::session::SessionState;
use vocabmaster_core::review::ReviewSession;
use vocabmaster_core::stats::CollectionStats;
use vocabmaster_core::stats::MasteryFilter;
use vocabmaster_core::stats::collection_view;
use vocabmaster_core::stats::days_until_review;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;
use vocabmaster_core::types::word::WordEntry;

use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::PendingWord;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::Tab;
use crate::cmd::serve::template::page_template;
use crate::utils::plural;

pub async fn root_handler() -> Redirect {
    Redirect::to(Tab::Add.path())
}

pub async fn add_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.lock();
    let body = render_add(m.pending.as_ref(), state.gemini.is_some());
    render_page(&mut m, Tab::Add, |_| body)
}

pub async fn games_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.lock();
    render_page(&mut m, Tab::Games, |view| {
        render_games(view.game, view.selected_mode)
    })
}

pub async fn review_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.lock();
    render_page(&mut m, Tab::Review, |view| {
        let now = Timestamp::now();
        let review = view.review.get_or_insert_default();
        review.refresh(view.words.clone(), now);
        render_review(review)
    })
}

#[derive(Deserialize)]
pub struct CollectionQuery {
    filter: Option<String>,
}

pub async fn collection_handler(
    State(state): State<ServerState>,
    Query(query): Query<CollectionQuery>,
) -> (StatusCode, Html<String>) {
    let filter = query
        .filter
        .as_deref()
        .and_then(|f| MasteryFilter::try_from(f).ok())
        .unwrap_or_default();
    let mut m = state.lock();
    render_page(&mut m, Tab::Collection, |view| {
        render_collection(&view.words, filter, Timestamp::now())
    })
}

/// What a page body is rendered from: the state, plus a fresh read of the
/// collection.
struct View<'a> {
    words: Vec<WordEntry>,
    game: &'a SessionState,
    selected_mode: GameMode,
    review: &'a mut Option<ReviewSession>,
}

fn render_page(
    m: &mut MutableState,
    tab: Tab,
    body: impl FnOnce(&mut View) -> Markup,
) -> (StatusCode, Html<String>) {
    let words = match m.db.list_all() {
        Ok(words) => words,
        Err(e) => {
            m.fail(&e);
            Vec::new()
        }
    };
    let stats = CollectionStats::compute(&words, Timestamp::now());
    let flash = m.flash.take();
    let mut view = View {
        words,
        game: &m.game,
        selected_mode: m.selected_mode,
        review: &mut m.review,
    };
    let body = body(&mut view);
    let html = page_template(tab, &stats, flash, body).into_string();
    (StatusCode::OK, Html(html))
}

fn render_add(pending: Option<&PendingWord>, has_provider: bool) -> Markup {
    html! {
        section.card {
            h2 { "Add a New Word" }
            @if !has_provider {
                p.warning {
                    "No Gemini API key is configured. Set GEMINI_API_KEY to look up new words."
                }
            }
            form.analyze action="/add" method="post" {
                label for="word" { "Enter word:" }
                input #word type="text" name="word" placeholder="e.g., serendipity" autofocus;
                input type="submit" name="action" value="Analyze";
            }
        }
        @if let Some(pending) = pending {
            section.card.definition {
                h2 { (pending.word) }
                h3 { "Definitions" }
                ol {
                    @for meaning in pending.definition.meanings.iter() {
                        li { (meaning) }
                    }
                }
                h3 { "Example Usage" }
                p.examples { (pending.definition.examples) }
                form action="/add" method="post" {
                    label for="note" { "Personal note (optional):" }
                    textarea #note name="note" placeholder="e.g., where you found this word" {}
                    div.buttons {
                        input.primary type="submit" name="action" value="Save";
                        input type="submit" name="action" value="Discard";
                    }
                }
            }
        }
    }
}

fn render_games(game: &SessionState, selected_mode: GameMode) -> Markup {
    match (game.phase(), game.mode(), game.question()) {
        (Phase::Idle, _, _) | (_, None, _) | (Phase::Active, _, None) => {
            render_mode_picker(selected_mode)
        }
        (Phase::Finished, Some(mode), _) => render_game_over(game, mode),
        (_, Some(mode), question) => html! {
            section.card.game {
                h2 { (mode.title()) }
                p.progress {
                    "Question " (game.question_number()) " of " (mode.session_length())
                    " | Score: " (game.score()) "/" (game.answered())
                }
                @if let Some(question) = question {
                    (render_question(question, game.phase() == Phase::Active))
                }
                @if game.phase() == Phase::AnsweredAwaitingNext {
                    @if let Some(report) = game.last_report() {
                        (render_report(report))
                    }
                    form action="/games" method="post" {
                        input.primary #next type="submit" name="action" value="Next";
                    }
                }
            }
        },
    }
}

fn render_mode_picker(selected_mode: GameMode) -> Markup {
    html! {
        section.card {
            h2 { "Choose a game mode" }
            form action="/games" method="post" {
                @for mode in GameMode::ALL {
                    label.mode {
                        @if mode == selected_mode {
                            input type="radio" name="mode" value=(mode.as_str()) checked;
                        } @else {
                            input type="radio" name="mode" value=(mode.as_str());
                        }
                        strong { (mode.title()) }
                        " "
                        span.description {
                            (mode_description(mode))
                            " (" (plural(mode.session_length(), "question")) ", needs "
                            (plural(mode.min_pool(), "word")) ")"
                        }
                    }
                }
                input.primary type="submit" name="action" value="Start";
            }
        }
    }
}

fn mode_description(mode: GameMode) -> &'static str {
    match mode {
        GameMode::DefinitionMatch => "Match the word with its correct definition.",
        GameMode::FillInTheBlank => "Complete the sentence with the correct word.",
        GameMode::QuickFire => "True or false? Test your knowledge fast.",
    }
}

fn render_question(question: &Question, open: bool) -> Markup {
    match question {
        Question::DefinitionMatch { target, options } => html! {
            p.target { (target.word.to_uppercase()) }
            p { "Which definition is correct?" }
            form.options action="/games" method="post" {
                input type="hidden" name="action" value="Answer";
                @for option in options {
                    @if open {
                        button type="submit" name="choice" value=(option.id.get()) {
                            (option.meanings.formal())
                        }
                    } @else {
                        button type="submit" name="choice" value=(option.id.get()) disabled {
                            (option.meanings.formal())
                        }
                    }
                }
            }
        },
        Question::FillInTheBlank { prompt, .. } => html! {
            p.prompt { (prompt) }
            @if open {
                form action="/games" method="post" {
                    label for="text" { "Your answer:" }
                    input #text type="text" name="text" autocomplete="off" autofocus;
                    input.primary type="submit" name="action" value="Answer";
                }
            }
        },
        Question::QuickFire {
            target,
            shown_definition,
            ..
        } => html! {
            p.target { (target.word.to_uppercase()) }
            p.shown { "Definition: " (shown_definition) }
            p { "Is this the correct definition?" }
            @if open {
                form.verdict action="/games" method="post" {
                    input type="hidden" name="action" value="Answer";
                    button.primary type="submit" name="verdict" value="true" { "TRUE" }
                    button type="submit" name="verdict" value="false" { "FALSE" }
                }
            }
        },
    }
}

fn render_report(report: &AnswerReport) -> Markup {
    html! {
        @if report.correct {
            p.result.correct { "Correct!" }
        } @else {
            p.result.wrong { "Wrong! The correct answer was: " (report.correct_answer) }
        }
    }
}

fn render_game_over(game: &SessionState, mode: GameMode) -> Markup {
    html! {
        section.card.game {
            h2 { (mode.title()) }
            @if let Some(report) = game.last_report() {
                (render_report(report))
            }
            @if let Some(score) = game.final_score() {
                p.game-over { "Game Over! Your score: " (score) }
            }
            form action="/games" method="post" {
                input.primary type="submit" name="action" value="PlayAgain";
            }
        }
    }
}

fn render_review(review: &ReviewSession) -> Markup {
    let (reviewed, total) = review.progress();
    html! {
        section.card {
            h2 { "Spaced Repetition Review" }
            @if total == 0 {
                p.done { "No words due for review! Come back later or practice in Games mode." }
            } @else if let Some(word) = review.current() {
                p { (plural(total, "word")) " due for review" }
                article.word {
                    h3 { (word.word) }
                    ol {
                        @for meaning in word.meanings.iter() {
                            li { (meaning) }
                        }
                    }
                    p.examples { strong { "Examples: " } (word.examples) }
                    @if let Some(note) = &word.note {
                        p.note { "Your note: " (note) }
                    }
                }
                p { "Did you remember this word?" }
                form.verdict action="/review" method="post" {
                    input.primary type="submit" name="action" value="Remembered";
                    input type="submit" name="action" value="Forgot";
                }
                p.progress { "Progress: " (reviewed + 1) "/" (total) }
            } @else {
                p.done { "Review session complete!" }
            }
            form action="/review" method="post" {
                input type="submit" name="action" value="Restart";
            }
        }
    }
}

fn render_collection(words: &[WordEntry], filter: MasteryFilter, now: Timestamp) -> Markup {
    let view = collection_view(words, filter);
    html! {
        section.card {
            h2 { "Your Vocabulary Collection" }
            @if words.is_empty() {
                p { "Your collection is empty. Add some words to get started!" }
            } @else {
                form.filter action="/collection" method="get" {
                    label for="filter" { "Filter by mastery:" }
                    select #filter name="filter" {
                        @for f in MasteryFilter::ALL {
                            @if f == filter {
                                option value=(f.as_str()) selected { (f.label()) }
                            } @else {
                                option value=(f.as_str()) { (f.label()) }
                            }
                        }
                    }
                    input type="submit" value="Filter";
                }
                p { "Showing " (plural(view.len(), "word")) }
                @for word in view {
                    (render_collection_word(word, filter, now))
                }
            }
        }
    }
}

fn render_collection_word(word: &WordEntry, filter: MasteryFilter, now: Timestamp) -> Markup {
    html! {
        details.word {
            summary {
                (word.word)
                " "
                span class=(format!("mastery-badge mastery-{}", word.mastery)) {
                    "Level " (word.mastery)
                }
            }
            ol {
                @for meaning in word.meanings.iter() {
                    li { (meaning) }
                }
            }
            p.examples { strong { "Examples: " } (word.examples) }
            @if let Some(note) = &word.note {
                p.note { "Your note: " (note) }
            }
            @match days_until_review(word, now) {
                None => p.due { "Due now" },
                Some(days) => p.scheduled { "Review in " (days) "d" },
            }
            form action="/collection" method="post" {
                input type="hidden" name="id" value=(word.id.get());
                input type="hidden" name="filter" value=(filter.as_str());
                input.danger type="submit" name="action" value="Delete";
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vocabmaster_core::rng::TinyRng;
    use vocabmaster_core::scheduler::schedule;
    use vocabmaster_core::store::MemoryStore;

    use super::*;
    use crate::helper::sample_word;

    fn collection(now: Timestamp) -> Vec<WordEntry> {
        let mut store = MemoryStore::new();
        let words: Vec<WordEntry> = ["cat", "dog", "emu", "fox"]
            .into_iter()
            .filter_map(|w| store.create(sample_word(w), now).ok())
            .collect();
        words
    }

    #[test]
    fn test_collection_filter() {
        let now = Timestamp::try_from("2024-05-01T12:00:00.000").unwrap();
        let mut words = collection(now);
        let id = words[1].id;
        words[1].apply(&schedule(id, 3, true, now));
        let html = render_collection(&words, MasteryFilter::Mastered, now).into_string();
        assert!(html.contains("Showing 1 word"));
        assert!(html.contains("Review in 14d"));
        assert!(!html.contains("Due now"));
        let html = render_collection(&words, MasteryFilter::All, now).into_string();
        assert!(html.contains("Showing 4 words"));
    }

    #[test]
    fn test_game_question_options() {
        let now = Timestamp::try_from("2024-05-01T12:00:00.000").unwrap();
        let mut game = SessionState::new();
        let mut rng = TinyRng::from_seed(3);
        game.start_game(GameMode::DefinitionMatch, collection(now), &mut rng)
            .unwrap();
        let html = render_games(&game, GameMode::DefinitionMatch).into_string();
        assert_eq!(html.matches(r#"name="choice""#).count(), 4);
        assert!(html.contains("Question 1 of 10"));
    }

    #[test]
    fn test_idle_shows_picker() {
        let html = render_games(&SessionState::new(), GameMode::QuickFire).into_string();
        assert!(html.contains(r#"value="quick-fire" checked"#));
        assert!(html.contains("needs 4 words"));
    }
}
