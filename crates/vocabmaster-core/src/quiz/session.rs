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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::VocabError;
use crate::quiz::mode::GameMode;
use crate::quiz::question::Answer;
use crate::quiz::question::Question;
use crate::rng::TinyRng;
use crate::scheduler::MasteryUpdate;
use crate::scheduler::schedule;
use crate::store::WordStore;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordEntry;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// No game is running.
    Idle,
    /// A question is waiting for an answer.
    Active,
    /// The last answer was recorded; waiting for "next question".
    AnsweredAwaitingNext,
    /// All questions were answered.
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::AnsweredAwaitingNext => "awaiting the next question",
            Phase::Finished => "finished",
        }
    }
}

/// What the engine reports once an answer has been graded and its mastery
/// update persisted.
#[derive(Clone, PartialEq, Debug)]
pub struct AnswerReport {
    pub correct: bool,
    /// The right answer, for display after a miss.
    pub correct_answer: String,
    pub score: usize,
    pub answered: usize,
    pub update: MasteryUpdate,
    /// Whether this was the last question of the game.
    pub finished: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FinalScore {
    pub score: usize,
    pub answered: usize,
}

impl FinalScore {
    pub fn percentage(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.score as f64 / self.answered as f64 * 100.0
        }
    }
}

impl Display for FinalScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({:.0}%)",
            self.score,
            self.answered,
            self.percentage()
        )
    }
}

/// One game, owned by the caller. Every command either succeeds and moves
/// the state forward, or fails and leaves it exactly as it was.
#[derive(Clone, Debug)]
pub struct SessionState {
    phase: Phase,
    mode: Option<GameMode>,
    score: usize,
    answered: usize,
    question: Option<Question>,
    pool: Vec<WordEntry>,
    last_report: Option<AnswerReport>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            mode: None,
            score: 0,
            answered: 0,
            question: None,
            pool: Vec::new(),
            last_report: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Whether a game is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active | Phase::AnsweredAwaitingNext)
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// The 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        match self.phase {
            Phase::Active => self.answered + 1,
            _ => self.answered,
        }
    }

    pub fn last_report(&self) -> Option<&AnswerReport> {
        self.last_report.as_ref()
    }

    pub fn final_score(&self) -> Option<FinalScore> {
        match self.phase {
            Phase::Finished => Some(FinalScore {
                score: self.score,
                answered: self.answered,
            }),
            _ => None,
        }
    }

    /// Start a game of `mode` over `pool`. Only valid while idle; a finished
    /// game has to be left with `play_again` first.
    pub fn start_game(
        &mut self,
        mode: GameMode,
        pool: Vec<WordEntry>,
        rng: &mut TinyRng,
    ) -> Result<(), VocabError> {
        if self.phase != Phase::Idle {
            return Err(self.invalid("start a game"));
        }
        let required = mode.min_pool();
        if pool.len() < required {
            return Err(VocabError::InsufficientPool {
                required,
                available: pool.len(),
            });
        }
        let question = Question::generate(mode, &pool, rng).ok_or(VocabError::InsufficientPool {
            required,
            available: 0,
        })?;
        *self = Self {
            phase: Phase::Active,
            mode: Some(mode),
            score: 0,
            answered: 0,
            question: Some(question),
            pool,
            last_report: None,
        };
        Ok(())
    }

    /// Grade `answer`, persist the resulting mastery update through `store`,
    /// and only then record the answer. If the store fails, nothing changes.
    pub fn submit_answer<S: WordStore + ?Sized>(
        &mut self,
        answer: &Answer,
        now: Timestamp,
        store: &mut S,
    ) -> Result<AnswerReport, VocabError> {
        let (mode, question) = match (self.phase, self.mode, &self.question) {
            (Phase::Active, Some(mode), Some(question)) => (mode, question),
            _ => return Err(self.invalid("submit an answer")),
        };
        let correct = question.check(answer).ok_or(VocabError::InvalidTransition {
            command: "accept that kind of answer",
            phase: self.phase.as_str(),
        })?;
        let target = question.target();
        let stored = store
            .get(target.id)?
            .ok_or_else(|| VocabError::store(format!("no word with id {}", target.id)))?;
        let update = schedule(target.id, stored.mastery, correct, now);
        store.update_mastery(&update)?;

        let correct_answer = question.correct_answer().to_string();
        for word in self.pool.iter_mut().filter(|w| w.id == update.id) {
            word.apply(&update);
        }
        self.answered += 1;
        if correct {
            self.score += 1;
        }
        let finished = self.answered >= mode.session_length();
        self.phase = if finished {
            Phase::Finished
        } else {
            Phase::AnsweredAwaitingNext
        };
        let report = AnswerReport {
            correct,
            correct_answer,
            score: self.score,
            answered: self.answered,
            update,
            finished,
        };
        self.last_report = Some(report.clone());
        Ok(report)
    }

    pub fn next_question(&mut self, rng: &mut TinyRng) -> Result<(), VocabError> {
        let mode = match (self.phase, self.mode) {
            (Phase::AnsweredAwaitingNext, Some(mode)) => mode,
            _ => return Err(self.invalid("move to the next question")),
        };
        let question = Question::generate(mode, &self.pool, rng)
            .ok_or_else(|| self.invalid("move to the next question"))?;
        self.question = Some(question);
        self.phase = Phase::Active;
        Ok(())
    }

    pub fn play_again(&mut self) -> Result<(), VocabError> {
        if self.phase != Phase::Finished {
            return Err(self.invalid("play again"));
        }
        *self = Self::new();
        Ok(())
    }

    fn invalid(&self, command: &'static str) -> VocabError {
        VocabError::InvalidTransition {
            command,
            phase: self.phase.as_str(),
        }
    }
}
