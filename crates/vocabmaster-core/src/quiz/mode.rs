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

use crate::error::ErrorReport;

/// The three quiz games.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameMode {
    /// Pick the right formal meaning for a word out of four.
    DefinitionMatch,
    /// Type the word that was blanked out of its example sentences.
    FillInTheBlank,
    /// Say whether the shown meaning belongs to the word.
    QuickFire,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [
        GameMode::DefinitionMatch,
        GameMode::FillInTheBlank,
        GameMode::QuickFire,
    ];

    /// Number of questions in one game.
    pub fn session_length(&self) -> usize {
        match self {
            GameMode::DefinitionMatch => 10,
            GameMode::FillInTheBlank => 10,
            GameMode::QuickFire => 15,
        }
    }

    /// Smallest collection a game can start with. Modes that show other
    /// words' meanings as distractors need four.
    pub fn min_pool(&self) -> usize {
        match self {
            GameMode::DefinitionMatch => 4,
            GameMode::FillInTheBlank => 1,
            GameMode::QuickFire => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::DefinitionMatch => "definition-match",
            GameMode::FillInTheBlank => "fill-in-the-blank",
            GameMode::QuickFire => "quick-fire",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameMode::DefinitionMatch => "Definition Match",
            GameMode::FillInTheBlank => "Fill in the Blank",
            GameMode::QuickFire => "Quick Fire",
        }
    }
}

impl Display for GameMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for GameMode {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| ErrorReport::new(format!("invalid game mode: {value}")))
    }
}
