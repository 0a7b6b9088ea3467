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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::scheduler::MasteryUpdate;
use crate::types::timestamp::Timestamp;

/// The store-assigned identity of a word.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(i64);

impl WordId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exactly three meanings, in a fixed order: formal, simple, creative.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Meanings([String; 3]);

impl Meanings {
    pub fn new(formal: impl Into<String>, simple: impl Into<String>, creative: impl Into<String>) -> Self {
        Self([formal.into(), simple.into(), creative.into()])
    }

    pub fn formal(&self) -> &str {
        &self.0[0]
    }

    pub fn simple(&self) -> &str {
        &self.0[1]
    }

    pub fn creative(&self) -> &str {
        &self.0[2]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for Meanings {
    type Error = ErrorReport;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let count = value.len();
        let array: [String; 3] = value
            .try_into()
            .map_err(|_| ErrorReport::new(format!("expected exactly 3 meanings, got {count}")))?;
        Ok(Self(array))
    }
}

impl From<Meanings> for Vec<String> {
    fn from(meanings: Meanings) -> Vec<String> {
        meanings.0.into()
    }
}

/// A saved vocabulary word.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: WordId,
    pub word: String,
    pub meanings: Meanings,
    pub examples: String,
    pub note: Option<String>,
    pub mastery: u32,
    pub next_review: Timestamp,
}

impl WordEntry {
    /// A word is due when its next review is at or before `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    /// Level and next review only ever change together, through here.
    pub fn apply(&mut self, update: &MasteryUpdate) {
        debug_assert_eq!(self.id, update.id);
        self.mastery = update.level;
        self.next_review = update.next_review;
    }
}

/// The fields needed to create a word. New words start at level 0 and are
/// due immediately.
#[derive(Clone, PartialEq, Debug)]
pub struct NewWord {
    pub word: String,
    pub meanings: Meanings,
    pub examples: String,
    pub note: Option<String>,
}

impl NewWord {
    pub fn new(
        word: impl Into<String>,
        meanings: Meanings,
        examples: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            word: word.into().trim().to_string(),
            meanings,
            examples: examples.into(),
            note,
        }
    }

    /// The entry this becomes once the store has assigned an id.
    pub fn into_entry(self, id: WordId, created_at: Timestamp) -> WordEntry {
        WordEntry {
            id,
            word: self.word,
            meanings: self.meanings,
            examples: self.examples,
            note: self.note,
            mastery: 0,
            next_review: created_at,
        }
    }
}
