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

use crate::error::VocabError;
use crate::scheduler::MasteryUpdate;
use crate::store::WordStore;
use crate::types::timestamp::Timestamp;
use crate::types::word::NewWord;
use crate::types::word::Meanings;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

pub fn ts(s: &str) -> Timestamp {
    Timestamp::try_from(s).unwrap()
}

pub fn word(id: i64, word: &str) -> WordEntry {
    WordEntry {
        id: WordId::new(id),
        word: word.to_string(),
        meanings: Meanings::new(
            format!("formal meaning of {word}"),
            format!("simple meaning of {word}"),
            format!("creative meaning of {word}"),
        ),
        examples: format!("I used {word} in a sentence."),
        note: None,
        mastery: 0,
        next_review: ts("2024-01-01T00:00:00.000"),
    }
}

/// `n` distinct words with ids `1..=n`.
pub fn pool(n: usize) -> Vec<WordEntry> {
    (1..=n)
        .map(|i| word(i as i64, &format!("word{i}")))
        .collect()
}

/// A store that can be read but whose writes always fail.
pub struct ReadOnlyStore(pub Vec<WordEntry>);

impl WordStore for ReadOnlyStore {
    fn list_all(&self) -> Result<Vec<WordEntry>, VocabError> {
        Ok(self.0.clone())
    }

    fn get(&self, id: WordId) -> Result<Option<WordEntry>, VocabError> {
        Ok(self.0.iter().find(|w| w.id == id).cloned())
    }

    fn create(&mut self, _word: NewWord, _now: Timestamp) -> Result<WordEntry, VocabError> {
        Err(VocabError::store("read-only"))
    }

    fn update_mastery(&mut self, _update: &MasteryUpdate) -> Result<(), VocabError> {
        Err(VocabError::store("read-only"))
    }

    fn delete(&mut self, _id: WordId) -> Result<(), VocabError> {
        Err(VocabError::store("read-only"))
    }
}
