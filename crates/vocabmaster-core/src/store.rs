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
use crate::types::timestamp::Timestamp;
use crate::types::word::NewWord;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

/// Persistence for saved words. Every failure is a [`VocabError::Store`];
/// callers do not interpret the cause.
pub trait WordStore {
    fn list_all(&self) -> Result<Vec<WordEntry>, VocabError>;

    /// The word as currently stored, or `None` if it does not exist.
    fn get(&self, id: WordId) -> Result<Option<WordEntry>, VocabError>;

    /// Save a new word at level 0, due at `now`.
    fn create(&mut self, word: NewWord, now: Timestamp) -> Result<WordEntry, VocabError>;

    fn update_mastery(&mut self, update: &MasteryUpdate) -> Result<(), VocabError>;

    fn delete(&mut self, id: WordId) -> Result<(), VocabError>;
}

/// A store that lives in memory.
#[derive(Default, Debug)]
pub struct MemoryStore {
    words: Vec<WordEntry>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<WordEntry>, VocabError> {
        Ok(self.words.clone())
    }

    fn get(&self, id: WordId) -> Result<Option<WordEntry>, VocabError> {
        Ok(self.words.iter().find(|w| w.id == id).cloned())
    }

    fn create(&mut self, word: NewWord, now: Timestamp) -> Result<WordEntry, VocabError> {
        self.next_id += 1;
        let entry = word.into_entry(WordId::new(self.next_id), now);
        self.words.push(entry.clone());
        Ok(entry)
    }

    fn update_mastery(&mut self, update: &MasteryUpdate) -> Result<(), VocabError> {
        match self.words.iter_mut().find(|w| w.id == update.id) {
            Some(word) => {
                word.apply(update);
                Ok(())
            }
            None => Err(VocabError::store(format!("no word with id {}", update.id))),
        }
    }

    fn delete(&mut self, id: WordId) -> Result<(), VocabError> {
        let before = self.words.len();
        self.words.retain(|w| w.id != id);
        if self.words.len() == before {
            Err(VocabError::store(format!("no word with id {id}")))
        } else {
            Ok(())
        }
    }
}
