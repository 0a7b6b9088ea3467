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
use crate::scheduler::schedule;
use crate::store::WordStore;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

/// One pass over the due words. Each word is answered at most once per pass.
#[derive(Clone, Debug, Default)]
pub struct ReviewSession {
    /// Words still to be shown, in review order.
    pending: Vec<WordEntry>,
    /// Words already answered in this pass.
    done: Vec<WordId>,
}

impl ReviewSession {
    /// Capture the words due at `now`, most overdue first.
    pub fn start(words: Vec<WordEntry>, now: Timestamp) -> Self {
        Self {
            pending: due_words(words, now, &[]),
            done: Vec::new(),
        }
    }

    /// Rebuild the remaining words from a fresh listing of the collection.
    /// Words added since the pass started are picked up, words deleted or no
    /// longer due are dropped, and words already answered stay answered.
    pub fn refresh(&mut self, words: Vec<WordEntry>, now: Timestamp) {
        self.pending = due_words(words, now, &self.done);
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.pending.first()
    }

    pub fn total(&self) -> usize {
        self.done.len() + self.pending.len()
    }

    /// Number of words already answered.
    pub fn reviewed(&self) -> usize {
        self.done.len()
    }

    /// `(reviewed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.reviewed(), self.total())
    }

    /// Begin a new pass over whatever is due at `now`.
    pub fn restart(&mut self, words: Vec<WordEntry>, now: Timestamp) {
        *self = Self::start(words, now);
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record whether the current word was remembered, scheduling from the
    /// level the store holds now. The update is persisted before the pass
    /// moves on; on a store error the same word stays current.
    ///
    /// Returns `None` when the current word was deleted or is no longer due
    /// at `now`; it is dropped from the pass and nothing is written.
    pub fn answer<S: WordStore + ?Sized>(
        &mut self,
        remembered: bool,
        now: Timestamp,
        store: &mut S,
    ) -> Result<Option<MasteryUpdate>, VocabError> {
        let id = self
            .current()
            .map(|w| w.id)
            .ok_or(VocabError::InvalidTransition {
                command: "answer a review",
                phase: "complete",
            })?;
        let Some(stored) = store.get(id)?.filter(|w| w.is_due(now)) else {
            self.pending.remove(0);
            return Ok(None);
        };
        let update = schedule(id, stored.mastery, remembered, now);
        store.update_mastery(&update)?;
        self.pending.remove(0);
        self.done.push(id);
        Ok(Some(update))
    }
}

fn due_words(words: Vec<WordEntry>, now: Timestamp, exclude: &[WordId]) -> Vec<WordEntry> {
    let mut due: Vec<WordEntry> = words
        .into_iter()
        .filter(|w| w.is_due(now) && !exclude.contains(&w.id))
        .collect();
    due.sort_by(|a, b| {
        a.next_review
            .cmp(&b.next_review)
            .then_with(|| a.word.to_lowercase().cmp(&b.word.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
    due
}
