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

use serde::Serialize;

use crate::error::ErrorReport;
use crate::scheduler::MasteryTier;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordEntry;

/// The counts shown on the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub mastered: usize,
    pub learning: usize,
    pub new: usize,
    pub due: usize,
}

impl CollectionStats {
    pub fn compute(words: &[WordEntry], now: Timestamp) -> Self {
        let mut stats = CollectionStats {
            total: words.len(),
            ..Default::default()
        };
        for word in words {
            match MasteryTier::of(word.mastery) {
                MasteryTier::New => stats.new += 1,
                MasteryTier::Learning => stats.learning += 1,
                MasteryTier::Mastered => stats.mastered += 1,
            }
            if word.is_due(now) {
                stats.due += 1;
            }
        }
        stats
    }
}

/// Which part of the collection to show.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MasteryFilter {
    #[default]
    All,
    New,
    Learning,
    Mastered,
}

impl MasteryFilter {
    pub const ALL: [MasteryFilter; 4] = [
        MasteryFilter::All,
        MasteryFilter::New,
        MasteryFilter::Learning,
        MasteryFilter::Mastered,
    ];

    pub fn matches(&self, level: u32) -> bool {
        match self {
            MasteryFilter::All => true,
            MasteryFilter::New => MasteryTier::of(level) == MasteryTier::New,
            MasteryFilter::Learning => MasteryTier::of(level) == MasteryTier::Learning,
            MasteryFilter::Mastered => MasteryTier::of(level) == MasteryTier::Mastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryFilter::All => "all",
            MasteryFilter::New => "new",
            MasteryFilter::Learning => "learning",
            MasteryFilter::Mastered => "mastered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MasteryFilter::All => "All Words",
            MasteryFilter::New => "New (0)",
            MasteryFilter::Learning => "Learning (1-3)",
            MasteryFilter::Mastered => "Mastered (4-5)",
        }
    }
}

impl Display for MasteryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MasteryFilter {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MasteryFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .ok_or_else(|| ErrorReport::new(format!("invalid filter: {value}")))
    }
}

/// The filtered collection, sorted alphabetically.
pub fn collection_view(words: &[WordEntry], filter: MasteryFilter) -> Vec<&WordEntry> {
    let mut view: Vec<&WordEntry> = words.iter().filter(|w| filter.matches(w.mastery)).collect();
    view.sort_by(|a, b| {
        a.word
            .to_lowercase()
            .cmp(&b.word.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    view
}

/// Whole days until the word is next due, or `None` if it is due now.
pub fn days_until_review(word: &WordEntry, now: Timestamp) -> Option<i64> {
    if word.is_due(now) {
        None
    } else {
        Some(now.days_until(word.next_review))
    }
}
