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

//! The mastery ladder: a correct answer climbs one level and pushes the next
//! review further out, a wrong answer drops the word back to level 0.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;

/// Review delay in days, indexed by mastery level.
pub const INTERVALS: [u32; 6] = [0, 1, 3, 7, 14, 30];

/// The highest mastery level. Levels never exceed this.
pub const MAX_LEVEL: u32 = (INTERVALS.len() - 1) as u32;

/// The outcome of one step on the ladder.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Advance {
    pub level: u32,
    pub delay_days: u32,
}

pub fn advance(current_level: u32, remembered: bool) -> Advance {
    if remembered {
        let level = current_level.saturating_add(1).min(MAX_LEVEL);
        Advance {
            level,
            delay_days: INTERVALS[level as usize],
        }
    } else {
        Advance {
            level: 0,
            delay_days: 0,
        }
    }
}

/// A new level and due instant for one word. Persisted as a unit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MasteryUpdate {
    pub id: WordId,
    pub level: u32,
    pub next_review: Timestamp,
}

pub fn schedule(id: WordId, current_level: u32, remembered: bool, now: Timestamp) -> MasteryUpdate {
    let Advance { level, delay_days } = advance(current_level, remembered);
    MasteryUpdate {
        id,
        level,
        next_review: now.plus_days(delay_days),
    }
}

/// Coarse buckets of mastery, as shown on the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MasteryTier {
    /// Level 0.
    New,
    /// Levels 1 to 3.
    Learning,
    /// Level 4 and up.
    Mastered,
}

impl MasteryTier {
    pub fn of(level: u32) -> Self {
        match level {
            0 => MasteryTier::New,
            1..=3 => MasteryTier::Learning,
            _ => MasteryTier::Mastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryTier::New => "new",
            MasteryTier::Learning => "learning",
            MasteryTier::Mastered => "mastered",
        }
    }
}

impl Display for MasteryTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
