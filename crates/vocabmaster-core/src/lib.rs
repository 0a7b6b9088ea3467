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

//! vocabmaster-core: the parts of vocabmaster that carry real logic.
//!
//! - The mastery scheduler, which decides when a word is next due
//! - The quiz session engine behind the three games
//! - Review passes over due words, and collection statistics
//! - Parsing of definition provider replies
//!
//! Nothing here touches the network, the disk, or the clock (unless the
//! `clock` feature is enabled).

pub mod error;
pub mod provider;
pub mod quiz;
pub mod review;
pub mod rng;
pub mod scheduler;
pub mod stats;
pub mod store;
pub mod types;

#[cfg(test)]
mod helper;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, VocabError, fail};
pub use quiz::mode::GameMode;
pub use quiz::question::{Answer, Question};
pub use quiz::session::{AnswerReport, FinalScore, Phase, SessionState};
pub use review::ReviewSession;
pub use scheduler::{MasteryTier, MasteryUpdate, advance, schedule};
pub use store::{MemoryStore, WordStore};
pub use types::timestamp::Timestamp;
pub use types::word::{Meanings, NewWord, WordEntry, WordId};
