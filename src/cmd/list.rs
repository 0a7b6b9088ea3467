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

use vocabmaster_core::error::Fallible;
use vocabmaster_core::scheduler::MasteryTier;
use vocabmaster_core::stats::MasteryFilter;
use vocabmaster_core::stats::collection_view;
use vocabmaster_core::stats::days_until_review;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;
use vocabmaster_core::types::word::WordEntry;

use crate::config::Config;
use crate::db::Database;
use crate::utils::plural;

pub fn list_words(config: &Config, filter: MasteryFilter) -> Fallible<()> {
    let db = Database::new(&config.database)?;
    let words = db.list_all()?;
    print!("{}", render_list(&words, filter, Timestamp::now()));
    Ok(())
}

/// One line per word: id, word, level, tier, and when it is next due.
pub fn render_list(words: &[WordEntry], filter: MasteryFilter, now: Timestamp) -> String {
    let view = collection_view(words, filter);
    if view.is_empty() {
        return format!("No words in '{}'.\n", filter.label());
    }
    let width = view.iter().map(|w| w.word.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for word in view {
        let due = match days_until_review(word, now) {
            None => "due now".to_string(),
            Some(0) => "due today".to_string(),
            Some(days) => format!("due in {}", plural(days as usize, "day")),
        };
        out.push_str(&format!(
            "{:>4}  {:<width$}  level {} ({})  {}\n",
            word.id.get(),
            word.word,
            word.mastery,
            MasteryTier::of(word.mastery),
            due,
        ));
    }
    out
}
