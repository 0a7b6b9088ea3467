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

use clap::ValueEnum;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::stats::CollectionStats;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;

use crate::config::Config;
use crate::db::Database;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// Human-readable text.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(config: &Config, format: StatsFormat) -> Fallible<()> {
    let db = Database::new(&config.database)?;
    let words = db.list_all()?;
    let stats = CollectionStats::compute(&words, Timestamp::now());
    println!("{}", render_stats(&stats, format)?);
    Ok(())
}

pub fn render_stats(stats: &CollectionStats, format: StatsFormat) -> Fallible<String> {
    match format {
        StatsFormat::Text => Ok(format!(
            "Total words: {}\nMastered:    {}\nLearning:    {}\nNew:         {}\nDue now:     {}",
            stats.total, stats.mastered, stats.learning, stats.new, stats.due
        )),
        StatsFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}
