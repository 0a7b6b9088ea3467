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
use vocabmaster_core::error::VocabError;
use vocabmaster_core::error::fail;
use vocabmaster_core::provider::Definition;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;
use vocabmaster_core::types::word::NewWord;
use vocabmaster_core::types::word::WordEntry;

use crate::config::Config;
use crate::db::Database;
use crate::gemini::GeminiClient;

/// Define `word` through Gemini, save it, and print what was saved.
pub async fn add_word(config: &Config, word: &str, note: Option<String>) -> Fallible<()> {
    let word = word.trim();
    if word.is_empty() {
        return fail("the word must not be empty.");
    }
    let client = GeminiClient::new(&config.gemini)?;
    let definition = match client.define(word).await {
        Ok(definition) => definition,
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                log::warn!("Raw provider response: {raw}");
            }
            return Err(e.into());
        }
    };
    let mut db = Database::new(&config.database)?;
    let entry = save_definition(&mut db, word, definition, note, Timestamp::now())?;
    log::info!("Saved '{}' with id {}", entry.word, entry.id);
    print!("{}", render_entry(&entry));
    Ok(())
}

/// Store a definition the provider returned. New words start at level 0,
/// due immediately.
pub fn save_definition<S: WordStore + ?Sized>(
    store: &mut S,
    word: &str,
    definition: Definition,
    note: Option<String>,
    now: Timestamp,
) -> Result<WordEntry, VocabError> {
    let new = NewWord::new(word, definition.meanings, definition.examples, note);
    store.create(new, now)
}

pub fn render_entry(entry: &WordEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} (#{})\n", entry.word, entry.id));
    out.push_str(&format!("  Formal:   {}\n", entry.meanings.formal()));
    out.push_str(&format!("  Simple:   {}\n", entry.meanings.simple()));
    out.push_str(&format!("  Creative: {}\n", entry.meanings.creative()));
    out.push_str(&format!("  Examples: {}\n", entry.examples));
    if let Some(note) = &entry.note {
        out.push_str(&format!("  Note:     {note}\n"));
    }
    out
}
