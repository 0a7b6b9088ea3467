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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::types::Type;
use vocabmaster_core::error::ErrorReport;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::error::VocabError;
use vocabmaster_core::scheduler::MasteryUpdate;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::timestamp::Timestamp;
use vocabmaster_core::types::word::Meanings;
use vocabmaster_core::types::word::NewWord;
use vocabmaster_core::types::word::WordEntry;
use vocabmaster_core::types::word::WordId;

const SCHEMA: &str = "
create table if not exists words (
    id integer primary key autoincrement,
    word text not null,
    meanings text not null,
    examples text not null,
    note text,
    mastery integer not null default 0,
    next_review text not null,
    created_at text not null
) strict;
";

/// The SQLite word store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`.
    pub fn new(path: impl AsRef<Path>) -> Fallible<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            ErrorReport::new(format!("failed to open database '{}': {e}", path.display()))
        })?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| ErrorReport::new(format!("failed to create schema: {e}")))?;
        log::debug!("Opened database at {}", path.display());
        Ok(Self { conn })
    }
}

impl WordStore for Database {
    fn list_all(&self) -> Result<Vec<WordEntry>, VocabError> {
        let mut stmt = self
            .conn
            .prepare("select * from words order by id")
            .map_err(store_error)?;
        let rows = stmt.query_map([], read_word).map_err(store_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(store_error)
    }

    fn get(&self, id: WordId) -> Result<Option<WordEntry>, VocabError> {
        let mut stmt = self
            .conn
            .prepare("select * from words where id = ?1")
            .map_err(store_error)?;
        let mut rows = stmt
            .query_map(params![id.get()], read_word)
            .map_err(store_error)?;
        rows.next().transpose().map_err(store_error)
    }

    fn create(&mut self, word: NewWord, now: Timestamp) -> Result<WordEntry, VocabError> {
        let meanings: String = serde_json::to_string(&word.meanings)
            .map_err(|e| VocabError::store(format!("failed to encode meanings: {e}")))?;
        self.conn
            .execute(
                "insert into words (word, meanings, examples, note, mastery, next_review, created_at)
                 values (?1, ?2, ?3, ?4, 0, ?5, ?5)",
                params![word.word, meanings, word.examples, word.note, now.to_string()],
            )
            .map_err(store_error)?;
        let id = WordId::new(self.conn.last_insert_rowid());
        log::debug!("Inserted word '{}' with id {id}", word.word);
        Ok(word.into_entry(id, now))
    }

    fn update_mastery(&mut self, update: &MasteryUpdate) -> Result<(), VocabError> {
        let changed = self
            .conn
            .execute(
                "update words set mastery = ?1, next_review = ?2 where id = ?3",
                params![update.level, update.next_review.to_string(), update.id.get()],
            )
            .map_err(store_error)?;
        if changed == 0 {
            return Err(VocabError::store(format!("no word with id {}", update.id)));
        }
        log::debug!(
            "Word {} is now at level {}, next review {}",
            update.id,
            update.level,
            update.next_review
        );
        Ok(())
    }

    fn delete(&mut self, id: WordId) -> Result<(), VocabError> {
        let changed = self
            .conn
            .execute("delete from words where id = ?1", params![id.get()])
            .map_err(store_error)?;
        if changed == 0 {
            return Err(VocabError::store(format!("no word with id {id}")));
        }
        Ok(())
    }
}

fn store_error(e: rusqlite::Error) -> VocabError {
    VocabError::store(format!("database error: {e}"))
}

fn read_word(row: &Row) -> rusqlite::Result<WordEntry> {
    let meanings: String = row.get("meanings")?;
    let meanings: Meanings = serde_json::from_str(&meanings)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let next_review: String = row.get("next_review")?;
    let next_review = Timestamp::try_from(next_review)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(WordEntry {
        id: WordId::new(row.get("id")?),
        word: row.get("word")?,
        meanings,
        examples: row.get("examples")?,
        note: row.get("note")?,
        mastery: row.get("mastery")?,
        next_review,
    })
}
