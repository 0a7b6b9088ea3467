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
use vocabmaster_core::error::fail;
use vocabmaster_core::store::WordStore;
use vocabmaster_core::types::word::WordId;

use crate::config::Config;
use crate::db::Database;

pub fn delete_word(config: &Config, id: i64) -> Fallible<()> {
    let mut db = Database::new(&config.database)?;
    let id = WordId::new(id);
    let Some(word) = db.get(id)? else {
        return fail(format!("no word with id {id}."));
    };
    db.delete(id)?;
    log::info!("Deleted word {id}");
    println!("Deleted '{}'.", word.word);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use vocabmaster_core::types::timestamp::Timestamp;

    use super::*;
    use crate::config::GeminiConfig;
    use crate::helper::create_tmp_directory;
    use crate::helper::sample_word;

    fn config_for(database: &Path) -> Config {
        Config {
            database: database.to_path_buf(),
            gemini: GeminiConfig {
                api_key: None,
                model: "m".to_string(),
                endpoint: "http://localhost".to_string(),
            },
        }
    }

    #[test]
    fn test_delete_word() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("words.db");
        let now = Timestamp::try_from("2024-05-01T12:00:00.000")?;
        let id = {
            let mut db = Database::new(&path)?;
            db.create(sample_word("gone"), now)?;
            db.create(sample_word("kept"), now)?.id
        };
        delete_word(&config_for(&path), 1)?;
        let words = Database::new(&path)?.list_all()?;
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].id, id);
        Ok(())
    }

    #[test]
    fn test_delete_missing_word() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let err = delete_word(&config_for(&dir.join("words.db")), 7).unwrap_err();
        assert_eq!(err.to_string(), "error: no word with id 7.");
        Ok(())
    }
}
