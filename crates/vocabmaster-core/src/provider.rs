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

//! The definition provider's prompt and the parsing of its replies. The
//! network call itself lives with the caller.

use serde::Deserialize;

use crate::error::VocabError;
use crate::types::word::Meanings;

/// What the provider returns for a word.
#[derive(Clone, PartialEq, Debug)]
pub struct Definition {
    pub meanings: Meanings,
    pub examples: String,
}

#[derive(Deserialize)]
struct RawDefinition {
    meanings: Vec<String>,
    examples: String,
}

pub fn definition_prompt(word: &str) -> String {
    format!(
        r#"You are a dictionary API. Define '{word}'.
You must return VALID JSON only. No markdown, no backticks.
Format:
{{
    "meanings": ["Formal definition", "Simple definition", "Creative definition"],
    "examples": "Two example sentences using this word."
}}"#
    )
}

/// Parse a provider reply. Replies wrapped in Markdown code fences are
/// accepted. Anything that is not exactly three meanings plus an examples
/// string is an error that keeps the raw reply.
pub fn parse_definition(raw: &str) -> Result<Definition, VocabError> {
    let text = raw.replace("```json", "").replace("```", "");
    let text = text.trim();
    let parsed: RawDefinition = serde_json::from_str(text).map_err(|e| {
        VocabError::provider(
            format!("response is not a valid definition: {e}"),
            Some(raw.to_string()),
        )
    })?;
    let meanings = Meanings::try_from(parsed.meanings)
        .map_err(|e| VocabError::provider(e.message().to_string(), Some(raw.to_string())))?;
    Ok(Definition {
        meanings,
        examples: parsed.examples,
    })
}
