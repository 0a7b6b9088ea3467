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

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use vocabmaster_core::error::ErrorReport;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::error::VocabError;
use vocabmaster_core::provider::Definition;
use vocabmaster_core::provider::definition_prompt;
use vocabmaster_core::provider::parse_definition;

use crate::config::GeminiConfig;

const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// The concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Asks Gemini for the definitions of a word.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Fallible<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ErrorReport::new(
                "no Gemini API key configured: set GEMINI_API_KEY or gemini_api_key in vocabmaster.toml",
            )
        })?;
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| ErrorReport::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub async fn define(&self, word: &str) -> Result<Definition, VocabError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let payload = json!({
            "contents": [{ "parts": [{ "text": definition_prompt(word) }] }]
        });
        log::debug!("Requesting a definition of '{word}' from {}", self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| VocabError::provider(format!("request failed: {e}"), None))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VocabError::provider(format!("failed to read response: {e}"), None))?;
        if !status.is_success() {
            log::warn!("Gemini returned HTTP {status}");
            return Err(VocabError::provider(format!("HTTP {status}"), Some(body)));
        }
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            VocabError::provider(format!("unexpected response shape: {e}"), Some(body.clone()))
        })?;
        let text = parsed
            .text()
            .ok_or_else(|| VocabError::provider("response has no text", Some(body.clone())))?;
        parse_definition(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::StubReply;
    use crate::helper::start_gemini_stub;

    const GOOD: &str =
        r#"{"meanings": ["formal", "simple", "creative"], "examples": "A cat sat."}"#;

    async fn client_for(reply: StubReply) -> Fallible<GeminiClient> {
        let endpoint = start_gemini_stub(reply).await?;
        GeminiClient::new(&GeminiConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-test".to_string(),
            endpoint,
        })
    }

    #[test]
    fn test_missing_key() {
        let config = GeminiConfig {
            api_key: None,
            model: "m".to_string(),
            endpoint: "http://localhost".to_string(),
        };
        assert!(GeminiClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_define() -> Fallible<()> {
        let client = client_for(StubReply::text(GOOD)).await?;
        let def = client.define("cat").await?;
        assert_eq!(def.meanings.formal(), "formal");
        assert_eq!(def.examples, "A cat sat.");
        Ok(())
    }

    #[tokio::test]
    async fn test_define_fenced() -> Fallible<()> {
        let client = client_for(StubReply::text(&format!("```json\n{GOOD}\n```"))).await?;
        let def = client.define("cat").await?;
        assert_eq!(def.meanings.simple(), "simple");
        Ok(())
    }

    #[tokio::test]
    async fn test_define_malformed() -> Fallible<()> {
        let client = client_for(StubReply::text("I am not JSON")).await?;
        let err = client.define("cat").await.unwrap_err();
        assert!(matches!(err, VocabError::Provider { .. }));
        assert_eq!(err.raw_response(), Some("I am not JSON"));
        Ok(())
    }

    #[tokio::test]
    async fn test_define_http_error() -> Fallible<()> {
        let client = client_for(StubReply::status(500, "quota exceeded")).await?;
        let err = client.define("cat").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "definition provider error: HTTP 500 Internal Server Error"
        );
        assert_eq!(err.raw_response(), Some("quota exceeded"));
        Ok(())
    }

    #[tokio::test]
    async fn test_define_no_candidates() -> Fallible<()> {
        let client = client_for(StubReply::raw(r#"{"candidates": []}"#)).await?;
        let err = client.define("cat").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "definition provider error: response has no text"
        );
        Ok(())
    }
}
