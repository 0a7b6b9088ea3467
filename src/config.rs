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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use vocabmaster_core::error::ErrorReport;
use vocabmaster_core::error::Fallible;

/// The config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "vocabmaster.toml";

pub const DEFAULT_DATABASE: &str = "vocabmaster.db";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The contents of `vocabmaster.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database: Option<String>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    gemini_endpoint: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub gemini: GeminiConfig,
}

impl Config {
    /// Load the configuration. Precedence, highest first: the `database`
    /// argument, the environment, the config file, the defaults.
    pub fn load(config_path: Option<String>, database: Option<String>) -> Fallible<Config> {
        let file = match config_path {
            Some(path) => read_config_file(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    read_config_file(path)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Ok(Config::resolve(
            file,
            |key| std::env::var(key).ok(),
            database,
        ))
    }

    fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
        database: Option<String>,
    ) -> Config {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let database = non_empty(database)
            .or_else(|| non_empty(env("VOCABMASTER_DATABASE")))
            .or(file.database)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let api_key = non_empty(env("GEMINI_API_KEY")).or(non_empty(file.gemini_api_key));
        Config {
            database: PathBuf::from(database),
            gemini: GeminiConfig {
                api_key,
                model: file
                    .gemini_model
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                endpoint: file
                    .gemini_endpoint
                    .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            },
        }
    }
}

fn read_config_file(path: &Path) -> Fallible<ConfigFile> {
    if !path.exists() {
        return Err(ErrorReport::new(format!(
            "config file '{}' does not exist.",
            path.display()
        )));
    }
    let text = read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| {
        ErrorReport::new(format!("failed to parse '{}': {e}", path.display()))
    })?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(file)
}
