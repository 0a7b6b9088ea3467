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

use std::process::exit;

use clap::Args;
use clap::Parser;
use tokio::spawn;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::stats::MasteryFilter;

use crate::cmd::add::add_word;
use crate::cmd::delete::delete_word;
use crate::cmd::list::list_words;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Learn through a web interface: add words, play games, and review.
    Serve {
        #[command(flatten)]
        store: StoreArgs,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Look up a word with Gemini and add it to the collection.
    Add {
        /// The word to add.
        word: String,
        /// A personal note to keep with the word.
        #[arg(long)]
        note: Option<String>,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// List the words in the collection.
    List {
        /// Only list words at this mastery tier.
        #[arg(long, default_value_t = MasteryFilter::All, value_parser = parse_filter)]
        filter: MasteryFilter,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Delete a word from the collection.
    Delete {
        /// The id of the word, as shown by `list`.
        id: i64,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Print collection statistics.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Path to the config file. By default, `vocabmaster.toml` in the current directory is used if it exists.
    #[arg(long)]
    config: Option<String>,
    /// Path to the SQLite database. Overrides the config file and `VOCABMASTER_DATABASE`.
    #[arg(long)]
    database: Option<String>,
}

impl StoreArgs {
    fn load(self) -> Fallible<Config> {
        Config::load(self.config, self.database)
    }
}

fn parse_filter(value: &str) -> Result<MasteryFilter, String> {
    MasteryFilter::try_from(value).map_err(|e| e.message().to_string())
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            store,
            host,
            port,
            open_browser,
        } => {
            let config = store.load()?;
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                database: config.database,
                gemini: config.gemini,
                host,
                port,
                seed: None,
            };
            start_server(config).await
        }
        Command::Add { word, note, store } => add_word(&store.load()?, &word, note).await,
        Command::List { filter, store } => list_words(&store.load()?, filter),
        Command::Delete { id, store } => delete_word(&store.load()?, id),
        Command::Stats { format, store } => print_stats(&store.load()?, format),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Command::try_parse_from(["vocabmaster", "list", "--filter", "learning"]).unwrap();
        match cli {
            Command::List { filter, store } => {
                assert_eq!(filter, MasteryFilter::Learning);
                assert_eq!(store.database, None);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_bad_filter() {
        let result = Command::try_parse_from(["vocabmaster", "list", "--filter", "expert"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_stats_json() {
        let cli = Command::try_parse_from([
            "vocabmaster",
            "stats",
            "--format",
            "json",
            "--database",
            "words.db",
        ])
        .unwrap();
        match cli {
            Command::Stats { format, store } => {
                assert_eq!(format, StatsFormat::Json);
                assert_eq!(store.database.as_deref(), Some("words.db"));
            }
            _ => panic!("expected stats"),
        }
    }
}
