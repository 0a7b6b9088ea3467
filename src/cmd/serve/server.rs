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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::rng::TinyRng;

use crate::cmd::serve::get::add_handler;
use crate::cmd::serve::get::collection_handler;
use crate::cmd::serve::get::games_handler;
use crate::cmd::serve::get::review_handler;
use crate::cmd::serve::get::root_handler;
use crate::cmd::serve::post::add_action;
use crate::cmd::serve::post::collection_action;
use crate::cmd::serve::post::games_action;
use crate::cmd::serve::post::review_action;
use crate::cmd::serve::post::shutdown_action;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::config::GeminiConfig;
use crate::db::Database;
use crate::gemini::GeminiClient;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::clock_seed;

pub struct ServerConfig {
    pub database: PathBuf,
    pub gemini: GeminiConfig,
    pub host: String,
    pub port: u16,
    /// Seed for question generation. By default, taken from the clock.
    pub seed: Option<u64>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let db = Database::new(&config.database)?;

    let gemini = match GeminiClient::new(&config.gemini) {
        Ok(client) => Some(client),
        Err(e) => {
            log::warn!("Word lookup is disabled: {}", e.message());
            None
        }
    };

    let seed = config.seed.unwrap_or_else(clock_seed);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        gemini,
        mutable: Arc::new(Mutex::new(MutableState::new(
            db,
            TinyRng::from_seed(seed),
        ))),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(root_handler));
    let app = app.route("/add", get(add_handler).post(add_action));
    let app = app.route("/games", get(games_handler).post(games_action));
    let app = app.route("/review", get(review_handler).post(review_action));
    let app = app.route(
        "/collection",
        get(collection_handler).post(collection_action),
    );
    let app = app.route("/shutdown", post(shutdown_action));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or shutdown button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    log::info!("Serving on http://{bind}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;
    Ok(())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
