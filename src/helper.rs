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

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use portpicker::pick_unused_port;
use serde_json::json;
use tempfile::tempdir;
use tokio::net::TcpListener;
use tokio::spawn;
use vocabmaster_core::error::ErrorReport;
use vocabmaster_core::error::Fallible;
use vocabmaster_core::types::word::Meanings;
use vocabmaster_core::types::word::NewWord;

use crate::utils::wait_for_server;

const STUB_HOST: &str = "127.0.0.1";

pub fn create_tmp_directory() -> Fallible<PathBuf> {
    Ok(tempdir()?.keep())
}

pub fn sample_word(word: &str) -> NewWord {
    NewWord::new(
        word,
        Meanings::new(
            format!("formal meaning of {word}"),
            format!("simple meaning of {word}"),
            format!("creative meaning of {word}"),
        ),
        format!("The {word} was everywhere. Nobody expected the {word}."),
        None,
    )
}

/// What the stub Gemini endpoint replies with.
#[derive(Clone)]
pub struct StubReply {
    status: u16,
    body: String,
}

impl StubReply {
    /// A successful reply whose single candidate carries `text`.
    pub fn text(text: &str) -> Self {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        Self::raw(&body.to_string())
    }

    /// A successful reply with this exact body.
    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Serve `reply` to every `generateContent` call. Returns the endpoint to
/// configure the client with.
pub async fn start_gemini_stub(reply: StubReply) -> Fallible<String> {
    let port = pick_unused_port().ok_or_else(|| ErrorReport::new("no free port"))?;
    let status = StatusCode::from_u16(reply.status)
        .map_err(|e| ErrorReport::new(format!("bad status: {e}")))?;
    let body = reply.body;
    let app = Router::new().route(
        "/models/{*rest}",
        post(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    let listener = TcpListener::bind(format!("{STUB_HOST}:{port}")).await?;
    spawn(async move { axum::serve(listener, app).await });
    wait_for_server(STUB_HOST, port).await?;
    Ok(format!("http://{STUB_HOST}:{port}"))
}

/// A rendered response, as seen by the browser.
pub struct Page {
    pub status: reqwest::StatusCode,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: String,
}

/// A browser stand-in for the end to end tests. Redirects are followed
/// unless the client was built with `without_redirects`.
pub struct Browser {
    base: String,
    port: u16,
    client: reqwest::Client,
}

impl Browser {
    pub fn new(host: &str, port: u16) -> Fallible<Self> {
        Self::build(host, port, reqwest::redirect::Policy::default())
    }

    pub fn without_redirects(host: &str, port: u16) -> Fallible<Self> {
        Self::build(host, port, reqwest::redirect::Policy::none())
    }

    fn build(host: &str, port: u16, policy: reqwest::redirect::Policy) -> Fallible<Self> {
        let client = reqwest::Client::builder()
            .redirect(policy)
            .build()
            .map_err(http_error)?;
        Ok(Self {
            base: format!("http://{host}:{port}"),
            port,
            client,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn get(&self, path: &str) -> Fallible<Page> {
        let response = self
            .client
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .map_err(http_error)?;
        read_page(response).await
    }

    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Fallible<Page> {
        let response = self
            .client
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await
            .map_err(http_error)?;
        read_page(response).await
    }
}

async fn read_page(response: reqwest::Response) -> Fallible<Page> {
    let header = |name: reqwest::header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let status = response.status();
    let content_type = header(reqwest::header::CONTENT_TYPE);
    let location = header(reqwest::header::LOCATION);
    let body = response.text().await.map_err(http_error)?;
    Ok(Page {
        status,
        content_type,
        location,
        body,
    })
}

fn http_error(e: reqwest::Error) -> ErrorReport {
    ErrorReport::new(format!("HTTP error: {e}"))
}
