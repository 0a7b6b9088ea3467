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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;
use vocabmaster_core::stats::CollectionStats;

use crate::cmd::serve::state::Flash;

/// The pages in the navigation bar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Add,
    Games,
    Review,
    Collection,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Add, Tab::Games, Tab::Review, Tab::Collection];

    pub fn path(&self) -> &'static str {
        match self {
            Tab::Add => "/add",
            Tab::Games => "/games",
            Tab::Review => "/review",
            Tab::Collection => "/collection",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Tab::Add => "Add Word",
            Tab::Games => "Games",
            Tab::Review => "Review",
            Tab::Collection => "Collection",
        }
    }
}

pub fn page_template(
    active: Tab,
    stats: &CollectionStats,
    flash: Option<Flash>,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Vocab Master" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                header {
                    h1 { "Vocab Master" }
                    p.tagline { "Level up your vocabulary with AI-powered learning" }
                    form.shutdown action="/shutdown" method="post" {
                        input #shutdown type="submit" value="Shut down" title="Shut down the server";
                    }
                }
                (dashboard(stats))
                nav {
                    @for tab in Tab::ALL {
                        @if tab == active {
                            a.active href=(tab.path()) { (tab.label()) }
                        } @else {
                            a href=(tab.path()) { (tab.label()) }
                        }
                    }
                }
                @if let Some(flash) = flash {
                    (render_flash(flash))
                }
                main {
                    (body)
                }
            }
        }
    }
}

fn dashboard(stats: &CollectionStats) -> Markup {
    html! {
        div.dashboard {
            (metric("Total Words", stats.total))
            (metric("Mastered", stats.mastered))
            (metric("Learning", stats.learning))
            (metric("New", stats.new))
        }
    }
}

fn metric(label: &str, value: usize) -> Markup {
    html! {
        div.metric {
            span.metric-value { (value) }
            span.metric-label { (label) }
        }
    }
}

fn render_flash(flash: Flash) -> Markup {
    match flash {
        Flash::Success(message) => html! {
            div.flash.success { (message) }
        },
        Flash::Error { message, raw } => html! {
            div.flash.error {
                (message)
                @if let Some(raw) = raw {
                    details {
                        summary { "Raw response" }
                        pre { (raw) }
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_tab() {
        let page = page_template(
            Tab::Review,
            &CollectionStats::default(),
            None,
            html! { p { "body" } },
        )
        .into_string();
        assert!(page.contains(r#"<a class="active" href="/review">Review</a>"#));
        assert!(page.contains(r#"<a href="/games">Games</a>"#));
    }

    #[test]
    fn test_flash_escapes_raw_response() {
        let flash = Flash::Error {
            message: "definition provider error: bad".to_string(),
            raw: Some("<b>not json</b>".to_string()),
        };
        let page = page_template(
            Tab::Add,
            &CollectionStats::default(),
            Some(flash),
            html! {},
        )
        .into_string();
        assert!(page.contains("definition provider error: bad"));
        assert!(page.contains("&lt;b&gt;not json&lt;/b&gt;"));
    }
}
