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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// A general-purpose error carrying a human-readable message.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<VocabError> for ErrorReport {
    fn from(value: VocabError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// The errors the core reports to its caller. All of them are recoverable:
/// the user is shown the error and may retry the action that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum VocabError {
    /// The definition provider failed or returned content we could not parse.
    Provider {
        message: String,
        /// The raw provider response, kept for diagnostics.
        raw: Option<String>,
    },
    /// Reading from or writing to the word store failed.
    Store(String),
    /// A game was started with too few words.
    InsufficientPool { required: usize, available: usize },
    /// A command was issued in a phase that does not accept it.
    InvalidTransition {
        command: &'static str,
        phase: &'static str,
    },
}

impl VocabError {
    pub fn provider(message: impl Into<String>, raw: Option<String>) -> Self {
        VocabError::Provider {
            message: message.into(),
            raw,
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        VocabError::Store(message.into())
    }

    /// The raw provider response, if this error carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            VocabError::Provider { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }
}

impl Display for VocabError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabError::Provider { message, .. } => write!(f, "definition provider error: {message}"),
            VocabError::Store(message) => write!(f, "store error: {message}"),
            VocabError::InsufficientPool {
                required,
                available,
            } => write!(
                f,
                "not enough words: this game needs at least {required}, but the collection has {available}"
            ),
            VocabError::InvalidTransition { command, phase } => {
                write!(f, "cannot {command} while the session is {phase}")
            }
        }
    }
}

impl Error for VocabError {}
