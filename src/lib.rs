// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # ttyml - Terminal client for TTYML documents
//!
//! TTYML is a small XML vocabulary for terminal applications served over
//! HTTP. A document prints styled lines and may carry a form whose prompts
//! are answered on the terminal; submitting the form fetches the next
//! document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::io;
//!
//! use ttyml::{HttpClient, Session, StdinReader};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> ttyml::Result<()> {
//!     let client = HttpClient::new()?;
//!     let mut session = Session::new(client, StdinReader::new(), io::stdout(), io::stderr());
//!     session.run("https://example.org/menu").await
//! }
//! ```

pub mod address;
pub mod cli;
pub mod document;
pub mod error;
pub mod http;
pub mod session;
pub mod tty;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, ResponseHandler, ResponseHead};

// Documents
pub use document::{DocumentParser, ElementKind, Form, Prompt, Submission, Variable, XmlFeed};

// Sessions
pub use session::{Context, LineReader, ScriptedInput, Session, StdinReader};

// Terminal
pub use tty::{Style, Writer};

/// ttyml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
