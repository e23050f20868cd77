// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the TTYML client
//!
//! Errors fall into two groups. Per-request failures (transport, status,
//! media type, document, attribute) are recoverable at the form loop: the user
//! is told and asked to fill the form again. Everything else ends the session.

use thiserror::Error;

/// Result type alias for TTYML operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the TTYML client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure that is not a `reqwest` error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Status line could not be parsed
    #[error("invalid status header: '{0}'")]
    BadStatus(String),

    /// Server sent something other than TTYML
    #[error("server responded with unsupported content type '{0}'")]
    UnsupportedMediaType(String),

    /// XML parse error or missing required attribute
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Style attribute with a non-conforming value
    #[error("invalid value '{value}' for attribute '{attribute}'")]
    BadAttribute { attribute: String, value: String },

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Logic(String),

    /// I/O error (standard output, terminal input)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line
    #[error("{0}")]
    Usage(String),
}

impl Error {
    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a bad-status error from the offending line
    pub fn bad_status<S: Into<String>>(line: S) -> Self {
        Error::BadStatus(line.into())
    }

    /// Create a malformed-document error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedDocument(msg.into())
    }

    /// Create a bad-attribute error
    pub fn bad_attribute(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Error::BadAttribute {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a logic error
    pub fn logic<S: Into<String>>(msg: S) -> Self {
        Error::Logic(msg.into())
    }

    /// Create a usage error
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        Error::Usage(msg.into())
    }

    /// Check if the request never completed
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Url(_) | Error::Transport(_))
    }

    /// Check if this is recoverable (the form can be submitted again)
    pub fn is_recoverable(&self) -> bool {
        self.is_transport()
            || matches!(
                self,
                Error::BadStatus(_)
                    | Error::UnsupportedMediaType(_)
                    | Error::MalformedDocument(_)
                    | Error::BadAttribute { .. }
            )
    }
}
