// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the TTYML client
//!
//! One request per document. The client hands the response to a
//! [`ResponseHandler`] as header lines followed by body chunks.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, ResponseHandler};
pub use request::{parse_method, Request};
pub use response::ResponseHead;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Media type of TTYML documents
pub const TTYML_MEDIA_TYPE: &str = "text/ttyml";

/// Media type of submitted form bodies
pub const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const TTY_COLUMNS: &str = "tty-columns";
    pub const TTY_LINES: &str = "tty-lines";
}
