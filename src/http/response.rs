// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response status line and header parsing

use super::{headers, TTYML_MEDIA_TYPE};
use crate::error::{Error, Result};

/// Charset assumed when the server names none
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Status and content metadata of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// HTTP major version
    pub version_major: u32,
    /// HTTP minor version
    pub version_minor: u32,
    /// Status code, 0 until the status line has been seen
    pub status_code: u16,
    /// Reason phrase
    pub status_message: String,
    /// Lower-cased media type from `content-type`
    pub mime_type: String,
    /// Charset from `content-type`, lower-cased
    pub charset: String,
    status_seen: bool,
}

impl Default for ResponseHead {
    fn default() -> Self {
        Self {
            version_major: 1,
            version_minor: 0,
            status_code: 0,
            status_message: String::new(),
            mime_type: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            status_seen: false,
        }
    }
}

impl ResponseHead {
    /// Create an empty response head
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the status line has been parsed
    pub fn has_status(&self) -> bool {
        self.status_seen
    }

    /// Feed one header line.
    ///
    /// The first non-empty line must be the status line; later lines are
    /// `key: value` headers. Only `content-type` is interpreted.
    pub fn put_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }

        if !self.status_seen {
            return self.put_status_line(line);
        }

        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.to_ascii_lowercase(), value.trim_start()),
            None => (line.to_ascii_lowercase(), ""),
        };

        if key == headers::CONTENT_TYPE {
            self.put_content_type(value)?;
        }

        Ok(())
    }

    fn put_status_line(&mut self, line: &str) -> Result<()> {
        let parsed = parse_status_line(line).ok_or_else(|| Error::bad_status(line))?;

        self.version_major = parsed.0;
        self.version_minor = parsed.1;
        self.status_code = parsed.2;
        self.status_message = parsed.3.to_string();
        self.status_seen = true;

        tracing::debug!(
            status = self.status_code,
            message = %self.status_message,
            "Response status"
        );

        Ok(())
    }

    fn put_content_type(&mut self, value: &str) -> Result<()> {
        let mut params = value.split(';').map(str::trim);

        let Some(mime_type) = params.next() else {
            return Ok(());
        };
        self.mime_type = mime_type.to_ascii_lowercase();

        for param in params {
            let param = param.to_ascii_lowercase();
            if let Some(charset) = param.strip_prefix("charset=") {
                self.charset = charset.trim_matches('"').to_string();
            }
        }

        if self.mime_type != TTYML_MEDIA_TYPE {
            return Err(Error::UnsupportedMediaType(value.to_string()));
        }

        Ok(())
    }
}

/// Split `HTTP/<major>.<minor> <code> <message>`.
fn parse_status_line(line: &str) -> Option<(u32, u32, u16, &str)> {
    let rest = line.strip_prefix("HTTP/")?;

    let (version, rest) = rest.split_once(|c: char| c.is_ascii_whitespace())?;
    let (major, minor) = version.split_once('.')?;
    let major = parse_number(major)?;
    let minor = parse_number(minor)?;

    let rest = rest.trim_start();
    let code_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let code = rest[..code_end].parse().ok()?;
    let message = rest[code_end..].trim_start();

    Some((major, minor, code, message))
}

fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
