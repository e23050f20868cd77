// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL decomposition and relative resolution

use std::fmt;

use super::path::normalize_path;

/// The textual parts of a URL.
///
/// Concatenating the parts in order reproduces the URL (modulo case folding
/// and the implicit `/` path).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme including the trailing `:`, lower-cased
    pub scheme: String,
    /// Authority including the leading `//`; may contain userinfo
    pub host: String,
    /// Path including any `?query`
    pub path: String,
    /// Fragment including the leading `#`
    pub fragment: String,
}

impl UrlParts {
    /// Create from already separated parts
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
            fragment: fragment.into(),
        }
    }

    /// Split a URL into its parts.
    ///
    /// If the authority is present but the path is empty, as in
    /// `http://www.example.org`, the path is `/`.
    pub fn parse(url: &str) -> Self {
        let mut result = Self::default();
        let mut rest = url;

        if let Some(end) = scheme_end(url) {
            result.scheme = url[..=end].to_ascii_lowercase();
            rest = &url[end + 1..];
        }

        if let Some(start) = rest.find('#') {
            result.fragment = rest[start..].to_string();
            rest = &rest[..start];
        }

        if rest.starts_with("//") {
            let host_end = rest[2..]
                .find(|c| c == '/' || c == '?')
                .map(|i| i + 2)
                .unwrap_or(rest.len());

            let host = &rest[..host_end];
            result.host = match host.find('@') {
                Some(at) => format!("{}{}", &host[..at], host[at..].to_ascii_lowercase()),
                None => host.to_ascii_lowercase(),
            };

            rest = &rest[host_end..];
            if rest.is_empty() || rest.starts_with('?') {
                result.path.push('/');
            }
        }

        result.path.push_str(rest);
        result
    }

    /// Path without its `?query`
    pub fn path_only(&self) -> &str {
        match self.path.find('?') {
            Some(query) => &self.path[..query],
            None => &self.path,
        }
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.scheme, self.host, self.path, self.fragment)
    }
}

/// Index of the `:` ending a syntactically valid scheme, if any.
fn scheme_end(url: &str) -> Option<usize> {
    let colon = url.find(':')?;
    let scheme = &url[..colon];
    let mut chars = scheme.chars();

    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(colon)
    } else {
        None
    }
}

/// Resolve a possibly relative URL against an absolute base URL.
///
/// Relative paths are appended to the base path as if it were a directory,
/// then `.` and `..` segments are collapsed. A URL that already carries both
/// scheme and host is returned unchanged.
///
/// The base's `?query` is not part of the directory: `y` against
/// `http://h/x?q=old` gives `http://h/x/y`, and `?new` replaces the query.
pub fn normalize(url: &str, base: &str) -> String {
    let base_parts = UrlParts::parse(base);
    let mut parts = UrlParts::parse(url);

    if parts.path.is_empty() {
        return UrlParts::new(
            base_parts.scheme,
            base_parts.host,
            base_parts.path,
            parts.fragment,
        )
        .to_string();
    }

    if parts.path.starts_with('?') {
        parts.path = format!("{}{}", base_parts.path_only(), parts.path);
    } else if !parts.path.starts_with('/') {
        let mut path = format!("{}/{}", base_parts.path_only(), parts.path);
        if path.ends_with("/.") || path.ends_with("/..") {
            path.push('/');
        }
        parts.path = normalize_path(&path);
    }

    if parts.host.is_empty() {
        return UrlParts::new(base_parts.scheme, base_parts.host, parts.path, parts.fragment)
            .to_string();
    }

    if parts.scheme.is_empty() {
        return UrlParts::new(base_parts.scheme, parts.host, parts.path, parts.fragment)
            .to_string();
    }

    url.to_string()
}
