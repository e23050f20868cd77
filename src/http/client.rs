// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Version};

use super::request::Request;
use super::{headers, DEFAULT_USER_AGENT, TTYML_MEDIA_TYPE};
use crate::error::{Error, Result};
use crate::tty::{terminal_size, TerminalSize};

/// Receiver of a response, one header line or body chunk at a time.
///
/// Returning `false` stops the transfer; the remaining data is dropped.
pub trait ResponseHandler {
    /// Status line first, then one `name: value` line per header
    fn on_header(&mut self, line: &str) -> bool;

    /// Body bytes in arrival order, after content decoding
    fn on_body(&mut self, chunk: &[u8]) -> bool;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Send `Tty-Columns` and `Tty-Lines` when stdout is a terminal
    pub send_terminal_size: bool,
    /// Size to report instead of querying stdout
    pub terminal_size: Option<TerminalSize>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(headers::ACCEPT, HeaderValue::from_static(TTYML_MEDIA_TYPE));

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            default_headers,
            proxy: None,
            send_terminal_size: true,
            terminal_size: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable/disable the terminal size headers
    pub fn send_terminal_size(mut self, enabled: bool) -> Self {
        self.send_terminal_size = enabled;
        self
    }

    /// Report a fixed terminal size
    pub fn terminal_size(mut self, size: TerminalSize) -> Self {
        self.terminal_size = Some(size);
        self
    }
}

/// HTTP client for TTYML documents
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::transport(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Perform a request, streaming the response into `handler`.
    ///
    /// Returns once the body is exhausted or the handler declines more data.
    pub async fn perform(&self, request: Request, handler: &mut dyn ResponseHandler) -> Result<()> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if self.config.send_terminal_size {
            if let Some(size) = self.config.terminal_size.or_else(terminal_size) {
                for (name, value) in terminal_size_headers(size) {
                    builder = builder.header(name, value);
                }
            }
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "Request");

        let mut response = builder.send().await?;

        if !handler.on_header(&status_line(response.version(), response.status())) {
            return Ok(());
        }

        for (name, value) in response.headers() {
            let line = format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
            if !handler.on_header(&line) {
                return Ok(());
            }
        }

        while let Some(chunk) = response.chunk().await? {
            tracing::trace!(len = chunk.len(), "Body chunk");
            if !handler.on_body(&chunk) {
                return Ok(());
            }
        }

        Ok(())
    }
}

/// Render the status line as it appeared on the wire
fn status_line(version: Version, status: reqwest::StatusCode) -> String {
    let version = match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    };
    format!(
        "HTTP/{} {} {}",
        version,
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
}

/// Headers describing the terminal; zero dimensions are left out
fn terminal_size_headers(size: TerminalSize) -> Vec<(&'static str, String)> {
    let mut result = Vec::with_capacity(2);
    if size.columns > 0 {
        result.push((headers::TTY_COLUMNS, size.columns.to_string()));
    }
    if size.lines > 0 {
        result.push((headers::TTY_LINES, size.lines.to_string()));
    }
    result
}
