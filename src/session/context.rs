// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One fetched document

use std::io::Write;

use crate::document::{DocumentParser, Form, XmlFeed};
use crate::error::{Error, Result};
use crate::http::{HttpClient, Request, ResponseHandler, ResponseHead};

/// A document that has been fetched and rendered
#[derive(Debug, Clone)]
pub struct Context {
    url: String,
    head: ResponseHead,
    form: Form,
}

impl Context {
    /// Perform `request` and render the response to `out`.
    ///
    /// Lines are written while the body is still arriving. The returned
    /// context holds the response metadata and the document's form.
    pub async fn open(client: &HttpClient, request: Request, out: &mut dyn Write) -> Result<Self> {
        let url = request.url_str().to_string();

        let mut transfer = Transfer::new(&url, out);
        let result = client.perform(request, &mut transfer).await;
        let (head, form) = transfer.finish(result)?;

        tracing::debug!(
            url = %url,
            prompts = form.prompts.len(),
            variables = form.variables.len(),
            "Document loaded"
        );

        Ok(Self { url, head, form })
    }

    /// URL the document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn has_prompt(&self) -> bool {
        self.form.has_prompt()
    }
}

/// Response state while the transfer runs.
///
/// The first error raised by a header or body callback is kept and stops the
/// transfer; it is reported once the client returns.
struct Transfer<'o> {
    url: String,
    head: ResponseHead,
    parser: DocumentParser<'o>,
    feed: Option<XmlFeed>,
    deferred: Option<Error>,
}

impl<'o> Transfer<'o> {
    fn new(url: &str, out: &'o mut dyn Write) -> Self {
        Self {
            url: url.to_string(),
            head: ResponseHead::new(),
            parser: DocumentParser::new(url, out),
            feed: None,
            deferred: None,
        }
    }

    /// Keep the first error; `false` once one has been kept
    fn capture(&mut self, result: Result<()>) -> bool {
        if self.deferred.is_some() {
            return false;
        }
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "Aborting transfer");
                self.deferred = Some(err);
                false
            }
        }
    }

    fn put(&mut self, chunk: &[u8]) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.ensure_feed()?;
        match self.feed.as_mut() {
            Some(feed) => feed.feed(chunk, &mut self.parser),
            None => Err(Error::logic("XML feed missing")),
        }
    }

    /// Create the XML feed with the charset from the headers
    fn ensure_feed(&mut self) -> Result<()> {
        if self.feed.is_none() {
            self.feed = Some(XmlFeed::new(&self.head.charset, &self.url)?);
        }
        Ok(())
    }

    fn finish(mut self, transport: Result<()>) -> Result<(ResponseHead, Form)> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        transport?;

        self.ensure_feed()?;
        if let Some(feed) = self.feed.as_mut() {
            feed.finish(&mut self.parser)?;
        }

        if !self.parser.is_balanced() {
            return Err(Error::logic("element stack not empty at end of document"));
        }

        Ok((self.head, self.parser.into_form()))
    }
}

impl ResponseHandler for Transfer<'_> {
    fn on_header(&mut self, line: &str) -> bool {
        if self.deferred.is_some() {
            return false;
        }
        let result = self.head.put_line(line);
        self.capture(result)
    }

    fn on_body(&mut self, chunk: &[u8]) -> bool {
        if self.deferred.is_some() {
            return false;
        }
        let result = self.put(chunk);
        self.capture(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &[u8] =
        br#"<ttyml xmlns="https://ttyml.org/2018/05/26"><line>hi</line><form><prompt name="p"/></form></ttyml>"#;

    #[test]
    fn test_transfer_renders_document() {
        let mut out = Vec::new();
        let mut transfer = Transfer::new("http://h/doc", &mut out);

        assert!(transfer.on_header("HTTP/1.1 200 OK"));
        assert!(transfer.on_header("content-type: text/ttyml; charset=utf-8"));
        for chunk in DOC.chunks(5) {
            assert!(transfer.on_body(chunk));
        }

        let (head, form) = transfer.finish(Ok(())).unwrap();
        assert_eq!(head.status_code, 200);
        assert_eq!(form.prompts.len(), 1);
        assert_eq!(out, b"hi\n");
    }

    #[test]
    fn test_first_error_wins() {
        let mut out = Vec::new();
        let mut transfer = Transfer::new("http://h/doc", &mut out);

        assert!(transfer.on_header("HTTP/1.1 200 OK"));
        assert!(!transfer.on_header("content-type: text/html"));
        assert!(!transfer.on_body(b"<not even xml"));

        let err = transfer
            .finish(Err(Error::transport("connection reset")))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_bad_status_stops_transfer() {
        let mut out = Vec::new();
        let mut transfer = Transfer::new("http://h/doc", &mut out);
        assert!(!transfer.on_header("garbage"));
        assert!(matches!(transfer.finish(Ok(())), Err(Error::BadStatus(_))));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let mut out = Vec::new();
        let mut transfer = Transfer::new("http://h/doc", &mut out);
        assert!(transfer.on_header("HTTP/1.1 204 No Content"));
        assert!(matches!(
            transfer.finish(Ok(())),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_transport_error_surfaces() {
        let mut out = Vec::new();
        let transfer = Transfer::new("http://h/doc", &mut out);
        assert!(matches!(
            transfer.finish(Err(Error::transport("timed out"))),
            Err(Error::Transport(_))
        ));
    }
}
