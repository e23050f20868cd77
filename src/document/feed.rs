// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Incremental XML reading
//!
//! Bytes arrive in arbitrary chunks. They are decoded to UTF-8 and queued;
//! the reader is only asked for the next event once all of that event's
//! bytes are queued, so a chunk boundary never looks like end of input.

use std::borrow::Cow;
use std::io::{self, BufRead, Read};

use encoding_rs::{CoderResult, Decoder, Encoding};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::element::NAMESPACE_SEPARATOR;
use crate::error::{Error, Result};

/// Receiver of XML events in document order.
///
/// Element names are expanded: `namespace|local` for namespaced elements,
/// the bare local name otherwise.
pub trait XmlHandler {
    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()>;
    fn end_element(&mut self, name: &str) -> Result<()>;
    fn character_data(&mut self, text: &str) -> Result<()>;
}

/// Attributes of a start tag, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the attribute with this (unprefixed) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Decoded text waiting for the reader, with the position of the read head
#[derive(Debug)]
struct Pending {
    data: Vec<u8>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Pending {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn push(&mut self, text: &str) {
        if self.pos > 0 {
            self.data.drain(..self.pos);
            self.pos = 0;
        }
        self.data.extend_from_slice(text.as_bytes());
    }

    fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }
}

impl Read for Pending {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.remaining();
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for Pending {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.remaining())
    }

    fn consume(&mut self, amt: usize) {
        let end = (self.pos + amt).min(self.data.len());
        for &byte in &self.data[self.pos..end] {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if byte & 0xC0 != 0x80 {
                self.column += 1;
            }
        }
        self.pos = end;
    }
}

/// One reader event, detached from the reader's buffers
enum Parsed {
    Start(String, Attributes),
    Empty(String, Attributes),
    End(String),
    Text(String),
    Ignored,
    Eof,
}

/// Push-style XML parser over a byte stream
pub struct XmlFeed {
    base: String,
    decoder: Decoder,
    reader: NsReader<Pending>,
    buf: Vec<u8>,
    depth: usize,
    root_seen: bool,
    after_text: bool,
}

impl XmlFeed {
    /// Create a feed for a document in `charset`, fetched from `base`
    pub fn new(charset: &str, base: &str) -> Result<Self> {
        let encoding = Encoding::for_label(charset.as_bytes())
            .ok_or_else(|| Error::malformed(format!("{}: unknown encoding '{}'", base, charset)))?;

        let mut reader = NsReader::from_reader(Pending::new());
        reader.config_mut().trim_text(false);

        Ok(Self {
            base: base.to_string(),
            decoder: encoding.new_decoder_with_bom_removal(),
            reader,
            buf: Vec::new(),
            depth: 0,
            root_seen: false,
            after_text: false,
        })
    }

    /// Base URI of the document
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Queue more bytes and deliver every event they complete
    pub fn feed(&mut self, bytes: &[u8], handler: &mut dyn XmlHandler) -> Result<()> {
        let text = self.decode(bytes, false);
        self.reader.get_mut().push(&text);
        self.drain(handler, false)
    }

    /// Signal end of input and deliver the remaining events
    pub fn finish(&mut self, handler: &mut dyn XmlHandler) -> Result<()> {
        let text = self.decode(&[], true);
        self.reader.get_mut().push(&text);
        self.drain(handler, true)?;

        if !self.root_seen {
            return Err(self.error_here("no element found"));
        }
        if self.depth > 0 {
            return Err(self.error_here("unclosed element at end of document"));
        }
        Ok(())
    }

    fn decode(&mut self, mut input: &[u8], last: bool) -> String {
        let mut text = String::new();
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len() * 3 + 16);
            text.reserve(needed);

            let (result, read, _) = self.decoder.decode_to_string(input, &mut text, last);
            input = &input[read..];
            if let CoderResult::InputEmpty = result {
                return text;
            }
        }
    }

    fn drain(&mut self, handler: &mut dyn XmlHandler, eof: bool) -> Result<()> {
        loop {
            if !eof && !event_available(self.reader.get_ref().remaining(), self.after_text) {
                return Ok(());
            }

            let (line, column) = self.position();
            self.buf.clear();

            let parsed = match self.reader.read_resolved_event_into(&mut self.buf) {
                Ok((namespace, event)) => detach(namespace, event),
                Err(err) => Err(err.to_string()),
            };
            let parsed = parsed.map_err(|msg| self.error_at(line, column, &msg))?;

            self.after_text = matches!(parsed, Parsed::Text(_));

            match parsed {
                Parsed::Start(name, attributes) => {
                    self.open_element(line, column)?;
                    handler.start_element(&name, &attributes)?;
                }
                Parsed::Empty(name, attributes) => {
                    self.open_element(line, column)?;
                    handler.start_element(&name, &attributes)?;
                    self.depth -= 1;
                    handler.end_element(&name)?;
                }
                Parsed::End(name) => {
                    if self.depth == 0 {
                        return Err(self.error_at(line, column, "unexpected end tag"));
                    }
                    self.depth -= 1;
                    handler.end_element(&name)?;
                }
                Parsed::Text(text) => {
                    if self.depth == 0 {
                        if !text.trim().is_empty() {
                            return Err(self.error_at(line, column, "text outside document element"));
                        }
                    } else if !text.is_empty() {
                        handler.character_data(&text)?;
                    }
                }
                Parsed::Ignored => {}
                Parsed::Eof => return Ok(()),
            }
        }
    }

    fn open_element(&mut self, line: usize, column: usize) -> Result<()> {
        if self.depth == 0 {
            if self.root_seen {
                return Err(self.error_at(line, column, "junk after document element"));
            }
            self.root_seen = true;
        }
        self.depth += 1;
        Ok(())
    }

    fn position(&self) -> (usize, usize) {
        let pending = self.reader.get_ref();
        (pending.line, pending.column)
    }

    fn error_here(&self, msg: &str) -> Error {
        let (line, column) = self.position();
        self.error_at(line, column, msg)
    }

    fn error_at(&self, line: usize, column: usize, msg: &str) -> Error {
        Error::malformed(format!(
            "{}: line {}, column {}: {}",
            self.base, line, column, msg
        ))
    }
}

/// Copy an event out of the reader's buffers
fn detach(namespace: ResolveResult<'_>, event: Event<'_>) -> std::result::Result<Parsed, String> {
    Ok(match event {
        Event::Start(start) => {
            let name = expanded_name(&namespace, start.local_name().as_ref())?;
            Parsed::Start(name, attributes(&start)?)
        }
        Event::Empty(start) => {
            let name = expanded_name(&namespace, start.local_name().as_ref())?;
            Parsed::Empty(name, attributes(&start)?)
        }
        Event::End(end) => Parsed::End(expanded_name(&namespace, end.local_name().as_ref())?),
        Event::Text(text) => Parsed::Text(text.unescape().map_err(|e| e.to_string())?.into_owned()),
        Event::CData(data) => Parsed::Text(utf8(data.into_inner())?.into_owned()),
        Event::Eof => Parsed::Eof,
        _ => Parsed::Ignored,
    })
}

fn expanded_name(namespace: &ResolveResult<'_>, local: &[u8]) -> std::result::Result<String, String> {
    let local = std::str::from_utf8(local).map_err(|e| e.to_string())?;
    match namespace {
        ResolveResult::Bound(Namespace(uri)) => Ok(format!(
            "{}{}{}",
            String::from_utf8_lossy(uri),
            NAMESPACE_SEPARATOR,
            local
        )),
        ResolveResult::Unbound => Ok(local.to_string()),
        ResolveResult::Unknown(prefix) => Err(format!(
            "unbound prefix '{}'",
            String::from_utf8_lossy(prefix)
        )),
    }
}

fn attributes(start: &BytesStart<'_>) -> std::result::Result<Attributes, String> {
    let mut result = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(|e| e.to_string())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        result.push((key.to_string(), value.into_owned()));
    }
    Ok(Attributes(result))
}

fn utf8(bytes: Cow<'_, [u8]>) -> std::result::Result<Cow<'_, str>, String> {
    match bytes {
        Cow::Borrowed(b) => std::str::from_utf8(b).map(Cow::Borrowed).map_err(|e| e.to_string()),
        Cow::Owned(b) => String::from_utf8(b).map(Cow::Owned).map_err(|e| e.to_string()),
    }
}

/// Whether `data` starts with a complete event.
///
/// After a text event the reader may already have consumed the `<` of the
/// following markup, in which case `data` starts inside the tag.
fn event_available(data: &[u8], after_text: bool) -> bool {
    match data.first() {
        None => false,
        Some(b'<') => markup_complete(&data[1..]),
        Some(_) if after_text => markup_complete(data),
        Some(_) => data.contains(&b'<'),
    }
}

/// Whether the markup following a `<` is complete
fn markup_complete(body: &[u8]) -> bool {
    if body.starts_with(b"!--") {
        find(&body[3..], b"-->")
    } else if body.starts_with(b"![CDATA[") {
        find(&body[8..], b"]]>")
    } else if body.starts_with(b"?") {
        find(&body[1..], b"?>")
    } else if body.starts_with(b"!") {
        declaration_end(&body[1..])
    } else {
        tag_end(body)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// `>` outside quoted attribute values
fn tag_end(body: &[u8]) -> bool {
    let mut quote = None;
    for &byte in body {
        match (quote, byte) {
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return true,
            (Some(q), _) if q == byte => quote = None,
            _ => {}
        }
    }
    false
}

/// `>` outside quotes and outside an internal `[...]` subset
fn declaration_end(body: &[u8]) -> bool {
    let mut quote = None;
    let mut depth = 0usize;
    for &byte in body {
        match (quote, byte) {
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'[') => depth += 1,
            (None, b']') => depth = depth.saturating_sub(1),
            (None, b'>') if depth == 0 => return true,
            (Some(q), _) if q == byte => quote = None,
            _ => {}
        }
    }
    false
}
