// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rendering of document events

use std::io::Write;

use super::element::ElementKind;
use super::feed::{Attributes, XmlHandler};
use super::form::{Form, Prompt, Variable};
use crate::error::{Error, Result};
use crate::http::parse_method;
use crate::tty::{Sink, Writer};

/// Turns XML events into terminal output and a form.
///
/// Text inside `line` elements goes to `out` as it arrives; text inside
/// `prompt` elements becomes the prompt's label.
pub struct DocumentParser<'o> {
    out: &'o mut dyn Write,
    elements: Vec<ElementKind>,
    writers: Vec<Writer>,
    form: Form,
    form_seen: bool,
}

impl<'o> DocumentParser<'o> {
    /// Create a parser for the document fetched from `source_url`
    pub fn new(source_url: &str, out: &'o mut dyn Write) -> Self {
        Self {
            out,
            elements: Vec::new(),
            writers: Vec::new(),
            form: Form::new(source_url),
            form_seen: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }

    /// Whether every element and writer opened so far has been closed
    pub fn is_balanced(&self) -> bool {
        self.elements.is_empty() && self.writers.is_empty()
    }

    fn put(&mut self, sink: Sink, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match sink {
            Sink::Stdout => self.out.write_all(text.as_bytes())?,
            Sink::Prompt(index) => self
                .form
                .prompts
                .get_mut(index)
                .ok_or_else(|| Error::logic("writer bound to a missing prompt"))?
                .label
                .push_str(text),
        }
        Ok(())
    }

    fn top_writer(&mut self) -> Result<&mut Writer> {
        self.writers
            .last_mut()
            .ok_or_else(|| Error::logic("no active writer"))
    }

    fn start_form(&mut self, attributes: &Attributes) -> Result<()> {
        self.form_seen = true;
        if let Some(action) = attributes.get("action") {
            self.form.action = action.to_string();
        }
        if let Some(method) = attributes.get("method") {
            let method = method.to_ascii_uppercase();
            parse_method(&method)?;
            self.form.method = method;
        }
        Ok(())
    }

    fn start_prompt(&mut self, attributes: &Attributes) -> Result<()> {
        let name = attributes
            .get("name")
            .ok_or_else(|| Error::malformed("prompt element without 'name' attribute"))?;

        let prompt = Prompt::new(
            name,
            attributes.get("filter-regex"),
            attributes.get("filter-message"),
        )?;

        self.form.prompts.push(prompt);
        self.writers.push(Writer::prompt(self.form.prompts.len() - 1));
        Ok(())
    }

    fn start_style(&mut self, attributes: &Attributes) -> Result<()> {
        let writer = self.top_writer()?;
        let style = writer.style().overlay(
            attributes.get("fg"),
            attributes.get("bg"),
            attributes.get("bold"),
        )?;
        let escape = writer.push_style(style);
        let sink = writer.sink();
        self.put(sink, &escape)
    }

    fn start_var(&mut self, attributes: &Attributes) -> Result<()> {
        let (Some(name), Some(value)) = (attributes.get("name"), attributes.get("value")) else {
            return Err(Error::malformed(
                "var element requires 'name' and 'value' attributes",
            ));
        };

        self.form.variables.push(Variable {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

impl XmlHandler for DocumentParser<'_> {
    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()> {
        let parent = self.elements.last().copied();
        let mut kind = ElementKind::from_tag(name);

        if !kind.admitted(parent, !self.writers.is_empty(), self.form_seen) {
            tracing::debug!(element = %name, parent = ?parent, "Ignoring misplaced element");
            kind = ElementKind::Unknown;
        }

        match kind {
            ElementKind::Form => self.start_form(attributes)?,
            ElementKind::Prompt => self.start_prompt(attributes)?,
            ElementKind::Line => self.writers.push(Writer::stdout()),
            ElementKind::Style => self.start_style(attributes)?,
            ElementKind::Var => self.start_var(attributes)?,
            ElementKind::Root | ElementKind::Unknown => {}
        }

        self.elements.push(kind);
        Ok(())
    }

    fn end_element(&mut self, _name: &str) -> Result<()> {
        let kind = *self
            .elements
            .last()
            .ok_or_else(|| Error::logic("unexpected end element call"))?;

        match kind {
            ElementKind::Line => {
                self.writers.pop();
                self.out.write_all(b"\n")?;
                self.out.flush()?;
            }
            ElementKind::Prompt => {
                self.writers.pop();
            }
            ElementKind::Style => {
                let writer = self.top_writer()?;
                let escape = writer.pop_style()?;
                let sink = writer.sink();
                self.put(sink, &escape)?;
            }
            ElementKind::Root | ElementKind::Form | ElementKind::Var | ElementKind::Unknown => {}
        }

        self.elements.pop();
        Ok(())
    }

    fn character_data(&mut self, text: &str) -> Result<()> {
        let renders = self
            .elements
            .last()
            .map_or(false, |kind| kind.renders_text());
        if !renders {
            return Ok(());
        }

        let sink = self.top_writer()?.sink();
        self.put(sink, text)
    }
}
