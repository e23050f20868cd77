// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Writers: a sink plus the stack of styles active on it

use super::style::{transition, Style};
use crate::error::{Error, Result};

/// Where a writer's text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// Standard output
    Stdout,
    /// Label of the prompt at this index in the form
    Prompt(usize),
}

/// Output target with its own style stack.
///
/// The bottom of the stack is always the neutral style. Pushing and popping
/// return the escape sequence the caller must write to the sink.
#[derive(Debug, Clone)]
pub struct Writer {
    sink: Sink,
    styles: Vec<Style>,
}

impl Writer {
    /// Create a writer in the neutral style
    pub fn new(sink: Sink) -> Self {
        Self {
            sink,
            styles: vec![Style::NEUTRAL],
        }
    }

    /// Writer for a `line` element
    pub fn stdout() -> Self {
        Self::new(Sink::Stdout)
    }

    /// Writer for the label of a `prompt` element
    pub fn prompt(index: usize) -> Self {
        Self::new(Sink::Prompt(index))
    }

    pub fn sink(&self) -> Sink {
        self.sink
    }

    /// Current style
    pub fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(Style::NEUTRAL)
    }

    /// Number of styles pushed above the neutral one
    pub fn depth(&self) -> usize {
        self.styles.len() - 1
    }

    pub fn is_neutral(&self) -> bool {
        self.depth() == 0
    }

    /// Switch to `style`, returning the transition to emit
    pub fn push_style(&mut self, style: Style) -> String {
        let escape = transition(&self.style(), &style);
        self.styles.push(style);
        escape
    }

    /// Return to the previous style, returning the transition to emit
    pub fn pop_style(&mut self) -> Result<String> {
        if self.is_neutral() {
            return Err(Error::logic("style stack underflow"));
        }
        let top = self.styles.pop().unwrap_or(Style::NEUTRAL);
        Ok(transition(&top, &self.style()))
    }
}
