// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Line input for prompts

use std::collections::VecDeque;
use std::io;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::{Error, Result};

/// Source of user input, one line per prompt
pub trait LineReader {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor on the terminal.
///
/// The prompt may contain escape sequences; they do not count towards its
/// width. Accepted lines go into the editor's history.
#[derive(Default)]
pub struct StdinReader {
    editor: Option<DefaultEditor>,
}

impl StdinReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor> {
        if self.editor.is_none() {
            self.editor = Some(DefaultEditor::new().map_err(readline_error)?);
        }
        self.editor
            .as_mut()
            .ok_or_else(|| Error::logic("line editor missing"))
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let editor = self.editor()?;
        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str()).map_err(readline_error)?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(err) => err.into(),
        other => io::Error::new(io::ErrorKind::Other, other.to_string()).into(),
    }
}

/// Replays prepared lines and records the prompts shown
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
