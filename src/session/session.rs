// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The prompt and submit loop

use std::io::Write;

use super::context::Context;
use super::input::LineReader;
use crate::address::append_key_value;
use crate::document::{Form, Prompt, Submission};
use crate::error::Result;
use crate::http::{HttpClient, Request};

/// Interactive session over a chain of documents.
///
/// Documents are rendered to `out`, diagnostics go to `err` and prompt
/// answers come from `input`.
pub struct Session<I, O, E> {
    client: HttpClient,
    input: I,
    out: O,
    err: E,
}

impl<I, O, E> Session<I, O, E>
where
    I: LineReader,
    O: Write,
    E: Write,
{
    pub fn new(client: HttpClient, input: I, out: O, err: E) -> Self {
        Self {
            client,
            input,
            out,
            err,
        }
    }

    /// Fetch `url` and keep following form submissions.
    ///
    /// Ends normally when a document has no prompts or input runs out. Any
    /// error fetching the first document is returned.
    pub async fn run(&mut self, url: &str) -> Result<()> {
        let mut context = self.open(Request::get(url)?).await?;

        while let Some(next) = self.next_context(&context).await? {
            context = next;
        }

        self.out.flush()?;
        Ok(())
    }

    /// Fetch and render one document
    pub async fn open(&mut self, request: Request) -> Result<Context> {
        Context::open(&self.client, request, &mut self.out).await
    }

    /// Fill in the form of `context` and fetch the document it submits to.
    ///
    /// `None` when there is nothing to fill in or input ended. A recoverable
    /// failure is reported and the whole form is asked for again.
    pub async fn next_context(&mut self, context: &Context) -> Result<Option<Context>> {
        let form = context.form();
        if !form.has_prompt() {
            return Ok(None);
        }

        loop {
            let Some(body) = self.fill_form(form)? else {
                return Ok(None);
            };

            let submission = form.submission(context.url(), body);
            match self.submit(submission).await {
                Ok(next) => return Ok(Some(next)),
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(error = %err, "Submission failed, asking again");
                    writeln!(self.err, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn submit(&mut self, submission: Submission) -> Result<Context> {
        tracing::debug!(
            url = %submission.url,
            method = %submission.method,
            body_len = submission.body.len(),
            "Submitting form"
        );
        let request = submission.into_request()?;
        self.open(request).await
    }

    /// Encoded body for `form`, or `None` if input ended
    fn fill_form(&mut self, form: &Form) -> Result<Option<String>> {
        let mut body = form.encode_variables();

        for prompt in &form.prompts {
            let Some(value) = self.read_prompt(prompt)? else {
                return Ok(None);
            };
            append_key_value(&mut body, &prompt.name, &value);
        }

        Ok(Some(body))
    }

    /// Ask until the answer passes the prompt's filter
    fn read_prompt(&mut self, prompt: &Prompt) -> Result<Option<String>> {
        loop {
            self.out.flush()?;

            let Some(line) = self.input.read_line(&prompt.label)? else {
                return Ok(None);
            };

            let value = line.trim_matches(|c: char| c.is_ascii_whitespace());
            if prompt.accepts(value) {
                return Ok(Some(value.to_string()));
            }
            if !value.is_empty() {
                writeln!(self.err, "{}", prompt.rejection_message())?;
            }
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn errors(&self) -> &E {
        &self.err
    }
}
