// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form model: hidden variables, prompts and the submission they produce

use regex::Regex;

use crate::address::{append_key_value, normalize, UrlParts};
use crate::error::{Error, Result};
use crate::http::Request;

/// Hidden name/value pair from a `var` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// Visible form field
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Field name used in the submission
    pub name: String,
    /// Rendered text shown when asking for input, escape sequences included
    pub label: String,
    filter_source: Option<String>,
    filter: Option<Regex>,
    filter_message: Option<String>,
}

impl Prompt {
    /// Create a prompt, compiling its filter.
    ///
    /// The filter must match the whole input. An invalid expression makes the
    /// document malformed.
    pub fn new(name: impl Into<String>, filter: Option<&str>, message: Option<&str>) -> Result<Self> {
        let compiled = match filter {
            Some(source) => Some(Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
                Error::malformed(format!("invalid filter-regex '{}': {}", source, e))
            })?),
            None => None,
        };

        Ok(Self {
            name: name.into(),
            label: String::new(),
            filter_source: filter.map(str::to_string),
            filter: compiled,
            filter_message: message.map(str::to_string),
        })
    }

    /// Filter as written in the document
    pub fn filter(&self) -> Option<&str> {
        self.filter_source.as_deref()
    }

    /// Whether `value` passes the filter
    pub fn accepts(&self, value: &str) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(value))
    }

    /// Message shown when a non-empty value is rejected
    pub fn rejection_message(&self) -> String {
        match &self.filter_message {
            Some(message) => message.clone(),
            None => format!(
                "Invalid input.  Must match '{}'",
                self.filter_source.as_deref().unwrap_or("")
            ),
        }
    }
}

/// Form collected from a document
#[derive(Debug, Clone)]
pub struct Form {
    /// Target, possibly relative to the document URL
    pub action: String,
    /// Request method, upper-cased
    pub method: String,
    pub variables: Vec<Variable>,
    pub prompts: Vec<Prompt>,
}

impl Form {
    /// Empty form submitting back to `source_url` with GET
    pub fn new(source_url: &str) -> Self {
        Self {
            action: source_url.to_string(),
            method: "GET".to_string(),
            variables: Vec::new(),
            prompts: Vec::new(),
        }
    }

    pub fn has_prompt(&self) -> bool {
        !self.prompts.is_empty()
    }

    /// Encoded variables, the start of every submission body
    pub fn encode_variables(&self) -> String {
        let mut body = String::new();
        for variable in &self.variables {
            append_key_value(&mut body, &variable.name, &variable.value);
        }
        body
    }

    /// Work out where and how to send an encoded body.
    ///
    /// For any method other than POST the body replaces the query of the
    /// target URL and nothing is sent in the request body.
    pub fn submission(&self, source_url: &str, body: String) -> Submission {
        let url = normalize(&self.action, source_url);

        if self.method == "POST" || body.is_empty() {
            return Submission {
                url,
                method: self.method.clone(),
                body,
            };
        }

        let mut parts = UrlParts::parse(&url);
        parts.path = format!("{}?{}", parts.path_only(), body);

        Submission {
            url: parts.to_string(),
            method: self.method.clone(),
            body: String::new(),
        }
    }
}

/// The request a filled-in form turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub method: String,
    pub body: String,
}

impl Submission {
    /// Build the HTTP request
    pub fn into_request(self) -> Result<Request> {
        if self.body.is_empty() {
            Request::with_method_name(&self.method, &self.url)
        } else {
            Ok(Request::post(&self.url)?.form(self.body))
        }
    }
}
