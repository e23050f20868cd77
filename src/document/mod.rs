// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! TTYML documents
//!
//! The body of a response is decoded and fed to a namespace-aware XML reader
//! as it arrives. [`DocumentParser`] reacts to the resulting element and text
//! events: it renders `line` elements, builds prompt labels and collects the
//! form.

mod element;
mod feed;
mod form;
mod parser;

pub use element::{ElementKind, NAMESPACE_SEPARATOR, TTYML_NAMESPACE};
pub use feed::{Attributes, XmlFeed, XmlHandler};
pub use form::{Form, Prompt, Submission, Variable};
pub use parser::DocumentParser;
