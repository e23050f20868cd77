// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browsing sessions
//!
//! A [`Session`] fetches a document into a [`Context`], lets the user fill
//! in its form and follows the submission to the next document, until a
//! document has no prompts or input ends.

mod context;
mod input;
#[allow(clippy::module_inception)]
mod session;

pub use context::Context;
pub use input::{LineReader, ScriptedInput, StdinReader};
pub use session::Session;
