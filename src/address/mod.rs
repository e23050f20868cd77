// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL helpers for form actions
//!
//! Form actions are resolved textually against the document URL rather than
//! through a full URL parser, so that relative paths, query strings and
//! fragments survive exactly as the server wrote them.

mod escape;
mod parts;
mod path;

pub use escape::{append_key_value, escape};
pub use parts::{normalize, UrlParts};
pub use path::normalize_path;
