// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Terminal output: text styles, ANSI transitions and writers

mod size;
mod style;
mod writer;

pub use size::{terminal_size, TerminalSize};
pub use style::{parse_color, transition, Style, DEFAULT_COLOR};
pub use writer::{Sink, Writer};
