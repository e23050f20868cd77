// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Text styles and the escape sequences that switch between them

use crate::error::{Error, Result};

/// Color index meaning "terminal default"
pub const DEFAULT_COLOR: u32 = 9;

/// Foreground color, background color and weight of rendered text.
///
/// Colors 0-8 are the ANSI palette, 9 is the terminal default. Larger
/// values are accepted but never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: u32,
    pub bg: u32,
    pub bold: bool,
}

impl Style {
    /// The style a writer starts in
    pub const NEUTRAL: Style = Style {
        fg: DEFAULT_COLOR,
        bg: DEFAULT_COLOR,
        bold: false,
    };

    /// Derive a new style from `fg`, `bg` and `bold` attribute values.
    ///
    /// Absent attributes keep the current value.
    pub fn overlay(&self, fg: Option<&str>, bg: Option<&str>, bold: Option<&str>) -> Result<Style> {
        let mut style = *self;

        if let Some(value) = fg {
            style.fg = parse_color("fg", value)?;
        }
        if let Some(value) = bg {
            style.bg = parse_color("bg", value)?;
        }
        if let Some(value) = bold {
            style.bold = match value {
                "0" => false,
                "1" => true,
                _ => return Err(Error::bad_attribute("bold", value)),
            };
        }

        Ok(style)
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::NEUTRAL
    }
}

/// Parse a color attribute: `default` or a non-negative decimal integer.
pub fn parse_color(attribute: &str, value: &str) -> Result<u32> {
    if value == "default" {
        return Ok(DEFAULT_COLOR);
    }
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::bad_attribute(attribute, value));
    }
    value
        .parse()
        .map_err(|_| Error::bad_attribute(attribute, value))
}

/// The escape sequence that moves the terminal from `from` to `to`.
///
/// Empty when nothing visible changes. Returning to the neutral style is a
/// plain reset.
pub fn transition(from: &Style, to: &Style) -> String {
    if from == to {
        return String::new();
    }
    if *to == Style::NEUTRAL {
        return "\x1b[m".to_string();
    }

    let mut params: Vec<String> = Vec::with_capacity(3);

    if from.bold != to.bold {
        params.push(if to.bold { "1" } else { "22" }.to_string());
    }
    if from.fg != to.fg && to.fg <= DEFAULT_COLOR {
        params.push((30 + to.fg).to_string());
    }
    if from.bg != to.bg && to.bg <= DEFAULT_COLOR {
        params.push((40 + to.bg).to_string());
    }

    if params.is_empty() {
        return String::new();
    }

    format!("\x1b[{}m", params.join(";"))
}
