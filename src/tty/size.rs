// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Terminal size of standard output

/// Size of the terminal in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub lines: u16,
}

/// Query the size of the terminal attached to standard output.
///
/// `None` when stdout is not a terminal or the query fails.
#[cfg(unix)]
pub fn terminal_size() -> Option<TerminalSize> {
    // SAFETY: `winsize` is plain old data and TIOCGWINSZ only writes into it.
    unsafe {
        let mut winsz: libc::winsize = std::mem::zeroed();
        if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut winsz) == -1 {
            return None;
        }
        Some(TerminalSize {
            columns: winsz.ws_col,
            lines: winsz.ws_row,
        })
    }
}

#[cfg(not(unix))]
pub fn terminal_size() -> Option<TerminalSize> {
    None
}
