// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Path normalization

/// Collapse `.`, `..` and duplicate `/` segments.
///
/// A trailing `/` is preserved. `..` never climbs above the root of an
/// absolute path.
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let ends_with_slash = path.ends_with('/');

    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "." => continue,
            "" if !parts.is_empty() => continue,
            ".." => {
                if !(absolute && parts.len() == 1) {
                    parts.pop();
                }
            }
            _ => parts.push(part),
        }
    }

    if ends_with_slash {
        parts.push("");
    }

    parts.join("/")
}
