// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element kinds and where they may appear

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Namespace of TTYML elements
pub const TTYML_NAMESPACE: &str = "https://ttyml.org/2018/05/26";

/// Separator between namespace URI and local name in expanded names
pub const NAMESPACE_SEPARATOR: char = '|';

/// Recognized TTYML elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `ttyml`, the document element
    Root,
    /// `line`, printed to standard output
    Line,
    /// `prompt`, a visible form field
    Prompt,
    /// `form`
    Form,
    /// `style`, text attributes inside a line or prompt
    Style,
    /// `var`, a hidden form field
    Var,
    /// Anything else, including misplaced TTYML elements
    Unknown,
}

lazy_static! {
    static ref TAG_TO_ELEMENT: HashMap<String, ElementKind> = [
        ("ttyml", ElementKind::Root),
        ("line", ElementKind::Line),
        ("prompt", ElementKind::Prompt),
        ("form", ElementKind::Form),
        ("style", ElementKind::Style),
        ("var", ElementKind::Var),
    ]
    .into_iter()
    .map(|(local, kind)| {
        (
            format!("{}{}{}", TTYML_NAMESPACE, NAMESPACE_SEPARATOR, local),
            kind,
        )
    })
    .collect();
}

impl ElementKind {
    /// Look up an expanded name (`namespace|local`)
    pub fn from_tag(name: &str) -> Self {
        TAG_TO_ELEMENT
            .get(name)
            .copied()
            .unwrap_or(ElementKind::Unknown)
    }

    /// Whether an element of this kind may open at this point.
    ///
    /// `parent` is the innermost open element, `writer_active` tells whether
    /// a line or prompt is being rendered and `form_seen` whether the document
    /// already had its form.
    pub fn admitted(self, parent: Option<ElementKind>, writer_active: bool, form_seen: bool) -> bool {
        match self {
            ElementKind::Root => parent.is_none(),
            ElementKind::Line => parent == Some(ElementKind::Root),
            ElementKind::Form => parent == Some(ElementKind::Root) && !form_seen,
            ElementKind::Prompt => parent == Some(ElementKind::Form),
            ElementKind::Style => writer_active,
            ElementKind::Var | ElementKind::Unknown => true,
        }
    }

    /// Whether character data inside this element is rendered
    pub fn renders_text(self) -> bool {
        matches!(
            self,
            ElementKind::Line | ElementKind::Prompt | ElementKind::Style
        )
    }
}
