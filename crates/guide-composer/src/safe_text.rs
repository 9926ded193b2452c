//! SafeText - text that has already been neutralized for markup.
//!
//! The only constructor escapes, so any value of this type can be written
//! into a document verbatim. Renderers accept `SafeText` and nothing else.

use serde::Serialize;
use std::fmt;

/// Escaped display text.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SafeText(String);

impl SafeText {
    /// Escape raw text for insertion into a document.
    ///
    /// Covers element content and quoted attribute values.
    pub fn escape(raw: &str) -> Self {
        Self(escape_markup(raw))
    }

    /// Escaped form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join already-escaped pieces. Separator is escaped too.
    pub fn join(parts: &[&SafeText], separator: &str) -> Self {
        let separator = escape_markup(separator);
        Self(
            parts
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(&separator),
        )
    }
}

impl fmt::Debug for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SafeText({:?})", self.0)
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
