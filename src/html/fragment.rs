//! Trusted HTML fragments and the escaping primitive.
//!
//! # Design Decisions
//! - A `Fragment` can only be built from other fragments, from escaped
//!   scalars, or through the explicit `Fragment::trusted` constructor
//! - Escaping is not idempotent: escaping `&amp;` yields `&amp;amp;`

use std::borrow::Cow;
use std::fmt;

/// An already-safe HTML string representing one UI region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Wrap markup the caller vouches for. Never pass user input here.
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// A fragment with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Escaped plain text.
    pub fn text(body: &str) -> Self {
        Self(escape(body).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append another fragment.
    pub fn push(&mut self, other: &Fragment) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Fragment> for Fragment {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let mut out = Fragment::empty();
        for child in iter {
            out.push(&child);
        }
        out
    }
}

impl From<Fragment> for String {
    fn from(fragment: Fragment) -> Self {
        fragment.0
    }
}

/// Replace `&`, `<`, `>`, `"` and `'` with their entity equivalents.
pub fn escape(raw: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(raw)
}

/// Escape any displayable value.
pub fn escape_display(value: impl fmt::Display) -> String {
    escape(&value.to_string()).into_owned()
}

/// Concatenate child fragments in order.
pub fn join(children: impl IntoIterator<Item = Fragment>) -> Fragment {
    children.into_iter().collect()
}
