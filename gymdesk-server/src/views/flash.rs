//! Flash messages shown inside page sections

use serde::{Deserialize, Serialize};

use super::html::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash flash-success",
            Self::Info => "flash flash-info",
            Self::Warning => "flash flash-warning",
            Self::Error => "flash flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Span {
    Text(String),
    Strong(String),
}

/// A message built from plain and emphasized pieces.
///
/// Pieces are escaped at render time, so user-supplied names can be placed
/// in a message without further care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    level: FlashLevel,
    spans: Vec<Span>,
}

impl Flash {
    fn new(level: FlashLevel) -> Self {
        Self {
            level,
            spans: Vec::new(),
        }
    }

    pub fn success() -> Self {
        Self::new(FlashLevel::Success)
    }

    pub fn info() -> Self {
        Self::new(FlashLevel::Info)
    }

    pub fn warning() -> Self {
        Self::new(FlashLevel::Warning)
    }

    pub fn error() -> Self {
        Self::new(FlashLevel::Error)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Text(text.into()));
        self
    }

    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Strong(text.into()));
        self
    }

    pub fn level(&self) -> FlashLevel {
        self.level
    }

    /// Message without markup
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|span| match span {
                Span::Text(t) | Span::Strong(t) => t.as_str(),
            })
            .collect()
    }

    pub fn to_html(&self) -> String {
        let inner: String = self
            .spans
            .iter()
            .map(|span| match span {
                Span::Text(t) => escape(t),
                Span::Strong(t) => format!("<strong>{}</strong>", escape(t)),
            })
            .collect();
        format!(
            "<div class=\"{}\" role=\"status\">{}</div>",
            self.level.css_class(),
            inner
        )
    }
}

/// Outcome of a successful write, carried across the post-write redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    /// Read a `notice=` query value; unknown values carry no notice.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Confirmation message for the student named `name`
    pub fn flash(self, name: &str) -> Flash {
        let flash = Flash::success().text("Student ").strong(name);
        match self {
            Self::Created => flash.text(" registered successfully!"),
            Self::Updated => flash.text(" data updated!"),
            Self::Deleted => flash.text(" deleted successfully!"),
        }
    }
}
