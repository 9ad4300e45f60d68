use serde::Serialize;

/// Inline style attributes active for a run of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl StyleSet {
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
        underline: false,
        strikethrough: false,
    };
    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
        underline: false,
        strikethrough: false,
    };
    pub const UNDERLINE: Self = Self {
        bold: false,
        italic: false,
        underline: true,
        strikethrough: false,
    };
    pub const STRIKETHROUGH: Self = Self {
        bold: false,
        italic: false,
        underline: false,
        strikethrough: true,
    };

    /// Union of both sets.
    pub fn merge(self, other: Self) -> Self {
        Self {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A piece of text rendered with a single style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub content: String,
    pub style: StyleSet,
}

impl TextRun {
    pub fn new(content: impl Into<String>, style: StyleSet) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, StyleSet::default())
    }
}

/// Output of the formatter, ready to hand to a renderer.
///
/// Absent or empty input passes through as [`RenderableText::Plain`]; anything
/// else is wrapped as an ordered list of runs, even when it holds no markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderableText {
    Plain(String),
    Runs(Vec<TextRun>),
}

impl RenderableText {
    pub fn empty() -> Self {
        Self::Plain(String::new())
    }

    /// Runs in output order. Plain text has none.
    pub fn runs(&self) -> &[TextRun] {
        match self {
            Self::Plain(_) => &[],
            Self::Runs(runs) => runs,
        }
    }

    /// Concatenated text with styles dropped
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Runs(runs) => runs.iter().map(|run| run.content.as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Runs(runs) => runs.iter().all(|run| run.content.is_empty()),
        }
    }
}
