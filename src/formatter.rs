use tracing::trace;

use crate::config::Config;
use crate::run::{RenderableText, StyleSet, TextRun};
use crate::tokenizer::{Tag, Token, tokenize};

/// Strings placed in front of list item text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarkers {
    /// Prefix for unordered items
    pub bullet: String,
    /// Goes between the item number and the text of ordered items
    pub ordered_separator: String,
}

impl Default for ListMarkers {
    fn default() -> Self {
        Self {
            bullet: "• ".to_string(),
            ordered_separator: ". ".to_string(),
        }
    }
}

/// Converts message markup into styled runs.
///
/// Holds only immutable settings, so one instance can be shared freely
/// between threads. Every call to [`Formatter::format`] starts from an empty
/// style stack and no active list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    markers: ListMarkers,
}

impl Formatter {
    pub fn new(markers: ListMarkers) -> Self {
        Self { markers }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ListMarkers {
            bullet: config.list.bullet.clone(),
            ordered_separator: config.list.ordered_separator.clone(),
        })
    }

    pub fn markers(&self) -> &ListMarkers {
        &self.markers
    }

    /// Format a message body.
    ///
    /// Absent or empty input comes back as empty plain text.
    pub fn format(&self, input: Option<&str>) -> RenderableText {
        let input = match input {
            Some(text) if !text.is_empty() => text,
            _ => return RenderableText::empty(),
        };

        let mut state = FormatState::default();
        let mut runs = Vec::new();

        for token in tokenize(input) {
            process_token(token, &mut state, &self.markers, &mut runs);
        }

        RenderableText::Runs(runs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

#[derive(Debug)]
struct FormatState {
    // One frame per open inline tag; closing any inline tag pops the top
    style_stack: Vec<StyleSet>,
    current_style: StyleSet,

    // Only one list is tracked; an inner list replaces the outer one
    list_kind: Option<ListKind>,
    list_index: usize,
    in_list_item: bool,
}

impl Default for FormatState {
    fn default() -> Self {
        Self {
            style_stack: Vec::new(),
            current_style: StyleSet::default(),
            list_kind: None,
            list_index: 1,
            in_list_item: false,
        }
    }
}

impl FormatState {
    fn push_style(&mut self, style: StyleSet) {
        self.style_stack.push(style);
        self.current_style = self.current_style.merge(style);
    }

    fn pop_style(&mut self, closed_by: Tag) {
        if self.style_stack.pop().is_none() {
            trace!(tag = closed_by.name(), "closing tag with empty style stack");
        }
        self.current_style = self
            .style_stack
            .iter()
            .fold(StyleSet::default(), |acc, &style| acc.merge(style));
    }

    fn set_list(&mut self, kind: ListKind, opening: bool) {
        self.list_kind = opening.then_some(kind);
        self.list_index = 1;
    }

    /// Prefix for the next list item, advancing the ordered index
    fn item_prefix(&mut self, markers: &ListMarkers) -> String {
        match self.list_kind {
            Some(ListKind::Unordered) => markers.bullet.clone(),
            Some(ListKind::Ordered) => {
                let prefix = format!("{}{}", self.list_index, markers.ordered_separator);
                self.list_index += 1;
                prefix
            }
            None => String::new(),
        }
    }
}

fn inline_style(tag: Tag) -> Option<StyleSet> {
    match tag {
        Tag::Bold => Some(StyleSet::BOLD),
        Tag::Italic => Some(StyleSet::ITALIC),
        Tag::Underline => Some(StyleSet::UNDERLINE),
        Tag::Strike | Tag::StrikeLong => Some(StyleSet::STRIKETHROUGH),
        Tag::UnorderedList | Tag::OrderedList | Tag::ListItem => None,
    }
}

fn process_token(
    token: Token<'_>,
    state: &mut FormatState,
    markers: &ListMarkers,
    runs: &mut Vec<TextRun>,
) {
    match token {
        Token::Open(tag) | Token::Close(tag) => {
            let opening = matches!(token, Token::Open(_));

            if let Some(style) = inline_style(tag) {
                if opening {
                    state.push_style(style);
                } else {
                    state.pop_style(tag);
                }
                return;
            }

            match tag {
                Tag::UnorderedList => state.set_list(ListKind::Unordered, opening),
                Tag::OrderedList => state.set_list(ListKind::Ordered, opening),
                Tag::ListItem => state.in_list_item = opening,
                _ => {}
            }
        }

        Token::Text(text) => {
            let text = trim(text);
            let content = if state.in_list_item {
                let mut content = state.item_prefix(markers);
                content.push_str(text);
                content.push('\n');
                content
            } else {
                text.to_string()
            };
            runs.push(TextRun::new(content, state.current_style));
        }
    }
}

/// Trim the characters that ECMAScript's `String.prototype.trim` strips.
fn trim(text: &str) -> &str {
    text.trim_matches(is_trimmed_space)
}

/// Space separators (Zs), the ASCII controls TAB VT FF LF CR, the line and
/// paragraph separators, and the byte order mark. NEL (U+0085) is kept.
fn is_trimmed_space(c: char) -> bool {
    matches!(
        c,
        '\t'
            | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}
