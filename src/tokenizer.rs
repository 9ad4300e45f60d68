//! Single-pass tokenizer for message markup.
//!
//! Recognizes exactly the tag markers `<name>` and `</name>` for the names in
//! [`Tag`]. Everything between markers that contains no `<` is text. A `<` that
//! does not start a recognized marker is skipped on its own, so the rest of an
//! unknown tag such as `<br>` comes through as the text `br>`.

/// Longest recognized tag name (`strike`) plus the closing `>`.
const MAX_MARKER_TAIL: usize = 7;

/// Tags the formatter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Bold,
    Italic,
    Underline,
    /// `s`
    Strike,
    /// `strike`
    StrikeLong,
    UnorderedList,
    OrderedList,
    ListItem,
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "b" => Some(Tag::Bold),
            "i" => Some(Tag::Italic),
            "u" => Some(Tag::Underline),
            "s" => Some(Tag::Strike),
            "strike" => Some(Tag::StrikeLong),
            "ul" => Some(Tag::UnorderedList),
            "ol" => Some(Tag::OrderedList),
            "li" => Some(Tag::ListItem),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Underline => "u",
            Tag::Strike => "s",
            Tag::StrikeLong => "strike",
            Tag::UnorderedList => "ul",
            Tag::OrderedList => "ol",
            Tag::ListItem => "li",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open(Tag),
    Close(Tag),
    Text(&'a str),
}

/// Lazy token stream over one input string
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Try to read a tag marker at the current position, which holds a `<`.
    /// Returns the token and its length in bytes.
    fn marker_at(&self) -> Option<(Token<'a>, usize)> {
        let rest = &self.input[self.pos + 1..];
        let (closing, body) = match rest.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, rest),
        };

        let window = &body.as_bytes()[..body.len().min(MAX_MARKER_TAIL)];
        let end = window.iter().position(|&b| b == b'>')?;
        // `end` indexes an ASCII byte, so this is a char boundary.
        let tag = Tag::from_name(&body[..end])?;

        let len = 1 + usize::from(closing) + end + 1;
        let token = if closing {
            Token::Close(tag)
        } else {
            Token::Open(tag)
        };
        Some((token, len))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];

            if rest.starts_with('<') {
                if let Some((token, len)) = self.marker_at() {
                    self.pos += len;
                    return Some(token);
                }
                // Stray `<`: not part of any token
                self.pos += 1;
                continue;
            }

            let len = rest.find('<').unwrap_or(rest.len());
            self.pos += len;
            return Some(Token::Text(&rest[..len]));
        }
        None
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Tokenize message markup.
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}
