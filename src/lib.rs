//! Formatting for chat message markup.
//!
//! Message bodies may carry a small HTML-like markup subset: the inline tags
//! `b`, `i`, `u`, `s` and `strike`, plus `ul`, `ol` and `li` for lists.
//! [`format`] turns such a body into styled [`TextRun`]s for a renderer; the
//! [`typst`](message_to_typst) and [PDF](message_to_pdf) helpers are one such
//! renderer.
//!
//! ```
//! use chatmarkup::{StyleSet, TextRun};
//!
//! let text = chatmarkup::format(Some("<ol><li><b>first</b></li><li>second</li></ol>"));
//! assert_eq!(
//!     text.runs(),
//!     &[
//!         TextRun::new("1. first\n", StyleSet::BOLD),
//!         TextRun::plain("2. second\n"),
//!     ]
//! );
//! ```

mod config;
mod error;
mod formatter;
mod run;
mod tokenizer;
mod typst;

pub use config::{Config, FontConfig, ListConfig, PageConfig};
pub use error::{Error, Result};
pub use formatter::{Formatter, ListMarkers};
pub use run::{RenderableText, StyleSet, TextRun};
pub use tokenizer::{Tag, Token, Tokenizer, tokenize};
pub use typst::{renderable_to_typst, runs_to_typst};

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Format a message body with the default list markers.
///
/// Absent or empty input yields empty plain text. Never fails.
pub fn format(input: Option<&str>) -> RenderableText {
    Formatter::default().format(input)
}

/// Format a message body and convert it to Typst markup.
pub fn message_to_typst(input: Option<&str>, config: &Config) -> String {
    let text = Formatter::from_config(config).format(input);
    typst::renderable_to_typst(&text, config)
}

/// Format a message body and render it to PDF bytes.
pub fn message_to_pdf(input: Option<&str>, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = message_to_typst(input, config);
    debug!(bytes = typst_content.len(), "compiling Typst document");

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_markers_reach_typst() {
        let mut config = Config::default();
        config.list.bullet = "> ".to_string();
        let out = message_to_typst(Some("<ul><li>a</li></ul>"), &config);
        assert!(out.ends_with("\\> a \\\n"));
    }

    #[test]
    fn runs_to_typst_matches_message_path() {
        let config = Config::default();
        let text = format(Some("<b>x</b> y"));
        assert_eq!(
            runs_to_typst(text.runs(), &config),
            message_to_typst(Some("<b>x</b> y"), &config)
        );
    }

    #[test]
    fn renders_pdf() {
        let message = "<ol><li><b>a</b></li><li>b</li></ol>";
        let pdf = message_to_pdf(Some(message), &Config::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_pdf_for_empty_message() {
        let pdf = message_to_pdf(None, &Config::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn json_shape() {
        let text = format(Some("<b>hi</b>"));
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["kind"], "runs");
        assert_eq!(json["value"][0]["content"], "hi");
        assert_eq!(json["value"][0]["style"]["bold"], true);
        assert_eq!(json["value"][0]["style"]["italic"], false);

        let empty = serde_json::to_value(format(None)).unwrap();
        assert_eq!(empty, serde_json::json!({"kind": "plain", "value": ""}));
    }
}
