use crate::config::Config;
use crate::run::{RenderableText, StyleSet, TextRun};

/// Convert formatted message text to Typst markup
pub fn renderable_to_typst(text: &RenderableText, config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    match text {
        RenderableText::Plain(plain) => {
            let mut at_line_start = true;
            escape_text(plain, &mut at_line_start, &mut out);
        }
        RenderableText::Runs(runs) => runs_to_typst_body(runs, &mut out),
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Convert runs to a standalone Typst document
pub fn runs_to_typst(runs: &[TextRun], config: &Config) -> String {
    renderable_to_typst(&RenderableText::Runs(runs.to_vec()), config)
}

fn emit_preamble(config: &Config, out: &mut String) {
    out.push_str("#set par(linebreaks: \"optimized\")\n");

    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }

    let mut text_args = Vec::new();
    if let Some(family) = &config.font.family {
        text_args.push(format!("font: \"{}\"", family.replace('\\', "\\\\").replace('"', "\\\"")));
    }
    if let Some(size) = &config.font.size {
        text_args.push(format!("size: {}", size));
    }
    if !text_args.is_empty() {
        out.push_str(&format!("#set text({})\n", text_args.join(", ")));
    }

    out.push('\n');
}

fn runs_to_typst_body(runs: &[TextRun], out: &mut String) {
    let mut at_line_start = true;
    for run in runs {
        run_to_typst(run, &mut at_line_start, out);
    }
}

fn run_to_typst(run: &TextRun, at_line_start: &mut bool, out: &mut String) {
    if run.content.is_empty() {
        return;
    }

    let wrappers = style_wrappers(run.style);
    if wrappers.is_empty() {
        escape_text(&run.content, at_line_start, out);
        return;
    }

    for name in wrappers.iter().rev() {
        out.push('#');
        out.push_str(name);
        out.push('[');
    }
    // A content block starts a fresh line for list and heading markers
    let mut inner_line_start = true;
    escape_text(&run.content, &mut inner_line_start, out);
    for _ in &wrappers {
        out.push(']');
    }
    // End the embedded expression so following text is not read as a
    // method call or argument list
    out.push(';');
    *at_line_start = false;
}

/// Typst functions for a style, innermost first
fn style_wrappers(style: StyleSet) -> Vec<&'static str> {
    let mut wrappers = Vec::new();
    if style.bold {
        wrappers.push("strong");
    }
    if style.italic {
        wrappers.push("emph");
    }
    if style.underline {
        wrappers.push("underline");
    }
    if style.strikethrough {
        wrappers.push("strike");
    }
    wrappers
}

fn escape_text(text: &str, at_line_start: &mut bool, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                // Forced line break
                out.push_str(" \\\n");
                *at_line_start = true;
                continue;
            }
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '~' | '/' => {
                out.push('\\');
                out.push(ch);
            }
            // List and heading markers only matter at the start of a line
            '-' | '+' | '=' if *at_line_start => {
                out.push('\\');
                out.push(ch);
            }
            '0'..='9' if *at_line_start => {
                // `1. ` at line start would become a numbered list
                out.push(ch);
                while let Some(&digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    out.push(digit);
                    chars.next();
                }
                if chars.peek() == Some(&'.') {
                    chars.next();
                    out.push_str("\\.");
                }
            }
            ' ' | '\t' if *at_line_start => {
                out.push(ch);
                continue;
            }
            _ => out.push(ch),
        }
        *at_line_start = false;
    }
}
