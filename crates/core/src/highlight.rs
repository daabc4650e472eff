//! Syntax-highlighted HTML rendering for snippets.
//!
//! Output is a complete HTML document with inline styles, so it can be
//! served as-is from the highlight endpoint. Rendering is deterministic:
//! equal inputs always produce byte-identical output.

use std::fmt::Write as _;
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::CoreError;

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    THEMES.get_or_init(ThemeSet::load_defaults)
}

/// Map a language tag to the file extension of its bundled syntax.
///
/// Returns `None` for tags rendered as plain text.
fn language_extension(language: &str) -> Option<&'static str> {
    let ext = match language {
        "bash" => "sh",
        "c" => "c",
        "clojure" => "clj",
        "cpp" => "cpp",
        "csharp" => "cs",
        "css" => "css",
        "d" => "d",
        "diff" => "diff",
        "erlang" => "erl",
        "go" => "go",
        "groovy" => "groovy",
        "haskell" => "hs",
        "html" => "html",
        "java" => "java",
        "javascript" => "js",
        "json" => "json",
        "latex" => "tex",
        "lisp" => "lisp",
        "lua" => "lua",
        "markdown" => "md",
        "objective-c" => "m",
        "ocaml" => "ml",
        "perl" => "pl",
        "php" => "php",
        "python" => "py",
        "r" => "r",
        "ruby" => "rb",
        "rust" => "rs",
        "scala" => "scala",
        "sql" => "sql",
        "tcl" => "tcl",
        "xml" => "xml",
        "yaml" => "yaml",
        _ => return None,
    };
    Some(ext)
}

/// Map a style tag to the name of a bundled theme.
fn theme_name(style: &str) -> &'static str {
    match style {
        "eighties" => "base16-eighties.dark",
        "mocha" => "base16-mocha.dark",
        "ocean" => "base16-ocean.dark",
        "ocean-light" => "base16-ocean.light",
        "solarized-dark" => "Solarized (dark)",
        "solarized-light" => "Solarized (light)",
        _ => "InspiredGitHub",
    }
}

fn find_syntax(language: &str) -> &'static SyntaxReference {
    let syntaxes = syntax_set();
    language_extension(language)
        .and_then(|ext| syntaxes.find_syntax_by_extension(ext))
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text())
}

fn find_theme(style: &str) -> Result<&'static Theme, CoreError> {
    let name = theme_name(style);
    theme_set()
        .themes
        .get(name)
        .ok_or_else(|| CoreError::Internal(format!("Bundled theme '{name}' is missing")))
}

fn css_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `code` as a standalone highlighted HTML document.
pub fn render_html(
    title: &str,
    code: &str,
    language: &str,
    style: &str,
    linenos: bool,
) -> Result<String, CoreError> {
    let syntaxes = syntax_set();
    let syntax = find_syntax(language);
    let theme = find_theme(style)?;

    let mut pre_style = String::new();
    if let Some(bg) = theme.settings.background {
        let _ = write!(pre_style, "background-color:{};", css_color(bg));
    }
    if let Some(fg) = theme.settings.foreground {
        let _ = write!(pre_style, "color:{};", css_color(fg));
    }

    let width = code.lines().count().max(1).to_string().len();
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut body = String::with_capacity(code.len() * 2);

    for (index, line) in LinesWithEndings::from(code).enumerate() {
        let regions = highlighter
            .highlight_line(line, syntaxes)
            .map_err(|e| CoreError::Internal(format!("Highlighting failed: {e}")))?;
        let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
            .map_err(|e| CoreError::Internal(format!("Highlighting failed: {e}")))?;
        if linenos {
            let _ = write!(
                body,
                "<span class=\"lineno\" style=\"opacity:0.5;user-select:none\">{:>width$} </span>",
                index + 1
            );
        }
        body.push_str(&html);
    }

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h2>{title}</h2>\n\
         <pre style=\"{pre_style}\">{body}</pre>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    ))
}
