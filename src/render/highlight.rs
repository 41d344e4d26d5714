use std::sync::OnceLock;

use super::{ColorStyle, Palette};

/// Where highlighted text is going to be displayed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Terminal,
    Html,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token {
    Whitespace,
    Punct,
    Number,
    Str,
    Keyword,
    Type,
    Ident,
}

impl Token {
    const fn style(self) -> Option<Palette> {
        match self {
            Self::Str => Some(Palette::DarkRed),
            Self::Number => Some(Palette::DarkGreen),
            Self::Keyword => Some(Palette::Purple),
            Self::Type => Some(Palette::DarkBlue),
            Self::Whitespace | Self::Punct | Self::Ident => None,
        }
    }

    const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Whitespace => None,
            Self::Punct => Some("p"),
            Self::Number => Some("m"),
            Self::Str => Some("s"),
            Self::Keyword => Some("k"),
            Self::Type => Some("nc"),
            Self::Ident => Some("n"),
        }
    }
}

const KEYWORDS: &[&str] = &[
    "true", "false", "None", "Some", "Ok", "Err", "fn", "let", "mut", "pub", "impl", "struct",
    "enum", "self", "Self", "use", "mod", "crate",
];

/// A small highlighter for `Debug`-style value text and Rust backtraces
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlighter {
    css_class: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::with_css_class("highlight")
    }
}

impl Highlighter {
    pub fn with_css_class(css_class: impl Into<String>) -> Self {
        Self {
            css_class: css_class.into(),
        }
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    pub fn render(&self, code: &str, target: Target) -> String {
        let tokens = tokenize(code);
        match target {
            Target::Terminal => tokens
                .into_iter()
                .map(|(token, text)| match token.style() {
                    Some(palette) => palette.paint(text).to_string(),
                    None => text.to_string(),
                })
                .collect(),

            Target::Html => {
                let mut out = format!("<div class=\"{}\"><pre>", self.css_class);
                for (token, text) in tokens {
                    match token.css_class() {
                        Some(class) => {
                            out.push_str(&format!(
                                "<span class=\"{class}\">{text}</span>",
                                text = html_escape(text)
                            ));
                        }
                        None => out.push_str(&html_escape(text)),
                    }
                }
                out.push_str("</pre></div>\n");
                out
            }
        }
    }

    /// Highlights the lines of a panic message and its backtrace
    pub fn render_traceback(&self, traceback: &str) -> String {
        struct Patterns {
            panicked: regex::Regex,
            frame: regex::Regex,
            location: regex::Regex,
        }

        static PATTERNS: OnceLock<Patterns> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| Patterns {
            panicked: regex::Regex::new(r"^thread '(?P<thread>[^']*)' panicked at (?P<at>.*)$")
                .expect("valid panic pattern"),
            frame: regex::Regex::new(r"^(?P<indent>\s*)(?P<index>\d+): (?P<symbol>.*)$")
                .expect("valid frame pattern"),
            location: regex::Regex::new(r"^(?P<indent>\s*)at (?P<path>.*)$")
                .expect("valid location pattern"),
        });

        let paint = |style: Palette, text: &str| ColorStyle::from(style).paint(text).to_string();

        let mut out = String::with_capacity(traceback.len());
        for (n, line) in traceback.split('\n').enumerate() {
            if n > 0 {
                out.push('\n');
            }

            if let Some(caps) = patterns.panicked.captures(line) {
                out.push_str(&format!(
                    "{thread} '{name}' {panicked} {at}",
                    thread = paint(Palette::Red, "thread"),
                    name = paint(Palette::Yellow, &caps["thread"]),
                    panicked = paint(Palette::Red, "panicked at"),
                    at = paint(Palette::Teal, &caps["at"]),
                ));
            } else if let Some(caps) = patterns.frame.captures(line) {
                out.push_str(&format!(
                    "{indent}{index}: {symbol}",
                    indent = &caps["indent"],
                    index = paint(Palette::DarkGray, &caps["index"]),
                    symbol = paint(Palette::Blue, &caps["symbol"]),
                ));
            } else if let Some(caps) = patterns.location.captures(line) {
                out.push_str(&format!(
                    "{indent}{at} {path}",
                    indent = &caps["indent"],
                    at = paint(Palette::Faint, "at"),
                    path = paint(Palette::DarkGreen, &caps["path"]),
                ));
            } else {
                out.push_str(line);
            }
        }
        out
    }
}

fn tokenize(code: &str) -> Vec<(Token, &str)> {
    use unicode_segmentation::UnicodeSegmentation as _;

    let mut tokens = Vec::new();
    // start of an open string literal, and whether the last segment was an escape
    let mut string: Option<(usize, bool)> = None;

    for (index, segment) in code.split_word_bound_indices() {
        if let Some((start, escaped)) = string {
            string = match segment {
                "\"" if !escaped => {
                    tokens.push((Token::Str, &code[start..index + segment.len()]));
                    None
                }
                "\\" => Some((start, !escaped)),
                _ => Some((start, false)),
            };
            continue;
        }

        let head = segment.chars().next().unwrap_or_default();
        let token = match head {
            '"' => {
                string = Some((index, false));
                continue;
            }
            c if c.is_whitespace() => Token::Whitespace,
            c if c.is_ascii_digit() => Token::Number,
            c if c.is_alphabetic() || c == '_' => {
                if KEYWORDS.contains(&segment) {
                    Token::Keyword
                } else if c.is_uppercase() {
                    Token::Type
                } else {
                    Token::Ident
                }
            }
            _ => Token::Punct,
        };
        tokens.push((token, segment));
    }

    // an unterminated literal runs to the end
    if let Some((start, _)) = string {
        tokens.push((Token::Str, &code[start..]));
    }

    tokens
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
