use std::sync::OnceLock;

/// Removes ANSI escape sequences (CSI and OSC) from `input`
pub fn strip_ansi(input: &str) -> std::borrow::Cow<'_, str> {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            regex::Regex::new(r"\x1b(?:\[[0-9;?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\))")
                .expect("valid ansi pattern")
        })
        .replace_all(input, "")
}

/// The number of terminal columns `input` occupies, ignoring escape sequences
pub fn display_width(input: &str) -> usize {
    use unicode_width::UnicodeWidthStr as _;
    strip_ansi(input).width()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    MissingKey(String),
    Positional,
    UnmatchedBrace,
}

/// Whether every key appears as a `{key}` placeholder in `template`.
///
/// This is vacuously true when there are no keys.
pub fn all_placeholders_present<'a, I>(template: &str, keys: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .all(|key| template.contains(&format!("{{{key}}}")))
}

/// Substitutes `{key}` placeholders in `template` with the matching named value.
///
/// `{{` and `}}` are literal braces. A format spec after `:` (or a conversion
/// after `!`) is accepted but ignored. Positional fields like `{}` or `{0}` are
/// not supported.
pub fn format_named<'a, I>(template: &str, named: I) -> Result<String, FormatError>
where
    I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
{
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return Err(FormatError::UnmatchedBrace),
                        Some(ch) => field.push(ch),
                    }
                }

                let name = field
                    .split(|c: char| c == ':' || c == '!')
                    .next()
                    .unwrap_or_default();

                if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FormatError::Positional);
                }

                let (_, value) = named
                    .clone()
                    .into_iter()
                    .find(|(key, _)| *key == name)
                    .ok_or_else(|| FormatError::MissingKey(name.to_string()))?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::UnmatchedBrace),
            ch => out.push(ch),
        }
    }

    Ok(out)
}
