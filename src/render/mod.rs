mod color;
pub use color::{Color, ColorStyle, Palette};

mod theme;
pub use theme::Theme;

mod highlight;
pub use highlight::{Highlighter, Target};

mod line;

mod demo;
pub use demo::Demo;

/// When decorations should be emitted
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// only when stdout is an interactive terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => stdout_wants_color(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match () {
            _ if s.eq_ignore_ascii_case("auto") => Self::Auto,
            _ if s.eq_ignore_ascii_case("always") => Self::Always,
            _ if s.eq_ignore_ascii_case("never") => Self::Never,
            _ => return Err(crate::Error::UnknownColorMode(s.to_string())),
        };
        Ok(mode)
    }
}

/// Whether stdout is a terminal that should receive color
pub fn stdout_wants_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() || !crate::width::stdout_is_terminal() {
        return false;
    }
    !cfg!(windows) || yansi::Paint::enable_windows_ascii()
}

/// Decorates text with the console palette.
///
/// A disabled colorizer returns every input unchanged, so its output is what
/// a colored one produces after stripping escape sequences.
#[derive(Clone, Debug)]
pub struct Colorizer {
    enabled: bool,
    theme: Theme,
    highlighter: Highlighter,
}

impl Colorizer {
    pub fn new(enabled: bool, theme: Theme) -> Self {
        Self {
            enabled,
            theme,
            highlighter: Highlighter::default(),
        }
    }

    /// A colorizer that never decorates
    pub fn plain() -> Self {
        Self::new(false, Theme::default())
    }

    pub fn detect(mode: ColorMode, theme: Theme) -> Self {
        Self::new(mode.enabled(), theme)
    }

    pub fn with_highlighter(self, highlighter: Highlighter) -> Self {
        Self {
            highlighter,
            ..self
        }
    }

    /// The same theme and highlighter, without decoration
    pub fn without_color(&self) -> Self {
        Self {
            enabled: false,
            ..self.clone()
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub const fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn paint(&self, style: impl Into<ColorStyle>, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        style.into().paint(text).to_string()
    }

    /// Decorates `text` with the palette entry called `name`
    pub fn decorate(&self, name: &str, text: &str) -> crate::Result<String> {
        let palette: Palette = name.parse()?;
        Ok(self.paint(palette, text))
    }

    /// Decorates `text` and prints it to stdout
    pub fn print(&self, name: &str, text: &str) -> crate::Result<String> {
        let out = self.decorate(name, text)?;
        println!("{out}");
        Ok(out)
    }

    pub fn vertical_space(&self) {
        println!()
    }

    /// Syntax highlights value text (e.g. `Debug` output) for the terminal
    pub fn highlight(&self, code: &str) -> String {
        if !self.enabled {
            return code.to_string();
        }
        self.highlighter.render(code, Target::Terminal)
    }

    /// Syntax highlights panic messages and backtraces for the terminal
    pub fn highlight_traceback(&self, traceback: &str) -> String {
        if !self.enabled {
            return traceback.to_string();
        }
        self.highlighter.render_traceback(traceback)
    }

    /// Syntax highlights value text as an HTML fragment
    pub fn highlight_html(&self, code: &str) -> String {
        self.highlighter.render(code, Target::Html)
    }

    /// Converts console text into HTML line breaks
    pub fn to_html(text: &str) -> String {
        text.replace('\n', "<br/>")
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::detect(ColorMode::Auto, Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::strip_ansi;

    #[test]
    fn disabled_is_identity() {
        let colorizer = Colorizer::plain();
        assert_eq!(colorizer.decorate("red", "hello").unwrap(), "hello");
        assert_eq!(colorizer.highlight("Some(\"x\")"), "Some(\"x\")");
    }

    #[test]
    fn enabled_decorates() {
        let colorizer = Colorizer::new(true, Theme::default());
        let out = colorizer.decorate("darkteal", "hello").unwrap();
        assert_ne!(out, "hello");
        assert!(out.contains('\x1b'));
        assert_eq!(strip_ansi(&out), "hello");
    }

    #[test]
    fn unknown_style_fails_regardless_of_mode() {
        for colorizer in [Colorizer::plain(), Colorizer::new(true, Theme::default())] {
            assert!(matches!(
                colorizer.decorate("plaid", "hello"),
                Err(crate::Error::UnknownStyle(_))
            ));
        }
    }

    #[test]
    fn color_modes() {
        assert_eq!("Always".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("never".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!(!ColorMode::Never.enabled());
        assert!(matches!(
            "sometimes".parse::<ColorMode>(),
            Err(crate::Error::UnknownColorMode(_))
        ));
    }

    #[test]
    fn print_returns_what_it_printed() {
        let colorizer = Colorizer::plain();
        assert_eq!(colorizer.print("turquoise", "printed").unwrap(), "printed");
        assert!(colorizer.print("plaid", "not printed").is_err());
        colorizer.vertical_space();
    }

    #[test]
    fn html_ignores_the_terminal() {
        for colorizer in [Colorizer::plain(), Colorizer::new(true, Theme::default())] {
            let html = colorizer.highlight_html(r#"Some("a<b")"#);
            assert!(html.starts_with(r#"<div class="highlight"><pre>"#), "{html}");
            assert!(html.contains("a&lt;b"), "{html}");
            assert!(!html.contains('\x1b'));
        }
    }

    #[test]
    fn traceback_only_when_enabled() {
        let traceback = "thread 'main' panicked at src/main.rs:2:5\n   0: demo::main\n             at ./src/main.rs:2:5";
        assert_eq!(Colorizer::plain().highlight_traceback(traceback), traceback);

        let colored = Colorizer::new(true, Theme::default()).highlight_traceback(traceback);
        assert_ne!(colored, traceback);
        assert_eq!(strip_ansi(&colored), traceback);
    }

    #[test]
    fn html_line_breaks() {
        assert_eq!(Colorizer::to_html("a\nb\n"), "a<br/>b<br/>");
    }
}
