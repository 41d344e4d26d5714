use crate::{Colorizer, Reporter};

pub const DEFAULT_LABEL: &str = ">>";

const WARNING: &str = "WARNING";

/// Prints messages behind a dotted label, e.g. `net.WARNING: message`.
///
/// Labels are extended with [`LabeledReporter::with_sub_label`], which returns
/// a new reporter and leaves this one untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabeledReporter {
    label: String,
}

impl Default for LabeledReporter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl LabeledReporter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Appends `.name` to the label.
    ///
    /// `warn` (in any case, with or without a leading underscore) appends
    /// `.WARNING`. Any other name starting with `_` is internal and leaves the
    /// label unchanged.
    pub fn with_sub_label(&self, name: &str) -> Self {
        let name = if name.strip_prefix('_').unwrap_or(name).eq_ignore_ascii_case("warn") {
            WARNING
        } else if name.starts_with('_') {
            log::debug!("ignoring internal sub-label '{name}'");
            return self.clone();
        } else {
            name
        };

        Self {
            label: format!("{}.{name}", self.label),
        }
    }

    /// `label: message`, with the label painted and the message highlighted
    pub fn render_with(&self, colorizer: &Colorizer, message: &str) -> String {
        format!(
            "{label}: {message}",
            label = colorizer.paint(colorizer.theme().label, &self.label),
            message = colorizer.highlight(message)
        )
    }

    /// Renders with the current thread's default colorizer
    pub fn render(&self, message: &str) -> String {
        Reporter::with_default(|reporter| self.render_with(reporter.colorizer(), message))
    }

    /// Prints the message to stdout
    pub fn call(&self, message: &str) {
        println!("{}", self.render(message))
    }

    /// Prints the message to stdout under a `.WARNING` sub-label
    pub fn warn(&self, message: &str) {
        self.with_sub_label("warn").call(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::Theme, string::strip_ansi};

    #[test]
    fn default_label() {
        let out = LabeledReporter::default().render_with(&Colorizer::plain(), "hi");
        assert_eq!(out, ">>: hi");
    }

    #[test]
    fn sub_labels_chain() {
        let base = LabeledReporter::new("net");
        let sub = base.with_sub_label("http").with_sub_label("client");
        assert_eq!(sub.label(), "net.http.client");
        assert_eq!(base.label(), "net");
    }

    #[test]
    fn warn_sub_label() {
        let base = LabeledReporter::new("X");
        for name in ["warn", "_warn", "WARN", "_Warn"] {
            assert_eq!(base.with_sub_label(name).label(), "X.WARNING", "{name}");
        }
    }

    #[test]
    fn internal_names_are_ignored() {
        let base = LabeledReporter::new("X");
        assert_eq!(base.with_sub_label("_private").label(), "X");
        assert_eq!(base.with_sub_label("__warn").label(), "X");
    }

    #[test]
    fn colored_render_strips_to_plain() {
        let reporter = LabeledReporter::new("X").with_sub_label("sub");
        let colored = reporter.render_with(&Colorizer::new(true, Theme::default()), "msg 1");
        assert_eq!(
            strip_ansi(&colored),
            reporter.render_with(&Colorizer::plain(), "msg 1")
        );
        assert!(strip_ansi(&colored).starts_with("X.sub: "));
    }
}
