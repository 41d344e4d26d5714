use crate::{string::display_width, CallerInfo, Colorizer, TerminalWidth};

/// Separates the parts of a report line
pub const SEPARATOR: &str = " -- ";

/// Indents a payload placed below its header
pub const PAYLOAD_INDENT: &str = "  ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// header and payload share one line
    Inline,
    /// the payload goes on the line after the header
    Separate,
}

/// Decides how a report header and its payload are laid out.
///
/// All measurements are made on text without escape sequences.
pub struct Layout<'a> {
    colorizer: &'a Colorizer,
    width: &'a TerminalWidth,
}

impl<'a> Layout<'a> {
    pub fn new(colorizer: &'a Colorizer, width: &'a TerminalWidth) -> Self {
        Self { colorizer, width }
    }

    /// The columns taken by ` file -- qualifier`
    pub fn header_width(file: &str, qualifier: &str) -> usize {
        1 + display_width(file) + SEPARATOR.len() + display_width(qualifier)
    }

    pub fn placement(&self, header_width: usize, payload: &str) -> Placement {
        if display_width(payload) + SEPARATOR.len() + header_width < self.width.width() {
            Placement::Inline
        } else {
            Placement::Separate
        }
    }

    pub fn header(&self, file: &str, qualifier: &str) -> String {
        let theme = self.colorizer.theme();
        format!(
            " {file}{SEPARATOR}{qualifier}",
            file = self.colorizer.paint(theme.file, file),
            qualifier = self.colorizer.paint(theme.caller, qualifier),
        )
    }

    /// Lays out the header for `caller` (or the `qualifier` override) and a
    /// message, returning the lines to write.
    pub fn compose(&self, caller: &CallerInfo, qualifier: Option<&str>, payload: &str) -> Vec<String> {
        let resolved;
        let qualifier = match qualifier {
            Some(qualifier) => qualifier,
            None => {
                resolved = caller.qualifier();
                &resolved
            }
        };

        let header = self.header(&caller.source_file, qualifier);
        let header_width = Self::header_width(&caller.source_file, qualifier);
        let payload_style = self.colorizer.theme().payload;

        match self.placement(header_width, payload) {
            Placement::Inline => vec![format!(
                "{header}{SEPARATOR}{payload}",
                payload = self.colorizer.paint(payload_style, payload)
            )],
            Placement::Separate => vec![
                header,
                format!(
                    "{PAYLOAD_INDENT}{payload}",
                    payload = self.colorizer.paint(payload_style, payload)
                ),
            ],
        }
    }
}
