use super::Colorizer;

impl Colorizer {
    /// Draws a divider of dashes `total_length` columns wide with `message`
    /// centered in it.
    ///
    /// A message is padded with a space on either side. When the remaining
    /// width is odd the extra column is dropped, so the line can come out one
    /// column short. The line is printed to stdout when `display` is set.
    pub fn draw_line(&self, message: &str, total_length: usize, display: bool) -> String {
        let mut message = message.to_string();
        if !message.is_empty() && !message.starts_with(' ') {
            message.insert(0, ' ');
        }
        if !message.is_empty() && !message.ends_with(' ') {
            message.push(' ');
        }

        let side = total_length.saturating_sub(crate::string::display_width(&message)) / 2;
        let dashes = "-".repeat(side);
        let line = format!("{dashes}{message}{dashes}");

        let out = self.paint(self.theme().line, &line);
        if display {
            println!("{out}");
        }
        out
    }
}
