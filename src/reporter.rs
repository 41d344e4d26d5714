use std::{
    fmt::{Debug, Display},
    io::Write,
};

use is_terminal::IsTerminal;

use crate::{
    layout::Layout,
    string::{all_placeholders_present, display_width, format_named},
    CallerInfo, CallerResolver, Colorizer, Config, Frame, TerminalWidth,
};

/// Frames between the stack capture and the code that asked for a report
pub const DEFAULT_SKIP_FRAMES: usize = 3;

// multiple values are printed on one line while they fit in this many columns
const COMPACT_WIDTH: usize = 80;

/// A reported value, pre-rendered with `Debug`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    compact: String,
    pretty: String,
}

impl Value {
    pub fn of<T>(value: &T) -> Self
    where
        T: Debug + ?Sized,
    {
        Self {
            compact: format!("{value:?}"),
            pretty: format!("{value:#?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// a single value, shown with `Display`
    Message(String),
    /// zero or several values, shown together as a tuple
    Values(Vec<Value>),
}

/// Everything passed to a single report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRequest {
    payload: Payload,
    named: Vec<(String, String)>,
}

impl ReportRequest {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            named: Vec::new(),
        }
    }

    pub fn message(message: impl Display) -> Self {
        Self::new(Payload::Message(message.to_string()))
    }

    pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(Payload::Values(values.into_iter().collect()))
    }

    /// Adds a named value.
    ///
    /// With a single message, named values fill in matching `{key}`
    /// placeholders; otherwise they are printed after the payload.
    pub fn named(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.named.push((key.into(), value.to_string()));
        self
    }
}

/// Per call overrides
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    /// frames to skip when walking the live stack, the reporter's default
    /// when unset
    pub skip_frames: Option<usize>,
    /// shown in place of the caller's `Type.function`
    pub header: Option<String>,
    /// the caller, when known; otherwise the live stack is walked
    pub site: Option<Frame>,
    /// write this report without decoration, even if the reporter colors
    pub plain: bool,
}

impl ReportOptions {
    pub fn at(site: Frame) -> Self {
        Self {
            site: Some(site),
            ..Self::default()
        }
    }

    pub fn with_skip_frames(self, skip_frames: usize) -> Self {
        Self {
            skip_frames: Some(skip_frames),
            ..self
        }
    }

    pub fn with_header(self, header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..self
        }
    }

    pub fn plain(self) -> Self {
        Self {
            plain: true,
            ..self
        }
    }

    /// Drops decoration unless `stream` is a terminal
    pub fn for_stream<S>(self, stream: &S) -> Self
    where
        S: IsTerminal,
    {
        Self {
            plain: self.plain || !stream.is_terminal(),
            ..self
        }
    }
}

/// Writes caller-annotated reports.
///
/// A reporter owns its terminal width cache and is not `Sync`; the reporting
/// macros use one reporter per thread (see [`Reporter::with_default`]).
#[derive(Debug)]
pub struct Reporter {
    colorizer: Colorizer,
    width: TerminalWidth,
    resolver: CallerResolver,
    skip_frames: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Reporter {
    pub fn new(colorizer: Colorizer, width: TerminalWidth, resolver: CallerResolver) -> Self {
        Self {
            colorizer,
            width,
            resolver,
            skip_frames: DEFAULT_SKIP_FRAMES,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            colorizer: Colorizer::detect(config.colors.mode, config.appearance.clone()),
            width: config.terminal.width(),
            resolver: CallerResolver::new(config.report.max_path_segments),
            skip_frames: config.report.skip_frames,
        }
    }

    /// A reporter without color, laying out for a terminal `width` columns wide
    pub fn plain(width: usize) -> Self {
        Self::new(
            Colorizer::plain(),
            TerminalWidth::fixed(width),
            CallerResolver::default(),
        )
    }

    pub fn with_skip_frames(self, skip_frames: usize) -> Self {
        Self {
            skip_frames,
            ..self
        }
    }

    /// Runs `f` with this thread's reporter, built from the user's
    /// configuration on first use.
    pub fn with_default<R>(f: impl FnOnce(&Reporter) -> R) -> R {
        thread_local! {
            static DEFAULT: Reporter = Reporter::from_config(&Config::load_or_default());
        }
        DEFAULT.with(f)
    }

    pub const fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    pub const fn terminal_width(&self) -> &TerminalWidth {
        &self.width
    }

    pub const fn resolver(&self) -> &CallerResolver {
        &self.resolver
    }

    /// Writes a report for the caller described by `options` to `stream`.
    ///
    /// Without a call site in `options` the live stack is walked, skipping
    /// `skip_frames` frames.
    #[inline(never)]
    pub fn report<W>(
        &self,
        stream: &mut W,
        request: ReportRequest,
        options: ReportOptions,
    ) -> crate::Result<()>
    where
        W: Write + ?Sized,
    {
        let caller = self.resolve_caller(&options)?;
        let header = options.header.as_deref();
        let lines = if options.plain && self.colorizer.is_enabled() {
            self.lines(&self.colorizer.without_color(), &caller, request, header)
        } else {
            self.render(&caller, request, header)
        };
        write_lines(stream, lines).map_err(Into::into)
    }

    #[inline(never)]
    fn resolve_caller(&self, options: &ReportOptions) -> crate::Result<CallerInfo> {
        match &options.site {
            Some(site) => Ok(self.resolver.resolve_frame(site)),
            None => self
                .resolver
                .resolve_current(options.skip_frames.unwrap_or(self.skip_frames)),
        }
    }

    /// Writes the report lines for an already resolved caller and flushes
    /// `stream`
    pub fn write_report<W>(
        &self,
        stream: &mut W,
        caller: &CallerInfo,
        request: ReportRequest,
        header: Option<&str>,
    ) -> std::io::Result<()>
    where
        W: Write + ?Sized,
    {
        write_lines(stream, self.render(caller, request, header))
    }

    /// The lines of a report, without trailing newlines
    pub fn render(
        &self,
        caller: &CallerInfo,
        request: ReportRequest,
        header: Option<&str>,
    ) -> Vec<String> {
        self.lines(&self.colorizer, caller, request, header)
    }

    fn lines(
        &self,
        colorizer: &Colorizer,
        caller: &CallerInfo,
        request: ReportRequest,
        header: Option<&str>,
    ) -> Vec<String> {
        let layout = Layout::new(colorizer, &self.width);
        let ReportRequest { payload, named } = request;

        let (mut lines, named) = match payload {
            Payload::Message(message) => {
                let (message, named) = apply_named(message, named);
                (layout.compose(caller, header, message.trim()), named)
            }
            Payload::Values(values) => {
                let qualifier = header.map_or_else(|| caller.qualifier(), ToString::to_string);
                let args = colorizer.highlight(&pretty_tuple(&values));
                let lines = vec![
                    layout.header(&caller.source_file, &qualifier),
                    format!(" args={}", args.trim()),
                ];
                (lines, named)
            }
        };

        if !named.is_empty() {
            let named = named
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(" {}", colorizer.highlight(&format!("{{{named}}}"))));
        }

        lines
    }
}

fn write_lines<W>(stream: &mut W, lines: Vec<String>) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    for line in lines {
        writeln!(stream, "{line}")?;
    }
    stream.flush()
}

/// Fills `{key}` placeholders when every named value has one.
///
/// The named values are consumed in that case, even when formatting fails and
/// the message is kept as it was.
fn apply_named(message: String, named: Vec<(String, String)>) -> (String, Vec<(String, String)>) {
    if !all_placeholders_present(&message, named.iter().map(|(key, _)| key.as_str())) {
        return (message, named);
    }

    let pairs = named.iter().map(|(key, value)| (key.as_str(), value.as_str()));
    match format_named(&message, pairs) {
        Ok(formatted) => (formatted, Vec::new()),
        Err(err) => {
            log::debug!("keeping the message unformatted: {err:?}");
            (message, Vec::new())
        }
    }
}

/// Renders values as a tuple, one element per line if it would be too wide
fn pretty_tuple(values: &[Value]) -> String {
    let trailing = if values.len() == 1 { "," } else { "" };

    let compact = values
        .iter()
        .map(|value| value.compact.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let compact = format!("({compact}{trailing})");
    if display_width(&compact) <= COMPACT_WIDTH {
        return compact;
    }

    let pretty = values
        .iter()
        .map(|value| value.pretty.replace('\n', "\n "))
        .collect::<Vec<_>>()
        .join(",\n ");
    format!("({pretty}{trailing})")
}
