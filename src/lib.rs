//! Caller-annotated, colorized debug output.
//!
//! ```ignore
//! report::report!("loaded {count} entries"; count = 3);
//! // src/loader.rs -- <??>.load -- loaded 3 entries
//! ```

mod args;
pub use args::Args;

mod caller;
pub use caller::{
    truncate_path, CallerInfo, CallerResolver, Frame, Stack, NESTED_TAG, UNKNOWN_TYPE,
};

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};

mod labeled;
pub use labeled::{LabeledReporter, DEFAULT_LABEL};

mod layout;
pub use layout::{Layout, Placement};

mod macros;

pub mod render;
pub use render::{ColorMode, Colorizer, Demo, Highlighter, Palette, Theme};

mod reporter;
pub use reporter::{Payload, ReportOptions, ReportRequest, Reporter, Value, DEFAULT_SKIP_FRAMES};

pub mod string;

mod width;
pub use width::TerminalWidth;

#[doc(hidden)]
pub mod __private {
    use std::io::Write;

    use crate::{Frame, ReportRequest, Reporter};

    pub fn type_name_of<T>(_: T) -> &'static str {
        std::any::type_name::<T>()
    }

    pub fn receiver_type_name<T: ?Sized>(_: &T) -> &'static str {
        std::any::type_name::<T>()
    }

    pub fn whoami(marker: &'static str) -> &'static str {
        crate::caller::function_name(marker)
    }

    pub fn report_at<W>(stream: &mut W, site: Frame, request: ReportRequest) -> std::io::Result<()>
    where
        W: Write + ?Sized,
    {
        Reporter::with_default(|reporter| {
            let caller = reporter.resolver().resolve_frame(&site);
            reporter.write_report(stream, &caller, request, None)
        })
    }

    pub fn report_stdout(site: Frame, request: ReportRequest) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = report_at(&mut out, site, request) {
            panic!("failed printing to stdout: {err}")
        }
    }
}
