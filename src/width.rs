use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_REFRESH_SECONDS: i64 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cached {
    value: usize,
    captured_at: DateTime<Utc>,
}

/// The column count of the terminal, cached for a short while so resizes are
/// noticed without querying the terminal on every report.
///
/// The cache lives in a [`Cell`], so a `TerminalWidth` cannot be shared
/// between threads.
pub struct TerminalWidth {
    interactive: bool,
    fallback: usize,
    ttl: Duration,
    probe: fn() -> Option<usize>,
    cache: Cell<Option<Cached>>,
}

impl std::fmt::Debug for TerminalWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalWidth")
            .field("interactive", &self.interactive)
            .field("fallback", &self.fallback)
            .field("ttl", &self.ttl)
            .field("cache", &self.cache.get())
            .finish()
    }
}

impl Default for TerminalWidth {
    fn default() -> Self {
        Self::new(
            stdout_is_terminal(),
            DEFAULT_WIDTH,
            Duration::seconds(DEFAULT_REFRESH_SECONDS),
        )
    }
}

impl TerminalWidth {
    pub fn new(interactive: bool, fallback: usize, ttl: Duration) -> Self {
        Self {
            interactive,
            fallback: fallback.max(1),
            ttl,
            probe: query_terminal,
            cache: Cell::new(None),
        }
    }

    /// A width that never queries the terminal
    pub fn fixed(width: usize) -> Self {
        Self::new(false, width, Duration::seconds(DEFAULT_REFRESH_SECONDS))
    }

    /// Replaces the terminal query, e.g. to simulate a resize
    pub fn with_probe(self, probe: fn() -> Option<usize>) -> Self {
        Self { probe, ..self }
    }

    pub const fn fallback(&self) -> usize {
        self.fallback
    }

    pub fn width(&self) -> usize {
        self.width_at(Utc::now())
    }

    pub(crate) fn width_at(&self, now: DateTime<Utc>) -> usize {
        if !self.interactive {
            return self.fallback;
        }

        if let Some(cached) = self.cache.get() {
            if now - cached.captured_at <= self.ttl {
                return cached.value;
            }
        }

        let value = match (self.probe)() {
            Some(width) if width > 0 => width,
            _ => {
                log::debug!("cannot query the terminal width, using {}", self.fallback);
                self.fallback
            }
        };

        log::trace!("terminal width refreshed: {value}");
        self.cache.set(Some(Cached {
            value,
            captured_at: now,
        }));
        value
    }
}

pub fn stdout_is_terminal() -> bool {
    use is_terminal::IsTerminal as _;
    std::io::stdout().is_terminal()
}

fn query_terminal() -> Option<usize> {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(width), _)| width)
        .map(usize::from)
}
