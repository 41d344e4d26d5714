use std::io::Write as _;

use report::*;

/// Prints `[LEVEL] message` to stderr, filtered by `REPORT_LOG` (default: warn)
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr(), "[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger() {
    let level = std::env::var("REPORT_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Warn);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse()?;

    let mut config = Config::load()?;
    if let Some(mode) = args.color {
        config.colors.mode = mode;
    }
    let reporter = Reporter::from_config(&config);

    let message = args.message.join(" ");

    if args.demo {
        let out = std::io::stdout();
        let mut out = out.lock();
        return Demo::show_off(&mut out, &reporter);
    }

    if args.line {
        reporter.colorizer().draw_line(&message, args.length, true);
        return Ok(());
    }

    if let Some(label) = &args.label {
        let labeled = args
            .sub_labels
            .iter()
            .fold(LabeledReporter::new(label.as_str()), |labeled, name| {
                labeled.with_sub_label(name)
            });
        let labeled = if args.warn {
            labeled.with_sub_label("warn")
        } else {
            labeled
        };
        println!("{}", labeled.render_with(reporter.colorizer(), &message));
        return Ok(());
    }

    if message.is_empty() {
        eprintln!("please provide something to report");
        std::process::exit(1)
    }

    let out = std::io::stdout();
    let mut out = out.lock();
    reporter.report(
        &mut out,
        ReportRequest::message(message),
        ReportOptions::at(site!()),
    )?;
    Ok(())
}
