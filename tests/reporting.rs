use std::io::Write as _;

use report::{
    string::strip_ansi, CallerResolver, Colorizer, ReportOptions, ReportRequest, Reporter,
    TerminalWidth, Theme, Value,
};

#[inline(never)]
fn report_to_string(reporter: &Reporter, request: ReportRequest, options: ReportOptions) -> String {
    let mut out = Vec::new();
    reporter.report(&mut out, request, options).unwrap();
    String::from_utf8(out).unwrap()
}

fn colored(width: usize) -> Reporter {
    Reporter::new(
        Colorizer::new(true, Theme::default()),
        TerminalWidth::fixed(width),
        CallerResolver::default(),
    )
}

struct Service {
    retries: u32,
}

impl Service {
    fn restart(&self, reporter: &Reporter) -> String {
        report_to_string(
            reporter,
            ReportRequest::message("restarting {retries}").named("retries", self.retries),
            ReportOptions::at(report::site!(self)),
        )
    }

    fn create(reporter: &Reporter) -> String {
        report_to_string(
            reporter,
            ReportRequest::message("created"),
            ReportOptions::at(report::site!()),
        )
    }
}

#[test]
fn free_function_names_itself_and_ends_with_the_message() {
    let out = report_to_string(
        &Reporter::plain(120),
        ReportRequest::message("hello there"),
        ReportOptions::at(report::site!()),
    );

    assert_eq!(
        out,
        " tests/reporting.rs -- <??>.free_function_names_itself_and_ends_with_the_message -- hello there\n"
    );
    assert!(out.trim_end().ends_with("hello there"));
}

#[test]
fn method_names_its_type() {
    let out = Service { retries: 2 }.restart(&Reporter::plain(120));
    assert_eq!(out, " tests/reporting.rs -- Service.restart -- restarting 2\n");
    assert!(out.starts_with(" tests/reporting.rs"));
}

#[test]
fn associated_function_has_no_type() {
    let out = Service::create(&Reporter::plain(120));
    assert!(out.contains("<??>.create"), "{out}");
}

#[test]
fn narrow_terminal_moves_the_message_down() {
    let out = report_to_string(
        &Reporter::plain(40),
        ReportRequest::message("this message will not fit beside the header"),
        ReportOptions::at(report::site!()),
    );
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            " tests/reporting.rs -- <??>.narrow_terminal_moves_the_message_down",
            "  this message will not fit beside the header",
        ]
    );
}

#[test]
fn header_override() {
    let out = report_to_string(
        &Reporter::plain(120),
        ReportRequest::message("done"),
        ReportOptions::at(report::site!()).with_header("startup"),
    );
    assert_eq!(out, " tests/reporting.rs -- startup -- done\n");
}

#[test]
fn trailing_writes_come_last() {
    let reporter = Reporter::plain(120);
    let mut out = Vec::new();
    reporter
        .report(
            &mut out,
            ReportRequest::values([Value::of(&1), Value::of("two")]),
            ReportOptions::at(report::site!()),
        )
        .unwrap();
    writeln!(out, "MARKER").unwrap();

    let out = String::from_utf8(out).unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], r#" args=(1, "two")"#);
    assert_eq!(lines.last(), Some(&"MARKER"));
}

#[test]
fn color_is_only_decoration() {
    let requests = || {
        [
            ReportRequest::message("short"),
            ReportRequest::message("a message long enough to be pushed below its header line"),
            ReportRequest::values([Value::of(&Some("x")), Value::of(&[1, 2, 3])]),
            ReportRequest::message("{a} and {b}").named("a", 1).named("b", "two"),
            ReportRequest::message("no placeholders").named("extra", 3.5),
        ]
    };

    for width in [40, 80, 200] {
        for (plain, fancy) in requests().into_iter().zip(requests()) {
            let expected = report_to_string(
                &Reporter::plain(width),
                plain,
                ReportOptions::at(report::site!()),
            );
            let decorated = report_to_string(&colored(width), fancy, ReportOptions::at(report::site!()));

            assert_ne!(decorated, expected);
            assert_eq!(strip_ansi(&decorated), expected);
        }
    }
}

#[test]
fn walking_the_stack_finds_the_caller() {
    #[inline(never)]
    fn reported_from_a_walked_stack() -> String {
        report_to_string(
            &Reporter::plain(200),
            ReportRequest::message("found"),
            ReportOptions::default().with_skip_frames(report::DEFAULT_SKIP_FRAMES + 1),
        )
    }

    let out = reported_from_a_walked_stack();
    assert!(out.contains("<??>.reported_from_a_walked_stack"), "{out}");
    assert!(out.trim_end().ends_with("-- found"), "{out}");
}

#[test]
fn too_many_skipped_frames_is_an_error() {
    let mut out = Vec::new();
    let err = Reporter::plain(80)
        .report(
            &mut out,
            ReportRequest::message("lost"),
            ReportOptions::default().with_skip_frames(usize::MAX / 2),
        )
        .unwrap_err();
    assert!(matches!(err, report::Error::StackUnderflow { .. }));
    assert!(out.is_empty());
}

#[test]
fn io_errors_are_returned() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = Reporter::plain(80)
        .report(
            &mut Broken,
            ReportRequest::message("nowhere"),
            ReportOptions::at(report::site!()),
        )
        .unwrap_err();
    match err {
        report::Error::Io(err) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
        err => panic!("unexpected error: {err}"),
    }
}
