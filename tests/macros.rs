use report::string::strip_ansi;

// the default reporter follows the terminal, so compare without decoration
// and without assuming the header and message share a line
fn plain(out: Vec<u8>) -> String {
    strip_ansi(&String::from_utf8(out).unwrap()).into_owned()
}

struct Thing;

impl Thing {
    fn method(&self) -> String {
        let mut out = Vec::new();
        report::report_to!(out, self => "from a method").unwrap();
        plain(out)
    }
}

trait Greeter {
    fn greet(&self) -> String {
        let mut out = Vec::new();
        report::report_to!(out, self => "hi").unwrap();
        plain(out)
    }
}

impl Greeter for Thing {}

impl Thing {
    fn shout(&self) {
        report::report!(self => "from {name}"; name = "a method");
    }

    fn boxed(self: Box<Self>) -> String {
        let mut out = Vec::new();
        report::report_to!(out, self => "boxed").unwrap();
        plain(out)
    }
}

#[test]
fn named_values_fill_the_message() {
    let mut out = Vec::new();
    report::report_to!(out, "hello {who}"; who = "x").unwrap();
    let out = plain(out);

    assert!(out.starts_with(" tests/macros.rs -- <??>.named_values_fill_the_message"), "{out}");
    assert!(out.trim_end().ends_with("hello x"), "{out}");
    assert!(!out.contains("who"), "{out}");
}

#[test]
fn several_values_and_leftover_names() {
    let mut out = Vec::new();
    report::report_to!(out, 1, "two"; extra = 3).unwrap();
    let out = plain(out);

    assert_eq!(
        out.lines().collect::<Vec<_>>(),
        vec![
            " tests/macros.rs -- <??>.several_values_and_leftover_names",
            r#" args=(1, "two")"#,
            " {extra: 3}",
        ]
    );
}

#[test]
fn nothing_to_report() {
    let mut out = Vec::new();
    report::report_to!(out).unwrap();
    assert_eq!(
        plain(out),
        " tests/macros.rs -- <??>.nothing_to_report\n args=()\n"
    );
}

#[test]
fn receivers_name_their_type() {
    let out = Thing.method();
    assert!(out.contains(" -- Thing.method"), "{out}");
    assert!(out.trim_end().ends_with("from a method"), "{out}");

    let out = Thing.greet();
    assert!(out.contains(" -- Thing.greet"), "{out}");
    assert!(!out.contains("[nested]"), "{out}");

    let out = Box::new(Thing).boxed();
    assert!(out.contains(" -- Thing.boxed"), "{out}");
    assert!(!out.contains("[nested]"), "{out}");
}

#[test]
fn closures_report_their_function() {
    let mut out = Vec::new();
    let mut run = || report::report_to!(out, "inside").unwrap();
    run();
    assert!(plain(out).contains("<??>.closures_report_their_function"));
}

#[test]
fn whoami() {
    assert_eq!(report::whoami!(), "whoami");
}

#[test]
fn reporting_to_stdout() {
    report::report!("to stdout {n}"; n = 1);
    Thing.shout();
    report::report!("a", 2, Some(3.0));
}
