use std::io::Write;

use crate::{LabeledReporter, ReportOptions, ReportRequest, Reporter, Value};

pub struct Demo;

struct Sample {
    name: &'static str,
    retries: u32,
}

impl Sample {
    fn method(&self, writer: &mut dyn Write, reporter: &Reporter) -> crate::Result<()> {
        reporter.report(
            writer,
            ReportRequest::message("hello from {name}").named("name", self.name),
            ReportOptions::at(crate::site!(self)),
        )
    }

    fn associated(writer: &mut dyn Write, reporter: &Reporter) -> crate::Result<()> {
        reporter.report(
            writer,
            ReportRequest::message("no receiver here"),
            ReportOptions::at(crate::site!()),
        )
    }

    fn with_helper(&self, writer: &mut dyn Write, reporter: &Reporter) -> crate::Result<()> {
        fn helper(sample: &Sample, writer: &mut dyn Write, reporter: &Reporter) -> crate::Result<()> {
            reporter.report(
                writer,
                ReportRequest::message(format!("{} retries left", sample.retries)),
                ReportOptions::at(crate::site!(sample)),
            )
        }
        helper(self, writer, reporter)
    }
}

fn free_function(writer: &mut dyn Write, reporter: &Reporter) -> crate::Result<()> {
    let sample = Sample {
        name: "a free function",
        retries: 3,
    };

    reporter.report(
        writer,
        ReportRequest::values([
            Value::of(sample.name),
            Value::of(&sample.retries),
            Value::of(&Some([1.5, 2.5])),
        ]),
        ReportOptions::at(crate::site!()),
    )?;

    reporter.report(
        writer,
        ReportRequest::message("unmatched placeholders keep the values apart")
            .named("attempt", 2)
            .named("elapsed", "35ms"),
        ReportOptions::at(crate::site!()).with_header("custom header"),
    )?;

    reporter.report(
        writer,
        ReportRequest::message(
            "a rather long message that will not fit on the same line as its header \
             in most terminals, so it is printed below it instead",
        ),
        ReportOptions::at(crate::site!()),
    )
}

impl Demo {
    /// Writes a few reports from different kinds of functions
    pub fn show_off(writer: &mut dyn Write, reporter: &Reporter) -> anyhow::Result<()> {
        let colorizer = reporter.colorizer();
        let sample = Sample {
            name: "a method",
            retries: 2,
        };

        writeln!(writer, "{}", colorizer.draw_line("reports", 80, false))?;
        free_function(writer, reporter)?;
        sample.method(writer, reporter)?;
        Sample::associated(writer, reporter)?;
        sample.with_helper(writer, reporter)?;

        writeln!(writer, "{}", colorizer.draw_line("labels", 80, false))?;
        let labeled = LabeledReporter::new("demo");
        writeln!(writer, "{}", labeled.render_with(colorizer, "Some(\"plain\")"))?;
        writeln!(
            writer,
            "{}",
            labeled
                .with_sub_label("net")
                .with_sub_label("warn")
                .render_with(colorizer, "connection reset after 3 attempts")
        )?;

        writer.flush()?;
        Ok(())
    }
}
