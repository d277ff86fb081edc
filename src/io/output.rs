use crate::commands::reorder::ReorderOutcome;
use crate::rewrite::Diagnostic;
use colored::*;
use std::io::Write;

pub const COMPLETION_MESSAGE: &str = "Parameter reordering completed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_outcome(&mut self, outcome: &ReorderOutcome) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_outcome(&mut self, outcome: &ReorderOutcome) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(outcome)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> anyhow::Result<()> {
        writeln!(self.writer, "  {} {}", "warning:".yellow().bold(), diagnostic)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_outcome(&mut self, outcome: &ReorderOutcome) -> anyhow::Result<()> {
        let report = &outcome.report;
        writeln!(
            self.writer,
            "{} {}",
            "Rule headers:".bold(),
            outcome.path.display()
        )?;
        writeln!(
            self.writer,
            "  matched: {}  changed: {}",
            report.headers_matched, report.headers_changed
        )?;

        for rule in report.rules.iter().filter(|r| r.changed) {
            writeln!(
                self.writer,
                "  {} {} (line {}): {} parametric, {} ghost",
                "~".cyan(),
                rule.name,
                rule.line,
                rule.parametric,
                rule.ghost
            )?;
        }

        for diagnostic in &report.diagnostics {
            self.write_diagnostic(diagnostic)?;
        }

        if outcome.written {
            writeln!(self.writer, "{}", COMPLETION_MESSAGE.green())?;
        } else if outcome.would_change {
            writeln!(self.writer, "{}", "File would change (not written)".yellow())?;
        } else {
            writeln!(self.writer, "{}", "File already up to date".green())?;
        }
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Render `outcome` in `format` to `writer`.
pub fn write_report<W: Write>(
    format: OutputFormat,
    writer: W,
    outcome: &ReorderOutcome,
) -> anyhow::Result<()> {
    create_writer(format, writer).write_outcome(outcome)
}
