//! Console sink implementation

use crate::core::{format, format_header, LogLevel, LogRecord, LoggerError, RecordText, Result, Sink};
use async_trait::async_trait;
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes formatted records to the standard streams
///
/// Verbose, debug and info go to stdout; warning and error go to stderr.
/// Structured payloads are printed as a marker line with the record's
/// bracketed fields, followed by the value as pretty JSON.
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            use_colors: false,
        }
    }

    /// Colour the level code (requires the `console` feature)
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Route output to custom writers instead of stdout/stderr
    pub fn with_writers(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            use_colors: false,
        }
    }

    fn channel(&mut self, level: LogLevel) -> &mut (dyn Write + Send) {
        match level {
            LogLevel::Verbose | LogLevel::Debug | LogLevel::Info => self.out.as_mut(),
            LogLevel::Warning | LogLevel::Error => self.err.as_mut(),
        }
    }

    #[cfg(feature = "console")]
    fn paint(&self, line: String, level: LogLevel) -> String {
        if !self.use_colors {
            return line;
        }
        let code = format!("[{}]", level.code());
        let painted = code.color(level.color_code()).to_string();
        line.replacen(&code, &painted, 1)
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, line: String, _level: LogLevel) -> String {
        line
    }

    fn render(&self, record: &LogRecord) -> Result<String> {
        match record.text() {
            RecordText::Text(_) => Ok(self.paint(format(record), record.level())),
            RecordText::Structured(value) => {
                let marker = self.paint(format_header(record), record.level());
                let body = serde_json::to_string_pretty(value)?;
                Ok(format!("{}\n{}", marker, body))
            }
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    async fn write(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.render(record)?;
        let channel = self.channel(record.level());
        writeln!(channel, "{}", output)
            .map_err(|e| LoggerError::io_operation("writing to console", "console stream rejected the record", e))?;
        Ok(())
    }

    fn accepts_structured(&self) -> bool {
        true
    }

    async fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
