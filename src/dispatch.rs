//! Outbound command dispatch.

use std::io::Write;
use tracing::error;

/// Receives finished command strings. Fire-and-forget: delivery problems are
/// the sink's business and never reach the caller.
pub trait CommandSink {
    fn send_command(&mut self, text: &str);
}

impl<T: CommandSink + ?Sized> CommandSink for &mut T {
    fn send_command(&mut self, text: &str) {
        (**self).send_command(text)
    }
}

impl<T: CommandSink + ?Sized> CommandSink for Box<T> {
    fn send_command(&mut self, text: &str) {
        (**self).send_command(text)
    }
}

/// Keeps every command it is given, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    commands: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }
}

impl CommandSink for RecordingSink {
    fn send_command(&mut self, text: &str) {
        self.commands.push(text.to_string());
    }
}

/// Writes each command as one line, e.g. to stdout for a dry run.
pub struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        LineSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        LineSink::new(std::io::stdout())
    }
}

impl<W: Write> CommandSink for LineSink<W> {
    fn send_command(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            error!(command = text, "failed to write command: {}", e);
        }
    }
}
