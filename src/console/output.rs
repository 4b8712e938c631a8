use std::io::{IsTerminal, Write};

use anstyle::{AnsiColor, Reset, Style};

const ERROR_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)));

/// Line-oriented sink shared by a main command and every member of its chain.
pub trait Output {
    fn write_line(&mut self, line: &str);

    /// Write a line that reports a problem to the user.
    fn write_error(&mut self, line: &str);
}

/// Writes to stdout, styling error lines when stdout is a terminal.
pub struct ConsoleOutput {
    color: bool,
}

impl ConsoleOutput {
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }
}

impl Output for ConsoleOutput {
    fn write_line(&mut self, line: &str) {
        let _ = writeln!(std::io::stdout().lock(), "{line}");
    }

    fn write_error(&mut self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if self.color {
            let _ = writeln!(stdout, "{ERROR_COLOR}{line}{Reset}");
        } else {
            let _ = writeln!(stdout, "{line}");
        }
    }
}

/// Keeps everything written in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    display: String,
    errors: usize,
}

impl BufferedOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, one line per write.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Number of error lines written so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl Output for BufferedOutput {
    fn write_line(&mut self, line: &str) {
        self.display.push_str(line);
        self.display.push('\n');
    }

    fn write_error(&mut self, line: &str) {
        self.errors += 1;
        self.write_line(line);
    }
}
