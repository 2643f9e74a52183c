use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use stackflow_cloud::Terminal;
use std::io::{IsTerminal, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Terminal sink writing the report to stdout and a spinner to stderr
pub struct ConsoleTerminal {
    spinner: Mutex<Option<ProgressBar>>,
    interactive: bool,
    quiet: bool,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            interactive: std::io::stdout().is_terminal(),
            quiet: false,
        }
    }

    /// Terminal that swallows everything (used with `--json`)
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    fn with_spinner<R>(&self, f: impl FnOnce(&mut Option<ProgressBar>) -> R) -> R {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut spinner)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Terminal for ConsoleTerminal {
    fn clear(&self) {
        if self.quiet || !self.interactive {
            return;
        }
        let mut stdout = std::io::stdout();
        if let Err(e) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            tracing::debug!("Failed to clear terminal: {}", e);
        }
    }

    fn write_line(&self, text: &str) {
        if self.quiet {
            return;
        }
        self.with_spinner(|spinner| match spinner {
            Some(pb) => pb.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        });
    }

    fn start_spinner(&self, label: &str) {
        if self.quiet {
            return;
        }
        self.with_spinner(|spinner| {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message(label.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));
            *spinner = Some(pb);
        });
    }

    fn stop_spinner(&self) {
        self.with_spinner(|spinner| {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        });
    }

    fn write_success(&self, label: &str) {
        if self.quiet {
            return;
        }
        println!("{} {}", "✔".green(), label.bold());
    }
}
