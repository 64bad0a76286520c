use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const CHECK: &str = "\x1b[32m✓\x1b[0m";
const DOT: &str = "\x1b[2m·\x1b[0m";
const RULE: &str = "\x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m";

/// Numbered steps with a spinner for the running one. Draws nothing when
/// the run is not interactive.
pub struct Progress {
    spinner: Option<Spinner>,
}

struct Spinner {
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    step: u8,
    total: u8,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            spinner: interactive.then(|| Spinner {
                bar: None,
                started: now,
                step_started: now,
                step: 0,
                total: total_steps,
            }),
        }
    }

    pub fn step(&mut self, description: &str) {
        let Some(s) = self.spinner.as_mut() else {
            return;
        };
        s.clear();
        s.step += 1;
        s.step_started = Instant::now();

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars(TICK_CHARS));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!("[{}/{}] {description}...", s.step, s.total));
        s.bar = Some(bar);
    }

    /// Replaces the running step's message, e.g. with the file being read.
    pub fn detail(&self, detail: &str) {
        if let Some(Spinner {
            bar: Some(bar),
            step,
            total,
            ..
        }) = &self.spinner
        {
            bar.set_message(format!("[{step}/{total}] {detail}"));
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        let Some(s) = self.spinner.as_mut() else {
            return;
        };
        s.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  {CHECK} {:<44} {:>5.1}s",
            description,
            s.step_started.elapsed().as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      {DOT} {substep}");
        }
    }

    pub fn finish(self) {
        let Some(mut s) = self.spinner else {
            return;
        };
        s.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  {RULE}");
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  {CHECK} Preparation complete {:>29}",
            format!("Total: {:.2}s", s.started.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }
}

impl Spinner {
    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
