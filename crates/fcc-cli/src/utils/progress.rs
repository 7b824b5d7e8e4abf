use fccnano::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const DONE_MESSAGE: &str = "✓ Done";

/// Renders core progress events as a single `indicatif` bar on stderr.
///
/// `ProgressBar` is a shared handle, so the display and every callback it hands out
/// drive the same bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::drawing_to(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self::drawing_to(ProgressDrawTarget::hidden())
    }

    fn drawing_to(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event: Progress| on_event(&bar, event))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn on_event(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(TICK_INTERVAL);
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message(DONE_MESSAGE);
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.set_style(cell_bar_style());
            bar.set_length(total_steps);
            bar.set_position(0);
        }
        Progress::TaskAdvance { steps } => bar.inc(steps),
        Progress::TaskFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
        }
        Progress::Message(text) if bar.is_finished() => bar.set_message(text),
        Progress::Message(text) => bar.println(format!("  {}", text)),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn cell_bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<28} [{bar:40.green/white}] {pos}/{len} cells ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("=>-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_display_starts_finished_and_empty() {
        let display = CliProgressHandler::hidden();
        assert_eq!(display.bar.length(), Some(0));
        assert!(display.bar.is_finished());
    }

    #[test]
    fn phase_and_task_events_drive_the_bar() {
        let display = CliProgressHandler::hidden();
        let report = display.get_callback();

        report(Progress::PhaseStart {
            name: "Enumerating lattice sites",
        });
        assert_eq!(display.bar.message(), "Enumerating lattice sites");
        assert!(!display.bar.is_finished());

        report(Progress::TaskStart { total_steps: 64 });
        report(Progress::TaskAdvance { steps: 16 });
        report(Progress::TaskAdvance { steps: 8 });
        assert_eq!(display.bar.length(), Some(64));
        assert_eq!(display.bar.position(), 24);

        report(Progress::TaskFinish);
        assert_eq!(display.bar.position(), 64);

        report(Progress::PhaseFinish);
        assert!(display.bar.is_finished());
        assert_eq!(display.bar.message(), DONE_MESSAGE);
    }

    #[test]
    fn message_on_idle_bar_becomes_its_label() {
        let display = CliProgressHandler::hidden();
        (display.get_callback())(Progress::Message("Lattice ready".to_string()));
        assert_eq!(display.bar.message(), "Lattice ready");
    }

    #[test]
    fn callbacks_can_report_from_worker_threads() {
        let display = CliProgressHandler::hidden();
        let report = display.get_callback();

        std::thread::spawn(move || {
            report(Progress::PhaseStart {
                name: "Linking nearest neighbors",
            });
            report(Progress::TaskAdvance { steps: 1 });
            report(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert!(display.bar.is_finished());
        assert_eq!(display.bar.message(), DONE_MESSAGE);
    }
}
