//! Terminal progress for imports.

use indicatif::{ProgressBar, ProgressStyle};

use fp_import_import::ImportProgress;

/// Drives an indicatif bar from import progress callbacks.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            if let Ok(style) =
                ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        };
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_item(&self, current: usize, total: usize, name: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn on_warning(&self, message: &str) {
        self.bar.suspend(|| log::warn!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}

impl Drop for BarProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
