//! Per-color progress tracking with automatic batching for large file sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Each color of each file is a task with its own step count. Only the
/// most recent tasks get a visible bar; a batch bar counting files is added
/// when more files are queued than bars fit.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    task_bars: Vec<ProgressBar>,
    file_count: usize,
    /// Stores (`label`, `current_step`, `max_step`) for rolling window display
    task_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            task_bars: Vec::new(),
            file_count: 0,
            task_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..MAX_INDIVIDUAL_PROGRESS_BARS {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.task_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced at initialization
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Register the tiling of one color and return its task handle
    pub fn start_color(&mut self, path: &Path, color: [u8; 3], steps: usize) -> usize {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let [r, g, b] = color;
        self.task_states
            .push((format!("{file_name} #{r:02x}{g:02x}{b:02x}"), 0, steps));
        self.update_bars();
        self.task_states.len() - 1
    }

    /// Report the number of finished steps of a task
    pub fn update_step(&mut self, task: usize, step: usize) {
        if let Some(state) = self.task_states.get_mut(task) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark a color task as completed
    pub fn complete_color(&mut self, task: usize) {
        if let Some(state) = self.task_states.get_mut(task) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Advance the batch bar by one file
    pub fn complete_file(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Print a line above the bars without tearing them
    pub fn println(&self, line: &str) {
        let _ = self.multi_progress.println(line);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N tasks
    fn update_bars(&self) {
        let start_idx = self
            .task_states
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = self.task_states.get(start_idx..).unwrap_or(&[]);

        for (bar, (label, current, max)) in self.task_bars.iter().zip(visible) {
            bar.set_length(*max as u64);
            bar.set_position(*current as u64);
            let max_width = max.to_string().len();
            bar.set_message(format!("{current:>max_width$}/{max}"));
            bar.set_prefix(label.clone());
        }

        for bar in self.task_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
