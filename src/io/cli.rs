//! Command-line interface for batch tiling of PNG files

use crate::algorithm::executor::{ColorTiling, TilingConfig, TilingExecutor};
use crate::algorithm::search::SearchLimits;
use crate::analysis::palette::PaletteImage;
use crate::io::configuration::{
    COARSE_BOUND, FINE_BOUND, PREVIEW_SUFFIX, REPORT_SUFFIX, TILING_SUFFIX, WINDOW_MAX_EXPANSIONS,
    WINDOW_MAX_FRONTIER,
};
use crate::io::error::{Result, WithContext, path_error};
use crate::io::image::export_preview_png;
use crate::io::postscript::write_eps;
use crate::io::progress::ProgressManager;
use crate::io::report::{format_report, write_report};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bricktile")]
#[command(
    author,
    version,
    about = "Tile each color of a 64x64 PNG with the cheapest set of bricks"
)]
/// Command-line arguments for the tiling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Suppress progress and report output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also write a PNG preview of the tiling
    #[arg(short, long)]
    pub preview: bool,

    /// Per-cell bound for the initial solve (larger is faster and greedier)
    #[arg(long, default_value_t = COARSE_BOUND)]
    pub coarse_bound: u32,

    /// Per-cell bound for window re-optimization
    #[arg(long, default_value_t = FINE_BOUND)]
    pub fine_bound: u32,

    /// Skip the window re-optimization pass
    #[arg(long)]
    pub no_optimize: bool,

    /// Abort any single search after this many seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Cap the number of queued nodes in the initial solve
    #[arg(long, value_name = "N")]
    pub max_frontier: Option<usize>,

    /// Node expansions each window search may spend
    #[arg(long, value_name = "N", default_value_t = WINDOW_MAX_EXPANSIONS)]
    pub window_expansions: usize,

    /// Cap the number of queued nodes in each window search
    #[arg(long, value_name = "N", default_value_t = WINDOW_MAX_FRONTIER)]
    pub window_frontier: usize,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the tiling configuration from the flags
    ///
    /// # Errors
    ///
    /// Returns an error if the time limit is negative or not finite
    pub fn tiling_config(&self) -> Result<TilingConfig> {
        let mut limits = SearchLimits::unlimited();
        if let Some(seconds) = self.time_limit {
            let limit = Duration::try_from_secs_f64(seconds).map_err(|e| {
                crate::io::error::invalid_parameter("time_limit", &seconds, &e)
            })?;
            limits = limits.with_time_limit(limit);
        }
        let window_limits = limits
            .clone()
            .with_max_expansions(self.window_expansions)
            .with_max_frontier(self.window_frontier);
        if let Some(width) = self.max_frontier {
            limits = limits.with_max_frontier(width);
        }

        let config = TilingConfig {
            coarse_bound: self.coarse_bound,
            fine_bound: self.fine_bound,
            optimize: !self.no_optimize,
            limits,
            window_limits,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, configuration or file
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.tiling_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, &config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(path_error(target, "Target file must be a PNG image"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)
                .with_path(target)
                .with_operation("read directory")?
            {
                let path = entry.with_path(target).with_operation("read directory")?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !Self::is_generated(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error(target, "Target must be a PNG file or directory"))
        }
    }

    // Previews written by earlier runs must not be tiled themselves
    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(PREVIEW_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, TILING_SUFFIX, "eps");
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, config: &TilingConfig) -> Result<()> {
        let image = PaletteImage::from_png_path(input_path)?;

        let mut tilings = Vec::with_capacity(image.palette().len());
        for (color, mask) in image.color_masks() {
            tilings.push(self.tile_color(input_path, color, mask, config)?);
        }

        write_eps(
            &tilings,
            &Self::get_output_path(input_path, TILING_SUFFIX, "eps"),
        )?;
        write_report(
            &tilings,
            &Self::get_output_path(input_path, REPORT_SUFFIX, "txt"),
        )?;
        if self.cli.preview {
            export_preview_png(
                &tilings,
                &Self::get_output_path(input_path, PREVIEW_SUFFIX, "png"),
            )?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.println(&format_report(&tilings));
            pm.complete_file();
        }

        Ok(())
    }

    fn tile_color(
        &mut self,
        input_path: &Path,
        color: [u8; 3],
        mask: crate::spatial::Mask,
        config: &TilingConfig,
    ) -> Result<ColorTiling> {
        let mut executor = TilingExecutor::new(color, mask, config.clone())?;

        let task = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_color(input_path, color, executor.total_steps()));

        while executor.execute_step()? {
            if let (Some(pm), Some(task)) = (self.progress_manager.as_mut(), task) {
                pm.update_step(task, executor.steps_done());
            }
        }

        if let (Some(pm), Some(task)) = (self.progress_manager.as_mut(), task) {
            pm.complete_color(task);
        }

        executor.finish()
    }

    /// Output file next to the input, named `<stem><suffix>.<extension>`
    pub fn get_output_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
