//! Command-line interface for encoding, decoding and matching automata

use crate::automaton::dfa::Dfa;
use crate::codec::builder::build_with_stats;
use crate::codec::decoder::render;
use crate::codec::matcher::{select_best, verify};
use crate::io::configuration::{
    AUTOMATON_EXTENSION, AUTOMATON_SUFFIX, DECODED_SUFFIX, DEFAULT_RESOLUTION, IMAGE_EXTENSION,
    MAX_RESOLUTION,
};
use crate::io::error::{QuadfaError, Result, WithContext, invalid_parameter};
use crate::io::image::{export_bit_image, load_bit_image};
use crate::io::progress::ProgressManager;
use crate::io::wire::{deserialize_dfa, serialize_dfa};
use crate::quadtree::raster::{BitImage, power_of_two_side};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quadfa")]
#[command(
    author,
    version,
    about = "Encode binary images as automata over quadtree addresses"
)]
/// Command-line arguments for the automaton image codec
pub struct Cli {
    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the command-line tool
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build an automaton for a PNG file or for every PNG in a directory
    Encode {
        /// Input PNG file or directory to process
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Process files even if output exists
        #[arg(short, long)]
        no_skip: bool,
    },

    /// Render an automaton file as a PNG image
    Decode {
        /// Serialized automaton to render
        #[arg(value_name = "AUTOMATON")]
        automaton: PathBuf,

        /// Side length of the rendered image (power of two)
        #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: usize,

        /// Output PNG path (defaults to <automaton>_decoded.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report how many on pixels of an image an automaton accepts
    Match {
        /// Serialized automaton to test
        #[arg(value_name = "AUTOMATON")]
        automaton: PathBuf,

        /// PNG image to test against
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Pick the best-fitting automaton for each image
    Best {
        /// Candidate automata, in index order
        #[arg(short, long, num_args = 1.., required = true)]
        automata: Vec<PathBuf>,

        /// Images to classify
        #[arg(short, long, num_args = 1.., required = true)]
        images: Vec<PathBuf>,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level used when `RUST_LOG` is not set
    pub const fn default_log_level(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Installing twice keeps
/// the first subscriber.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Runs one command and collects the lines it reports
pub struct CommandProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CommandProcessor {
    /// Create a new processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the command
    ///
    /// Returns the lines to show the user, one per processed item.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read or parsed, a parameter is
    /// out of range, or an output cannot be written
    pub fn process(&mut self) -> Result<Vec<String>> {
        match self.cli.command.clone() {
            Command::Encode { target, no_skip } => self.encode(&target, no_skip),
            Command::Decode {
                automaton,
                resolution,
                output,
            } => Self::decode(&automaton, resolution, output),
            Command::Match { automaton, image } => Self::match_image(&automaton, &image),
            Command::Best { automata, images } => self.best(&automata, &images),
        }
    }

    fn encode(&mut self, target: &Path, no_skip: bool) -> Result<Vec<String>> {
        let files = Self::collect_files(target, !no_skip)?;
        let mut report = Vec::with_capacity(files.len());

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize("encode", files.len());
        }

        for file in &files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_item(file);
            }

            report.push(Self::encode_file(file)?);

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_item();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(report)
    }

    fn encode_file(input_path: &Path) -> Result<String> {
        let image = load_bit_image(input_path).with_path(input_path)?;
        if power_of_two_side(&image.view()).is_none() {
            return Err(QuadfaError::InvalidSourceData {
                reason: format!(
                    "'{}' is {}x{}, expected a square with a power-of-two side",
                    input_path.display(),
                    image.nrows(),
                    image.ncols()
                ),
            });
        }

        let (dfa, stats) = build_with_stats(image.view())?;
        let output_path = Self::get_automaton_path(input_path);
        write_text(&output_path, &serialize_dfa(&dfa)?)?;

        tracing::info!(
            states = dfa.len(),
            merged = stats.hits,
            "encoded {} -> {}",
            input_path.display(),
            output_path.display()
        );

        Ok(format!(
            "{} -> {} ({} states)",
            input_path.display(),
            output_path.display(),
            dfa.len()
        ))
    }

    fn decode(automaton: &Path, resolution: usize, output: Option<PathBuf>) -> Result<Vec<String>> {
        if !resolution.is_power_of_two() || resolution > MAX_RESOLUTION {
            return Err(invalid_parameter(
                "resolution",
                &resolution,
                &format!("must be a power of two no larger than {MAX_RESOLUTION}"),
            ));
        }

        let dfa = read_automaton(automaton)?;
        let image = render(&dfa, resolution)?;
        let output_path = output.unwrap_or_else(|| Self::get_decoded_path(automaton));
        export_bit_image(&image, &output_path)?;

        tracing::info!(
            "decoded {} at {resolution}x{resolution} -> {}",
            automaton.display(),
            output_path.display()
        );

        Ok(vec![format!(
            "{} -> {}",
            automaton.display(),
            output_path.display()
        )])
    }

    fn match_image(automaton: &Path, image_path: &Path) -> Result<Vec<String>> {
        let dfa = read_automaton(automaton)?;
        let image = load_bit_image(image_path).with_path(image_path)?;
        let report = verify(&dfa, image.view())?;

        Ok(vec![
            format!(
                "{:.2}% ({}/{})",
                report.percentage(),
                report.matched,
                report.total
            ),
            report.all_accepted().to_string(),
        ])
    }

    fn best(&mut self, automata: &[PathBuf], images: &[PathBuf]) -> Result<Vec<String>> {
        let candidates = automata
            .iter()
            .map(|path| read_automaton(path.as_path()))
            .collect::<Result<Vec<Dfa>>>()?;
        let mut report = Vec::with_capacity(images.len());

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize("best", images.len());
        }

        for image_path in images {
            if let Some(ref pm) = self.progress_manager {
                pm.start_item(image_path);
            }

            let image: BitImage = load_bit_image(image_path).with_path(image_path)?;
            let choice = select_best(&candidates, image.view())?;
            report.push(format!(
                "{}: {}",
                image_path.display(),
                choice.map_or_else(|| "none".to_string(), |index| index.to_string())
            ));

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_item();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(report)
    }

    fn collect_files(target: &Path, skip_existing: bool) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if has_extension(target, IMAGE_EXTENSION) {
                if Self::should_process_file(target, skip_existing) {
                    Ok(vec![target.to_path_buf()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if has_extension(&path, IMAGE_EXTENSION)
                    && Self::should_process_file(&path, skip_existing)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(input_path: &Path, skip_existing: bool) -> bool {
        if !skip_existing {
            return true;
        }

        let output_path = Self::get_automaton_path(input_path);
        if output_path.exists() {
            tracing::warn!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    /// Path of the automaton file written for an input image
    pub fn get_automaton_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, AUTOMATON_SUFFIX, AUTOMATON_EXTENSION)
    }

    /// Path of the image rendered from an automaton file by default
    pub fn get_decoded_path(automaton_path: &Path) -> PathBuf {
        sibling_path(automaton_path, DECODED_SUFFIX, IMAGE_EXTENSION)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(extension)
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

fn read_automaton(path: &Path) -> Result<Dfa> {
    let text = std::fs::read_to_string(path).map_err(|e| QuadfaError::FileSystem {
        path: path.to_path_buf(),
        operation: "read automaton",
        source: e,
    })?;
    deserialize_dfa(&text).with_path(path)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| QuadfaError::FileSystem {
        path: path.to_path_buf(),
        operation: "write automaton",
        source: e,
    })
}
