// SPDX-License-Identifier: MPL-2.0
//! Command-line front end.
//!
//! Sliders are applied to an editing session, optionally followed by a named
//! look and an arbitrary filter, and the result is rendered to one file or a
//! batch of files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::app_state::AppState;
use crate::config::{self, paths, Config, DEFAULT_BATCH_BASE_NAME};
use crate::diagnostics::{DiagnosticsCollector, UserAction};
use crate::domain::editing::{AdjustmentKind, FilterPipeline, FilterPreset};
use crate::editor::EditSession;
use crate::error::{Error, Result};
use crate::media::{self, BatchOptions, ExportFormat, ExportQuality};

pub const USAGE: &str = "\
Usage: lens-adjust [OPTIONS] <INPUT>...

Options:
  --set NAME=VALUE        set a slider (repeatable, values are clamped)
  --preset NAME           apply a named look after the sliders
  --filter CSS            apply a CSS filter after the sliders
  --output PATH           output file (single input)
  --output-dir DIR        output directory (names <base>_<n>.<ext>)
  --base NAME             batch base name (default: edited)
  --format jpeg|png|webp  output format
  --quality low|medium|high
  --resume                start from the last exported adjustments
  --print-filter          print the composed CSS filter and exit
  --list-presets          list looks and exit
  --diagnostics PATH      write a JSON diagnostics report
  --config-dir DIR        override the settings directory
  --data-dir DIR          override the state directory
  -h, --help              print this help

Sliders: exposure, highlights, shadows, contrast, saturate, sepia,
grayscale, invert, hueRotate, blur";

// =============================================================================
// Arguments
// =============================================================================

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub inputs: Vec<PathBuf>,
    pub settings: Vec<(AdjustmentKind, f64)>,
    pub preset: Option<String>,
    pub filter: Option<FilterPipeline>,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base: Option<String>,
    pub format: Option<ExportFormat>,
    pub quality: Option<ExportQuality>,
    pub resume: bool,
    pub print_filter: bool,
    pub list_presets: bool,
    pub diagnostics: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    /// Parses the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed or unknown options.
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    /// Parses arguments, program name excluded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed or unknown options.
    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let parsed = Self {
            help: args.contains(["-h", "--help"]),
            resume: args.contains("--resume"),
            print_filter: args.contains("--print-filter"),
            list_presets: args.contains("--list-presets"),
            settings: args.values_from_fn("--set", parse_setting)?,
            preset: args.opt_value_from_str("--preset")?,
            filter: args.opt_value_from_str("--filter")?,
            output: args.opt_value_from_os_str("--output", to_path)?,
            output_dir: args.opt_value_from_os_str("--output-dir", to_path)?,
            base: args.opt_value_from_str("--base")?,
            format: args.opt_value_from_str("--format")?,
            quality: args.opt_value_from_str("--quality")?,
            diagnostics: args.opt_value_from_os_str("--diagnostics", to_path)?,
            config_dir: args.opt_value_from_os_str("--config-dir", to_path)?,
            data_dir: args.opt_value_from_os_str("--data-dir", to_path)?,
            inputs: Vec::new(),
        };

        let mut inputs = Vec::new();
        for free in args.finish() {
            if free.to_string_lossy().starts_with('-') {
                return Err(Error::InvalidArgument(format!(
                    "unknown option `{}`",
                    free.to_string_lossy()
                )));
            }
            inputs.push(PathBuf::from(free));
        }
        Ok(Self { inputs, ..parsed })
    }
}

fn to_path(value: &std::ffi::OsStr) -> std::result::Result<PathBuf, String> {
    Ok(PathBuf::from(value))
}

/// Parses `NAME=VALUE`.
fn parse_setting(raw: &str) -> Result<(AdjustmentKind, f64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::InvalidArgument(format!("expected NAME=VALUE, got `{raw}`")))?;
    let kind: AdjustmentKind = name.trim().parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("`{value}` is not a number")))?;
    Ok((kind, value))
}

// =============================================================================
// Run
// =============================================================================

/// Executes the command line.
///
/// # Errors
///
/// Returns the first fatal error. Batch exports report every failed file
/// through the log and fail as a whole if any file failed.
pub fn run(args: Args) -> Result<()> {
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    paths::init_cli_overrides(args.data_dir.clone(), args.config_dir.clone());
    let (config, config_warning) = config::load();
    let presets = config.presets();

    if args.list_presets {
        for preset in &presets {
            println!("{}: {}", preset.name(), preset.pipeline());
        }
        return Ok(());
    }

    let mut session = EditSession::open();
    if config.diagnostics.enabled || args.diagnostics.is_some() {
        session = session.with_diagnostics(DiagnosticsCollector::new(config.diagnostics.capacity()));
    }
    if let Some(warning) = config_warning {
        log_warning(&mut session, warning);
    }

    let result = edit_and_export(&args, &config, &presets, &mut session);

    if let Err(err) = &result {
        if let Some(collector) = session.diagnostics_mut() {
            collector.log_error(err.to_string());
        }
    }
    if let (Some(path), Some(collector)) = (&args.diagnostics, session.diagnostics()) {
        collector.export_to_file(path)?;
    }
    result
}

fn edit_and_export(
    args: &Args,
    config: &Config,
    presets: &[FilterPreset],
    session: &mut EditSession,
) -> Result<()> {
    let (mut state, state_warning) = AppState::load();
    if let Some(warning) = state_warning {
        log_warning(session, warning);
    }

    if args.resume {
        match state.last_adjustments {
            Some(previous) => session.engine_mut().reset_to(previous),
            None => log::warn!("--resume: no previous export recorded"),
        }
    }
    for &(kind, value) in &args.settings {
        session.apply_value(kind, value);
    }
    session.snapshot_adjustments();

    let pipeline = compose_pipeline(args, presets, session)?;

    if args.print_filter {
        println!("{pipeline}");
        return Ok(());
    }
    if args.inputs.is_empty() {
        return Err(Error::InvalidArgument(
            "no input images (see --help)".to_string(),
        ));
    }

    let quality = args.quality.unwrap_or(config.export.quality);
    let adjustments = *session.engine().current();

    match (&args.output, args.inputs.as_slice()) {
        (Some(output), [input]) => {
            let format = args
                .format
                .or_else(|| ExportFormat::from_path(output))
                .unwrap_or(config.export.format);
            export_single(input, output, &pipeline, format, quality)?;
            record_export(session, format);
            state.record_export(adjustments, output);
        }
        (Some(_), _) => {
            return Err(Error::InvalidArgument(
                "--output takes a single input; use --output-dir for batches".to_string(),
            ));
        }
        (None, inputs) => {
            let options = BatchOptions {
                output_dir: args
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(".")),
                base_name: args
                    .base
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BATCH_BASE_NAME.to_string()),
                format: args.format.unwrap_or(config.export.format),
                quality,
            };
            let written = export_batch(inputs, &pipeline, &options, session)?;
            state.record_export(adjustments, &written);
        }
    }

    if let Some(warning) = state.save() {
        log_warning(session, warning);
    }
    Ok(())
}

/// Slider filter, then the named look, then the explicit filter.
fn compose_pipeline(
    args: &Args,
    presets: &[FilterPreset],
    session: &mut EditSession,
) -> Result<FilterPipeline> {
    let mut pipeline = session.filter();
    if let Some(name) = &args.preset {
        let preset = FilterPreset::find_in(presets, name)?;
        pipeline = pipeline.then(preset.pipeline());
        if let Some(collector) = session.diagnostics_mut() {
            collector.log_action(UserAction::ApplyPreset {
                name: preset.name().to_string(),
            });
        }
    }
    if let Some(extra) = &args.filter {
        pipeline = pipeline.then(extra);
    }
    Ok(pipeline)
}

fn export_single(
    input: &Path,
    output: &Path,
    pipeline: &FilterPipeline,
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<()> {
    let image = media::load_image(input)?;
    let rendered = media::render(&image, pipeline);
    media::save_image(&rendered, output, format, quality)?;
    println!("{}", output.display());
    Ok(())
}

/// Returns the last written file.
fn export_batch(
    inputs: &[PathBuf],
    pipeline: &FilterPipeline,
    options: &BatchOptions,
    session: &mut EditSession,
) -> Result<PathBuf> {
    let outcomes = media::render_batch(inputs, pipeline, options);
    let mut failed = 0;
    let mut last_written = None;
    for outcome in outcomes {
        match outcome.result {
            Ok(path) => {
                println!("{}", path.display());
                record_export(session, options.format);
                last_written = Some(path);
            }
            Err(err) => {
                failed += 1;
                eprintln!("{}: {err}", outcome.input.display());
                if let Some(collector) = session.diagnostics_mut() {
                    collector.log_error(format!("{}: {err}", outcome.input.display()));
                }
            }
        }
    }

    match last_written {
        Some(path) if failed == 0 => Ok(path),
        _ => Err(Error::Io(format!(
            "{failed} of {} files could not be exported",
            inputs.len()
        ))),
    }
}

/// Warnings are already logged where they arise; this only feeds the report.
fn log_warning(session: &mut EditSession, warning: String) {
    if let Some(collector) = session.diagnostics_mut() {
        collector.log_warning(warning);
    }
}

fn record_export(session: &mut EditSession, format: ExportFormat) {
    if let Some(collector) = session.diagnostics_mut() {
        collector.log_action(UserAction::ExportImage {
            format: format.name().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn parses_repeated_settings_and_inputs() {
        let parsed = args(&[
            "--set",
            "contrast=130",
            "--set",
            "hue-rotate=45",
            "--format",
            "png",
            "a.jpg",
            "b.jpg",
        ])
        .expect("valid arguments");

        assert_eq!(
            parsed.settings,
            vec![
                (AdjustmentKind::Contrast, 130.0),
                (AdjustmentKind::HueRotate, 45.0)
            ]
        );
        assert_eq!(parsed.format, Some(ExportFormat::Png));
        assert_eq!(
            parsed.inputs,
            vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]
        );
    }

    #[test]
    fn parses_filter_and_quality() {
        let parsed = args(&["--filter", "sepia(40%) blur(2px)", "--quality", "low"])
            .expect("valid arguments");
        assert_eq!(parsed.filter.map(|f| f.len()), Some(2));
        assert_eq!(parsed.quality, Some(ExportQuality::Low));
    }

    #[test]
    fn rejects_unknown_slider() {
        assert!(args(&["--set", "vibrance=10"]).is_err());
    }

    #[test]
    fn rejects_missing_equals() {
        assert!(matches!(parse_setting("contrast"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(matches!(
            args(&["--frobnicate", "x.jpg"]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn nan_setting_parses_and_is_clamped_later() {
        let (kind, value) = parse_setting("blur=NaN").expect("parses");
        assert_eq!(kind, AdjustmentKind::Blur);
        assert!(value.is_nan());
    }
}
