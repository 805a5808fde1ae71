use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::info;

use super::super::args::{CommonArgs, ExtractCommand, OutputFormat};
use super::super::exit_status::ExitStatus;
use super::super::report::{print_human, print_json};
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::{EngineRegistry, extract_files, file_scanner::scan_files};

/// Configuration and scan directory for one extraction run.
pub struct ExtractContext {
    pub config: Config,
    /// Directory that is scanned; record paths are relative to it. The
    /// config `sourceRoot` is resolved against `--source-root` (or the
    /// current directory).
    pub scan_dir: PathBuf,
}

impl ExtractContext {
    /// Load the config and apply CLI overrides (CLI > config file > defaults).
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let root_dir = common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        if !root_dir.is_dir() {
            bail!("Source root is not a directory: {}", root_dir.display());
        }

        let config_result = load_config(&root_dir)
            .with_context(|| format!("Failed to load configuration for {}", root_dir.display()))?;
        if !config_result.from_file {
            info!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = config_result.config;
        if let Some(scope_attribute) = &common.scope_attribute {
            config.scope_attribute = scope_attribute.clone();
        }
        config.validate()?;

        let relative = Path::new(&config.source_root);
        let scan_dir = if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            root_dir.join(relative.strip_prefix(".").unwrap_or(relative))
        };

        Ok(Self { config, scan_dir })
    }
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ctx = ExtractContext::new(&cmd.common)?;
    let registry = EngineRegistry::from_config(&ctx.config);

    let scan = scan_files(
        &ctx.scan_dir,
        &ctx.config.includes,
        &ctx.config.ignores,
        |path| registry.handles(path),
    );
    if scan.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            scan.skipped_count,
            if cmd.common.verbose { "" } else { " (use -v for details)" }
        );
    }

    let result = extract_files(scan.files.iter().map(PathBuf::as_path), &ctx.scan_dir, &registry);

    match cmd.format {
        OutputFormat::Human => print_human(&result),
        OutputFormat::Json => print_json(&result)?,
    }

    Ok(if result.failures.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}
