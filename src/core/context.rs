use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        analyze::{BatchAnalysis, analyze_bundles},
        parsers::Encoding,
        resolve::Resolver,
        scan::{BundleSource, scan_bundles},
    },
};

/// Settings for one CLI run.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (e.g., `--format-style pattern`)
/// 2. `.bundlegenrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory bundle names are resolved against.
    pub source_root: PathBuf,

    /// Resolver for the configured format style.
    pub resolver: Resolver,

    pub encoding: Encoding,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl CheckContext {
    /// Load config from the current directory upwards and apply CLI overrides.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        Self::from_dir(Path::new("."), common_args)
    }

    pub fn from_dir(start_dir: &Path, common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let config_result = load_config(start_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;

        if let Some(ref source_root) = common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(format_style) = common_args.format_style {
            config.format_style = format_style;
        }
        if let Some(encoding) = common_args.encoding {
            config.encoding = encoding;
        }

        let source_root = {
            let p = Path::new(&config.source_root);
            let is_cur_dir = start_dir
                .components()
                .all(|c| matches!(c, Component::CurDir));
            if p.is_absolute() || is_cur_dir {
                p.to_path_buf()
            } else {
                start_dir.join(p)
            }
        };

        Ok(Self {
            resolver: Resolver::for_style(config.format_style),
            encoding: config.encoding,
            source_root,
            config,
            verbose,
        })
    }

    /// Sources for the named bundles, or every bundle under the source root
    /// when no names are given.
    pub fn bundle_sources(&self, names: &[String]) -> Result<Vec<BundleSource>> {
        if !names.is_empty() {
            return Ok(names
                .iter()
                .map(|name| BundleSource::from_name(&self.source_root, name))
                .collect());
        }

        if !self.source_root.is_dir() {
            bail!(
                "Source root does not exist: {}",
                self.source_root.display()
            );
        }

        let scan_result = scan_bundles(&self.source_root, &self.config.ignores, self.verbose);

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }

        if self.verbose {
            eprintln!(
                "Note: Found {} bundle(s) under {}",
                scan_result.bundles.len(),
                self.source_root.display()
            );
        }

        Ok(scan_result.bundles)
    }

    pub fn analyze(&self, sources: &[BundleSource]) -> BatchAnalysis {
        analyze_bundles(sources, &self.resolver, self.encoding, self.verbose)
    }
}
