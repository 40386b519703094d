//! Static-site build orchestration.
//!
//! The pipeline runs a fixed sequence of phases and stops at the first
//! failure:
//!
//! 1. **Clean**: remove and recreate the output directory
//! 2. **Compile**: hand each entry to the [`BuildTool`]
//! 3. **Metadata**: collect branch/commit info (best effort, never fails)
//! 4. **Validate**: check that every required output file exists
//!
//! The bundler itself stays behind the [`BuildTool`] trait, so the pipeline
//! can be driven by any tool that turns an entry file into output files.
//!
//! ```rust,no_run
//! use termsite::build::{BuildRequest, BuildTool, OutputFile, Pipeline, vcs::Git};
//!
//! struct Bundler;
//! impl BuildTool for Bundler {
//!     fn build(&mut self, request: &BuildRequest<'_>) -> Result<Vec<OutputFile>, Vec<String>> {
//!         // invoke the real bundler here
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let mut pipeline = Pipeline::new(Bundler, Git::default());
//! let code = termsite::build::exit_code(&pipeline.run());
//! std::process::exit(i32::from(code));
//! ```

use log::{error, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

pub mod logging;
pub mod vcs;

pub use logging::Verbosity;
pub use vcs::{GitInfo, VersionControl};

/// Source map emission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMap {
    /// Separate `.map` files.
    External,
    /// Embedded in the output.
    Inline,
    /// No source maps.
    None,
}

/// Runtime the bundle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Web browsers.
    Browser,
    /// The Bun runtime.
    Bun,
    /// Node.js.
    Node,
}

/// Module format of the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// ES modules.
    Esm,
    /// CommonJS.
    Cjs,
    /// Immediately-invoked function expression.
    Iife,
}

/// Settings shared by every entry of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Root output directory.
    pub outdir: PathBuf,
    /// Minify whitespace, syntax and identifiers.
    pub minify: bool,
    /// Source map mode.
    pub sourcemap: SourceMap,
    /// Target runtime.
    pub target: Target,
    /// Split shared code into chunks.
    pub splitting: bool,
    /// Output module format.
    pub format: ModuleFormat,
    /// Drop unused exports.
    pub treeshaking: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("./dist"),
            minify: true,
            sourcemap: SourceMap::External,
            target: Target::Browser,
            splitting: true,
            format: ModuleFormat::Esm,
            treeshaking: true,
        }
    }
}

/// One page of the site to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name used in log lines.
    pub label: String,
    /// Entry file handed to the build tool.
    pub entrypoint: PathBuf,
    /// Output subdirectory under [`BuildConfig::outdir`].
    pub subdir: PathBuf,
    /// URL prefix the page is served from.
    pub public_path: String,
}

impl Entry {
    /// The main site and the terminal page.
    pub fn defaults() -> Vec<Entry> {
        vec![
            Entry {
                label: String::from("Main site"),
                entrypoint: PathBuf::from("./index.html"),
                subdir: PathBuf::new(),
                public_path: String::from("/"),
            },
            Entry {
                label: String::from("Terminal interface"),
                entrypoint: PathBuf::from("./terminal/index.html"),
                subdir: PathBuf::from("terminal"),
                public_path: String::from("/terminal/"),
            },
        ]
    }
}

/// Files that must exist in the output directory after a build.
pub const REQUIRED_FILES: &[&str] = &["index.html", "terminal/index.html"];

/// What the build tool is asked to do for one entry.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    /// Entry file.
    pub entrypoint: &'a Path,
    /// Directory to write output into.
    pub outdir: PathBuf,
    /// URL prefix for emitted asset references.
    pub public_path: &'a str,
    /// Shared build settings.
    pub config: &'a BuildConfig,
}

/// A file the build tool produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

/// The bundler, seen from the pipeline.
pub trait BuildTool {
    /// Compile one entry. On failure, return the tool's diagnostics.
    fn build(&mut self, request: &BuildRequest<'_>) -> Result<Vec<OutputFile>, Vec<String>>;
}

/// A phase failure. Every variant aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The output directory could not be reset.
    #[error("could not prepare {}: {}", .path.display(), .source)]
    Clean {
        /// Directory being prepared.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The build tool rejected an entry.
    #[error("{label} build failed")]
    Compile {
        /// Entry label.
        label: String,
        /// Diagnostics reported by the tool.
        diagnostics: Vec<String>,
    },
    /// Required output files are missing.
    #[error("missing required files: {}", .missing.join(", "))]
    MissingOutput {
        /// Paths relative to the output directory.
        missing: Vec<String>,
    },
}

/// Summary of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Every file the tool produced, in entry order.
    pub outputs: Vec<OutputFile>,
    /// Version control metadata.
    pub git: GitInfo,
    /// Wall-clock time of the whole run.
    pub duration: Duration,
}

impl BuildReport {
    /// Sum of all output sizes.
    pub fn total_size(&self) -> u64 {
        self.outputs.iter().map(|o| o.size).sum()
    }
}

/// Phase runner over a build tool and a VCS provider.
#[derive(Debug)]
pub struct Pipeline<T: BuildTool, V: VersionControl> {
    tool: T,
    vcs: V,
    config: BuildConfig,
    entries: Vec<Entry>,
    required: Vec<String>,
}

impl<T: BuildTool, V: VersionControl> Pipeline<T, V> {
    /// A pipeline with the default config, entries and required files.
    pub fn new(tool: T, vcs: V) -> Self {
        Self {
            tool,
            vcs,
            config: BuildConfig::default(),
            entries: Entry::defaults(),
            required: REQUIRED_FILES.iter().map(|f| String::from(*f)).collect(),
        }
    }

    /// Replace the build config.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the entry list.
    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    /// Replace the required output files.
    pub fn with_required_files(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    /// The build tool.
    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Run every phase in order.
    pub fn run(&mut self) -> Result<BuildReport, BuildError> {
        let started = Instant::now();

        self.clean()?;
        let outputs = self.compile()?;

        let git = GitInfo::collect(&self.vcs);
        info!(
            "[INFO] branch {} at {} ({})",
            git.branch, git.commit, git.commit_date
        );

        self.validate()?;

        let duration = started.elapsed();
        info!(
            "[SUCCESS] Build completed successfully in {:.2}s",
            duration.as_secs_f64()
        );
        info!("[OUTPUT] {}/", self.config.outdir.display());

        Ok(BuildReport {
            outputs,
            git,
            duration,
        })
    }

    fn clean(&self) -> Result<(), BuildError> {
        info!("[BUILD] Cleaning build directory");
        let started = Instant::now();
        let outdir = &self.config.outdir;

        let reset = || -> io::Result<()> {
            if outdir.exists() {
                fs::remove_dir_all(outdir)?;
            }
            fs::create_dir_all(outdir)
        };
        reset().map_err(|source| {
            error!("[ERROR] Could not clean {}", outdir.display());
            BuildError::Clean {
                path: outdir.clone(),
                source,
            }
        })?;

        info!("[SUCCESS] Build directory cleaned [{}]", elapsed_ms(started));
        Ok(())
    }

    fn compile(&mut self) -> Result<Vec<OutputFile>, BuildError> {
        let mut outputs = Vec::new();

        for entry in &self.entries {
            info!("[BUILD] Building {}", entry.label);
            let started = Instant::now();

            let request = BuildRequest {
                entrypoint: &entry.entrypoint,
                outdir: self.config.outdir.join(&entry.subdir),
                public_path: &entry.public_path,
                config: &self.config,
            };

            match self.tool.build(&request) {
                Ok(files) => {
                    let total: u64 = files.iter().map(|f| f.size).sum();
                    info!(
                        "[SUCCESS] {} built ({} files, {}) [{}]",
                        entry.label,
                        files.len(),
                        format_bytes(total),
                        elapsed_ms(started)
                    );
                    outputs.extend(files);
                }
                Err(diagnostics) => {
                    error!("[ERROR] {} build failed", entry.label);
                    for diagnostic in &diagnostics {
                        error!("[ERROR] {}", diagnostic);
                    }
                    return Err(BuildError::Compile {
                        label: entry.label.clone(),
                        diagnostics,
                    });
                }
            }
        }

        Ok(outputs)
    }

    fn validate(&self) -> Result<(), BuildError> {
        info!("[BUILD] Validating build output");
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|file| !self.config.outdir.join(file.as_str()).exists())
            .cloned()
            .collect();

        if !missing.is_empty() {
            error!("[ERROR] Missing required files: {}", missing.join(", "));
            return Err(BuildError::MissingOutput { missing });
        }

        info!("[SUCCESS] Build output validated");
        Ok(())
    }
}

fn elapsed_ms(started: Instant) -> String {
    format!("{:.2}ms", started.elapsed().as_secs_f64() * 1000.0)
}

/// Process exit code for a pipeline result: `0` on success, `1` otherwise.
pub fn exit_code(result: &Result<BuildReport, BuildError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("[FAILURE] {}", e);
            1
        }
    }
}

/// Build entrypoint: parse the verbosity switch, set up logging, run.
///
/// Returns the process exit code.
pub fn run_cli<T, V, I, S>(pipeline: &mut Pipeline<T, V>, args: I) -> u8
where
    T: BuildTool,
    V: VersionControl,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let verbosity = Verbosity::from_args(args);
    if logging::init(verbosity).is_err() {
        log::debug!("logger already installed");
    }
    exit_code(&pipeline.run())
}

/// Human-readable byte count using 1024-based units.
///
/// ```rust
/// use termsite::build::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return String::from("0 B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
