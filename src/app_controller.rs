use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::extraction::{DocumentExtractor, PdfExtractor};
use crate::file_utils::FileManager;
use crate::routing::Router;
use crate::validation::TemplateValidator;

// @module: Application controller for document filing

/// What happened to one document
#[derive(Debug, Clone, PartialEq)]
pub struct FilingOutcome {
    /// Document that was processed
    pub source: PathBuf,
    /// Whether the document passed the template check
    pub accepted: bool,
    /// Human-readable result
    pub message: String,
    /// Folder the document was (or would be) filed into
    pub destination: Option<PathBuf>,
}

impl FilingOutcome {
    fn filed(source: &Path, target_dir: PathBuf) -> Self {
        Self {
            source: source.to_path_buf(),
            accepted: true,
            message: format!(
                "File passed format check and was moved to {}",
                target_dir.display()
            ),
            destination: Some(target_dir),
        }
    }

    fn checked(source: &Path, target_dir: PathBuf) -> Self {
        Self {
            source: source.to_path_buf(),
            accepted: true,
            message: format!(
                "File passed format check and would be moved to {}",
                target_dir.display()
            ),
            destination: Some(target_dir),
        }
    }

    fn refused(source: &Path, error: &AppError) -> Self {
        Self {
            source: source.to_path_buf(),
            accepted: false,
            message: error.to_string(),
            destination: None,
        }
    }
}

/// Totals of a folder run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Per-document outcomes in completion order
    pub outcomes: Vec<FilingOutcome>,
}

impl RunSummary {
    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.accepted).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.accepted).count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!(
            "Processed {} document(s): {} accepted, {} rejected",
            self.outcomes.len(),
            self.accepted_count(),
            self.rejected_count()
        )
    }
}

/// Whether accepted documents are moved or only reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Validate and move accepted documents
    File,
    /// Validate and report the target folder without moving anything
    Check,
}

/// Main application controller for document filing
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: First-page reader
    extractor: Arc<dyn DocumentExtractor>,
    // @field: Template check chain
    validator: TemplateValidator,
    // @field: Target folder computation
    router: Router,
}

impl Controller {
    /// Create a controller with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller reading PDFs with lopdf
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_extractor(config, Arc::new(PdfExtractor::new()))
    }

    // @method: Create a new controller with a custom extractor
    pub fn with_extractor(config: Config, extractor: Arc<dyn DocumentExtractor>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            validator: TemplateValidator::with_config(config.template.clone()),
            router: Router::from_config(&config),
            extractor,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create the upload and output folders before a filing run
    ///
    /// A check run only reads, so it leaves the file system untouched.
    pub fn prepare_directories(&self, mode: RunMode) -> Result<()> {
        if mode == RunMode::Check {
            return Ok(());
        }
        FileManager::ensure_dir(&self.config.intake.upload_dir)?;
        FileManager::ensure_dir(&self.config.routing.output_root)?;
        debug!(
            "Prepared {:?} and {:?}",
            self.config.intake.upload_dir, self.config.routing.output_root
        );
        Ok(())
    }

    /// Validate a document and move it into its folder
    ///
    /// Never fails: every problem is reported in the outcome, and a refused
    /// document is left where it is.
    pub async fn file_document(&self, path: &Path) -> FilingOutcome {
        let result = async {
            let target_dir = self.classify(path).await?;
            FileManager::move_file(path, &target_dir)?;
            Ok::<_, AppError>(target_dir)
        }
        .await;

        match result {
            Ok(target_dir) => {
                let outcome = FilingOutcome::filed(path, target_dir);
                info!("{:?}: {}", path, outcome.message);
                outcome
            }
            Err(e) => {
                warn!("{:?}: {}", path, e);
                FilingOutcome::refused(path, &e)
            }
        }
    }

    /// Validate a document and report where it would be filed
    pub async fn check_document(&self, path: &Path) -> FilingOutcome {
        match self.classify(path).await {
            Ok(target_dir) => {
                let outcome = FilingOutcome::checked(path, target_dir);
                info!("{:?}: {}", path, outcome.message);
                outcome
            }
            Err(e) => {
                warn!("{:?}: {}", path, e);
                FilingOutcome::refused(path, &e)
            }
        }
    }

    /// Process a single document in the given mode
    pub async fn run(&self, path: &Path, mode: RunMode) -> FilingOutcome {
        match mode {
            RunMode::File => self.file_document(path).await,
            RunMode::Check => self.check_document(path).await,
        }
    }

    /// Process every document with the allowed extension below `input_dir`
    pub async fn run_folder(&self, input_dir: &Path, mode: RunMode) -> Result<RunSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let output_root = self.config.routing.output_root.canonicalize().ok();
        let documents: Vec<PathBuf> = FileManager::find_files(input_dir, &self.config.intake.allowed_extension)?
            .into_iter()
            .filter(|path| match (&output_root, path.canonicalize()) {
                (Some(root), Ok(path)) => !path.starts_with(root),
                _ => true,
            })
            .collect();

        if documents.is_empty() {
            info!("No .{} documents found in {:?}", self.config.intake.allowed_extension, input_dir);
            return Ok(RunSummary::default());
        }

        debug!("Found {} document(s) in {:?}", documents.len(), input_dir);

        let progress_bar = ProgressBar::new(documents.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        let progress = &progress_bar;
        let outcomes: Vec<FilingOutcome> = stream::iter(documents)
            .map(|path| async move {
                let outcome = self.run(&path, mode).await;
                progress.inc(1);
                outcome
            })
            .buffer_unordered(self.config.intake.concurrent_documents)
            .collect()
            .await;

        progress_bar.finish_and_clear();

        let summary = RunSummary { outcomes };
        info!("{}", summary.summary());
        Ok(summary)
    }

    /// Intake filter, extraction, validation and routing
    async fn classify(&self, path: &Path) -> Result<PathBuf, AppError> {
        let allowed = &self.config.intake.allowed_extension;
        if !FileManager::has_extension(path, allowed) {
            return Err(AppError::DisallowedExtension {
                path: path.to_path_buf(),
                allowed: allowed.clone(),
            });
        }

        let page = self.extractor.extract(path).await?;
        let record = self.validator.validate(&page).into_result()?;

        debug!(
            "{:?} classified as {} ({}), {}, {:?} semester",
            path,
            record.branch().name,
            record.branch().code,
            record.year().label,
            record.semester()
        );

        Ok(self.router.route(record))
    }
}
