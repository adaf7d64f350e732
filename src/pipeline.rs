//! End-to-end run: train (or reuse), extract, assemble, write.

use crate::config::LtrConfig;
use crate::errors::{LtrError, LtrResult};
use crate::ltr_model::ModelDocument;
use crate::model_template::ModelTemplate;
use crate::model_writer::{write_model, OutputTarget};
use crate::param_extractor::read_parameter_file;
use crate::trainer::{Confirm, Trainer, TrainerLauncher, TrainerOutcome, RESULT_FILE};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ModelBuilder<C, L> {
    config: LtrConfig,
    template: ModelTemplate,
    result_path: PathBuf,
    confirm: C,
    launcher: L,
}

impl<C: Confirm, L: TrainerLauncher> ModelBuilder<C, L> {
    pub fn new(config: LtrConfig, confirm: C, launcher: L) -> Self {
        Self {
            config,
            template: ModelTemplate::solr_linear(),
            result_path: PathBuf::from(RESULT_FILE),
            confirm,
            launcher,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_result_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_path = path.into();
        self
    }

    pub fn confirm(&self) -> &C {
        &self.confirm
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run or skip the trainer according to the overwrite policy
    pub fn train(&mut self, training_file: &Path) -> LtrResult<TrainerOutcome> {
        check_training_file(training_file)?;

        Trainer {
            svm_dir: self.config.svm_dir.clone(),
            c: self.config.svm_c,
            result_path: self.result_path.clone(),
            overwrite: self.config.overwrite,
            confirm: &mut self.confirm,
            launcher: &mut self.launcher,
        }
        .ensure_result(training_file)
    }

    /// Produce the model document without writing it anywhere
    pub fn build(&mut self, training_file: &Path) -> LtrResult<ModelDocument> {
        let outcome = self.train(training_file)?;
        let params = read_parameter_file(&outcome.result_path)?;
        info!(
            parameters = params.len(),
            regenerated = outcome.regenerated,
            "assembling model document"
        );
        self.template.assemble(&params, self.config.weight_encoding)
    }

    /// Build the document and write it to `target` once it is complete
    pub fn run(&mut self, training_file: &Path, target: &OutputTarget) -> LtrResult<ModelDocument> {
        let doc = self.build(training_file)?;
        write_model(&doc, target, self.config.pretty)?;
        Ok(doc)
    }
}

/// The training data must be a regular file we can open for reading
fn check_training_file(path: &Path) -> LtrResult<()> {
    let operation = || format!("opening training data {}", path.display());
    let meta = fs::metadata(path).map_err(|e| LtrError::io(operation(), e))?;
    if !meta.is_file() {
        return Err(LtrError::io(
            operation(),
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    File::open(path).map_err(|e| LtrError::io(operation(), e))?;
    Ok(())
}
