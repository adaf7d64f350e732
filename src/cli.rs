use crate::config::LtrConfig;
use crate::model_template::WeightEncoding;
use crate::model_writer::OutputTarget;
use crate::trainer::OverwriteMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line interface for the LTR model trainer
#[derive(Parser, Debug)]
#[command(
    name = "ltr_trainer",
    version,
    about = "Train the SVMRank model for Solr."
)]
pub struct Cli {
    /// File with training data
    pub training_file: PathBuf,

    /// Where to save the Solr compatible model file (default: stdout)
    #[arg(short = 'm', long = "modelOutFile", visible_alias = "model-out-file")]
    pub model_out_file: Option<PathBuf>,

    /// Path to directory where we can find the binary svm_rank_learn
    #[arg(long = "svmDir", visible_alias = "svm-dir")]
    pub svm_dir: Option<PathBuf>,

    /// What to do when a trainer result file already exists
    #[arg(long, value_enum)]
    pub overwrite: Option<OverwriteMode>,

    /// Encoding of the weights in the output document
    #[arg(long = "weights-as", value_enum)]
    pub weights_as: Option<WeightEncoding>,

    /// Pretty-print the output document
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (default: ltr.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags given on the command line win over file and environment settings
    pub fn apply_overrides(&self, config: &mut LtrConfig) {
        if let Some(dir) = &self.svm_dir {
            config.svm_dir = dir.clone();
        }
        if let Some(mode) = self.overwrite {
            config.overwrite = mode;
        }
        if let Some(encoding) = self.weights_as {
            config.weight_encoding = encoding;
        }
        if self.pretty {
            config.pretty = true;
        }
    }

    pub fn output_target(&self) -> OutputTarget {
        match &self.model_out_file {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
