//! Invocation of the external ranking trainer
//!
//! The trainer (`svm_rank_learn`) is an opaque binary that writes its result
//! to a file named `model` in the current working directory. This module
//! decides whether that file needs regenerating and, if so, runs the trainer.

use crate::errors::{LtrError, LtrResult};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Name of the trainer binary inside the configured trainer directory
pub const TRAINER_BINARY: &str = "svm_rank_learn";

/// File the trainer writes its result to, in the current working directory
pub const RESULT_FILE: &str = "model";

/// What to do when a result file already exists
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteMode {
    /// Ask on the terminal
    #[default]
    Prompt,
    /// Always retrain
    Always,
    /// Reuse the existing result file
    Never,
}

/// Yes/no confirmation source for the overwrite prompt
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> LtrResult<bool>;
}

/// Line-based confirmation over any reader/writer pair
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr so stdout stays reserved for the model document
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> LtrResult<bool> {
        writeln!(self.output, "{question}").map_err(|source| LtrError::Prompt { source })?;
        self.output
            .flush()
            .map_err(|source| LtrError::Prompt { source })?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(|source| LtrError::Prompt { source })?;

        Ok(answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y"))
    }
}

/// Apply the overwrite policy to the presence of a previous result
pub fn should_regenerate<C: Confirm + ?Sized>(
    mode: OverwriteMode,
    result_exists: bool,
    confirm: &mut C,
) -> LtrResult<bool> {
    if !result_exists {
        return Ok(true);
    }
    match mode {
        OverwriteMode::Always => Ok(true),
        OverwriteMode::Never => Ok(false),
        OverwriteMode::Prompt => {
            confirm.confirm("A model file already exists.\nDo you want to overwrite it? [N/y]")
        }
    }
}

/// A fully resolved trainer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl TrainerCommand {
    /// `<svm_dir>/svm_rank_learn -c <c> <training_file> model`
    pub fn new(svm_dir: &Path, c: f64, training_file: &Path) -> Self {
        Self {
            program: svm_dir.join(TRAINER_BINARY),
            args: vec![
                OsString::from("-c"),
                OsString::from(c.to_string()),
                training_file.as_os_str().to_os_string(),
                OsString::from(RESULT_FILE),
            ],
        }
    }
}

/// Runs a trainer command to completion
pub trait TrainerLauncher {
    fn launch(&mut self, command: &TrainerCommand) -> LtrResult<()>;
}

/// Launches the trainer as a child process.
///
/// The child's stdout is sent to our stderr so that stdout carries nothing
/// but the model document.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl TrainerLauncher for ProcessLauncher {
    fn launch(&mut self, command: &TrainerCommand) -> LtrResult<()> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| LtrError::TrainerLaunch {
                program: command.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(LtrError::TrainerFailed {
                program: command.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerOutcome {
    pub result_path: PathBuf,
    pub regenerated: bool,
}

/// Trainer invocation bound to a trainer directory, result location and policy
pub struct Trainer<'a, C: ?Sized, L: ?Sized> {
    pub svm_dir: PathBuf,
    pub c: f64,
    /// Where the trainer leaves its result; `model` in the current directory
    pub result_path: PathBuf,
    pub overwrite: OverwriteMode,
    pub confirm: &'a mut C,
    pub launcher: &'a mut L,
}

impl<C: Confirm + ?Sized, L: TrainerLauncher + ?Sized> Trainer<'_, C, L> {
    /// Make sure a result file exists, running the trainer when the policy says so
    pub fn ensure_result(&mut self, training_file: &Path) -> LtrResult<TrainerOutcome> {
        let result_path = self.result_path.clone();
        let exists = result_path.is_file();

        let regenerated = should_regenerate(self.overwrite, exists, &mut *self.confirm)?;
        if regenerated {
            let command = TrainerCommand::new(&self.svm_dir, self.c, training_file);
            info!(program = %command.program.display(), args = ?command.args, "running trainer");
            self.launcher.launch(&command)?;
        } else {
            warn!(path = %result_path.display(), "reusing existing trainer result");
        }

        Ok(TrainerOutcome {
            result_path,
            regenerated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Fixed(bool);

    impl Confirm for Fixed {
        fn confirm(&mut self, _question: &str) -> LtrResult<bool> {
            Ok(self.0)
        }
    }

    fn answer(input: &str) -> bool {
        let mut out = Vec::new();
        let mut prompt = PromptConfirm::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
        let accepted = prompt.confirm("overwrite?").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "overwrite?\n");
        accepted
    }

    #[test]
    fn only_y_confirms() {
        assert!(answer("y\n"));
        assert!(answer("Y\r\n"));
        assert!(answer("y"));
        assert!(!answer("n\n"));
        assert!(!answer("yes\n"));
        assert!(!answer("\n"));
        assert!(!answer(" y\n"));
        assert!(!answer(""));
    }

    #[test]
    fn missing_result_always_regenerates() {
        for mode in [OverwriteMode::Prompt, OverwriteMode::Always, OverwriteMode::Never] {
            assert!(should_regenerate(mode, false, &mut Fixed(false)).unwrap());
        }
    }

    #[test]
    fn existing_result_follows_policy() {
        assert!(should_regenerate(OverwriteMode::Always, true, &mut Fixed(false)).unwrap());
        assert!(!should_regenerate(OverwriteMode::Never, true, &mut Fixed(true)).unwrap());
        assert!(should_regenerate(OverwriteMode::Prompt, true, &mut Fixed(true)).unwrap());
        assert!(!should_regenerate(OverwriteMode::Prompt, true, &mut Fixed(false)).unwrap());
    }

    #[test]
    fn command_uses_fixed_argument_convention() {
        let cmd = TrainerCommand::new(Path::new("svm_rank"), 3.0, Path::new("train.dat"));
        assert_eq!(cmd.program, Path::new("svm_rank").join("svm_rank_learn"));
        let args: Vec<&str> = cmd.args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(args, vec!["-c", "3", "train.dat", "model"]);
    }

    #[test]
    fn fractional_c_is_passed_through() {
        let cmd = TrainerCommand::new(Path::new("d"), 0.5, Path::new("t"));
        assert_eq!(cmd.args[1], OsString::from("0.5"));
    }

    #[test]
    fn missing_binary_is_launch_error() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let cmd = TrainerCommand::new(dir.path(), 3.0, Path::new("train.dat"));
        let err = ProcessLauncher.launch(&cmd).unwrap_err();
        assert!(matches!(err, LtrError::TrainerLaunch { .. }));
    }
}
