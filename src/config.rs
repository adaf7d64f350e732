// Runtime configuration for a trainer run
//
// Layering: built-in defaults, then `ltr.toml` (or an explicit file), then
// `LTR_`-prefixed environment variables. Command-line flags are applied last
// by the CLI.

use crate::errors::{LtrError, LtrResult};
use crate::model_template::WeightEncoding;
use crate::trainer::OverwriteMode;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ltr.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtrConfig {
    /// Directory holding `svm_rank_learn`
    pub svm_dir: PathBuf,
    /// Trade-off between training error and margin (`-c`)
    pub svm_c: f64,
    pub overwrite: OverwriteMode,
    pub weight_encoding: WeightEncoding,
    pub pretty: bool,
}

impl Default for LtrConfig {
    fn default() -> Self {
        Self {
            svm_dir: PathBuf::from("svm_rank"),
            svm_c: 3.0,
            overwrite: OverwriteMode::Prompt,
            weight_encoding: WeightEncoding::Number,
            pretty: false,
        }
    }
}

impl LtrConfig {
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(LtrConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("LTR_"))
    }

    pub fn validate(&self) -> LtrResult<()> {
        if !self.svm_c.is_finite() || self.svm_c <= 0.0 {
            return Err(LtrError::config(format!(
                "svm_c must be a positive number, got {}",
                self.svm_c
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: Option<&Path>) -> LtrResult<LtrConfig> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(LtrError::config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
    }
    let config: LtrConfig = LtrConfig::figment(path)
        .extract()
        .map_err(|e| LtrError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = load_config(None).unwrap();
            assert_eq!(config, LtrConfig::default());
            assert_eq!(config.svm_dir, PathBuf::from("svm_rank"));
            assert_eq!(config.svm_c, 3.0);
            Ok(())
        });
    }

    #[test]
    fn toml_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ltr.toml",
                r#"
                    svm_dir = "/opt/svm_rank"
                    svm_c = 10
                    overwrite = "never"
                    weight_encoding = "string"
                "#,
            )?;
            jail.set_env("LTR_SVM_C", "0.5");
            jail.set_env("LTR_PRETTY", "true");

            let config = load_config(None).unwrap();
            assert_eq!(config.svm_dir, PathBuf::from("/opt/svm_rank"));
            assert_eq!(config.svm_c, 0.5);
            assert_eq!(config.overwrite, OverwriteMode::Never);
            assert_eq!(config.weight_encoding, WeightEncoding::Text);
            assert!(config.pretty);
            Ok(())
        });
    }

    #[test]
    fn explicit_config_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"overwrite = "always""#)?;
            let config = load_config(Some(Path::new("custom.toml"))).unwrap();
            assert_eq!(config.overwrite, OverwriteMode::Always);

            assert!(load_config(Some(Path::new("absent.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn rejects_unknown_overwrite_mode() {
        Jail::expect_with(|jail| {
            jail.set_env("LTR_OVERWRITE", "sometimes");
            assert!(matches!(load_config(None), Err(LtrError::Config { .. })));
            Ok(())
        });
    }

    #[test]
    fn rejects_non_positive_c() {
        Jail::expect_with(|jail| {
            jail.set_env("LTR_SVM_C", "0");
            let err = load_config(None).unwrap_err();
            assert!(matches!(err, LtrError::Config { .. }));
            assert!(err.to_string().contains("svm_c"));
            Ok(())
        });
    }
}
