use crate::errors::{LtrError, LtrResult};
use crate::ltr_model::{FeatureRef, FeatureWeights, LinearParams, ModelDocument, WeightValue};
use crate::param_extractor::ParameterVector;
use serde::{Deserialize, Serialize};

/// Feature order the trainer was fed. Change this if your features change.
pub const FEATURE_NAMES: [&str; 6] = [
    "originalScore",
    "titleLength",
    "contentLength",
    "titleScore",
    "contentScore",
    "freshness",
];

pub const FEATURE_STORE: &str = "myfeature_store";
pub const MODEL_NAME: &str = "mymodel";
pub const LINEAR_MODEL_CLASS: &str = "org.apache.solr.ltr.model.LinearModel";

/// How extracted weights are written into the document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WeightEncoding {
    /// Parse each token and emit a JSON number
    #[default]
    Number,
    /// Emit the raw token as a JSON string
    #[serde(rename = "string")]
    #[value(name = "string")]
    Text,
}

impl WeightEncoding {
    pub fn encode(self, raw: &str) -> LtrResult<WeightValue> {
        match self {
            WeightEncoding::Text => Ok(WeightValue::Text(raw.to_string())),
            WeightEncoding::Number => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| LtrError::malformed(raw, "not a number"))?;
                if !value.is_finite() {
                    return Err(LtrError::malformed(raw, "weight must be finite"));
                }
                Ok(WeightValue::Number(value))
            }
        }
    }
}

/// Fixed description of the linear model the trainer's weights are merged into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTemplate {
    store: String,
    name: String,
    class: String,
    features: Vec<String>,
}

impl ModelTemplate {
    pub fn solr_linear() -> Self {
        Self {
            store: FEATURE_STORE.to_string(),
            name: MODEL_NAME.to_string(),
            class: LINEAR_MODEL_CLASS.to_string(),
            features: FEATURE_NAMES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Build a fresh document with weight `i` taken from parameter `i`.
    ///
    /// Parameters beyond the feature count are ignored; fewer parameters than
    /// features is an error.
    pub fn assemble(
        &self,
        params: &ParameterVector,
        encoding: WeightEncoding,
    ) -> LtrResult<ModelDocument> {
        if params.len() < self.features.len() {
            return Err(LtrError::insufficient(self.features.len(), params.len()));
        }

        let mut weights = FeatureWeights::new();
        for (feature, raw) in self.features.iter().zip(params.as_slice()) {
            weights.insert(feature.clone(), encoding.encode(raw)?);
        }

        Ok(ModelDocument {
            store: self.store.clone(),
            name: self.name.clone(),
            class: self.class.clone(),
            features: self
                .features
                .iter()
                .map(|name| FeatureRef { name: name.clone() })
                .collect(),
            params: LinearParams { weights },
        })
    }
}

impl Default for ModelTemplate {
    fn default() -> Self {
        Self::solr_linear()
    }
}
