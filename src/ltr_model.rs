use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Linear ranking model document in the layout the search engine's LTR plugin loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub store: String,
    pub name: String,
    pub class: String,
    pub features: Vec<FeatureRef>,
    pub params: LinearParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub weights: FeatureWeights,
}

/// A single weight as it appears in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightValue {
    Number(f64),
    Text(String),
}

impl WeightValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WeightValue::Number(n) => Some(*n),
            WeightValue::Text(s) => s.parse().ok(),
        }
    }
}

/// Feature name to weight mapping that keeps feature order on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights(Map<String, Value>);

impl FeatureWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a weight, replacing any existing entry for the same feature in place
    pub fn insert(&mut self, name: impl Into<String>, value: WeightValue) {
        self.0.insert(name.into(), value.into());
    }

    /// Weight for `name`; entries that are neither numbers nor strings read as absent
    pub fn get(&self, name: &str) -> Option<WeightValue> {
        match self.0.get(name)? {
            Value::Number(n) => n.as_f64().map(WeightValue::Number),
            Value::String(s) => Some(WeightValue::Text(s.clone())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<WeightValue> for Value {
    fn from(value: WeightValue) -> Self {
        match value {
            WeightValue::Number(n) => Value::from(n),
            WeightValue::Text(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_serialize_in_insertion_order() {
        let mut weights = FeatureWeights::new();
        weights.insert("zeta", WeightValue::Number(1.0));
        weights.insert("alpha", WeightValue::Number(0.5));
        weights.insert("mid", WeightValue::Text("0.25".into()));

        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(json, r#"{"zeta":1.0,"alpha":0.5,"mid":"0.25"}"#);
    }

    #[test]
    fn insert_overwrites_without_reordering() {
        let mut weights = FeatureWeights::new();
        weights.insert("a", WeightValue::Number(0.0));
        weights.insert("b", WeightValue::Number(0.0));
        weights.insert("a", WeightValue::Number(2.0));

        assert_eq!(weights.len(), 2);
        let names: Vec<&str> = weights.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(weights.get("a"), Some(WeightValue::Number(2.0)));
    }

    #[test]
    fn deserialize_keeps_document_order() {
        let weights: FeatureWeights =
            serde_json::from_str(r#"{"b": 0.1, "a": "0.2", "c": -3}"#).unwrap();
        let names: Vec<&str> = weights.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(weights.get("a").and_then(|w| w.as_f64()), Some(0.2));
        assert_eq!(weights.get("c").and_then(|w| w.as_f64()), Some(-3.0));
    }
}
