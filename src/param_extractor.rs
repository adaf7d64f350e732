//! Parameter extraction from the ranking trainer's result file
//!
//! The trainer writes its learned weight vector as the last line of the result
//! file in sparse `index:value` form, e.g.
//!
//! ```text
//! 1 1:0.5 2:0.25 3:0.1 4:0.05 5:0.3 6:0.9 #
//! ```
//!
//! Only tokens containing a colon are parameters; everything after the first
//! colon is kept verbatim so no precision is lost before the document is
//! written.

use crate::errors::{LtrError, LtrResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Ordered parameter strings taken from the trainer's final line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterVector(Vec<String>);

impl ParameterVector {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Outcome of scanning text for its parameter line
#[derive(Debug, PartialEq, Eq)]
pub enum ParamLine<'a> {
    Found(&'a str),
    Empty,
}

/// Find the last line that holds anything other than whitespace
pub fn last_data_line(text: &str) -> ParamLine<'_> {
    text.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map_or(ParamLine::Empty, ParamLine::Found)
}

/// Split one `index:value` token, returning the value part.
///
/// Tokens without a colon yield `Ok(None)`; a colon with nothing after it is
/// malformed.
pub fn parse_token(token: &str) -> LtrResult<Option<&str>> {
    match token.split_once(':') {
        None => Ok(None),
        Some((_, "")) => Err(LtrError::malformed(token, "missing value after ':'")),
        Some((_, value)) => Ok(Some(value)),
    }
}

/// Extract the parameter vector from the full text of a result file.
///
/// `source` only labels the `NoData` error.
pub fn extract_parameters(text: &str, source: &Path) -> LtrResult<ParameterVector> {
    let line = match last_data_line(text) {
        ParamLine::Found(line) => line,
        ParamLine::Empty => {
            return Err(LtrError::NoData {
                path: source.to_path_buf(),
            })
        }
    };

    let mut values = Vec::new();
    for token in line.split_whitespace() {
        if let Some(value) = parse_token(token)? {
            values.push(value.to_string());
        }
    }

    debug!(count = values.len(), "extracted trainer parameters");
    Ok(ParameterVector(values))
}

/// Read the trainer result file at `path` and extract its parameters
pub fn read_parameter_file(path: &Path) -> LtrResult<ParameterVector> {
    let text = fs::read_to_string(path)
        .map_err(|e| LtrError::io(format!("reading trainer result {}", path.display()), e))?;
    extract_parameters(&text, path)
}
