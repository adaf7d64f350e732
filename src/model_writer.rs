use crate::errors::{LtrError, LtrResult};
use crate::ltr_model::ModelDocument;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Where the finished model document goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serialize the whole document before touching the destination
pub fn render(doc: &ModelDocument, pretty: bool) -> LtrResult<Vec<u8>> {
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(doc)
    } else {
        serde_json::to_vec(doc)
    }
    .map_err(|e| LtrError::serialization("model document", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the rendered document to any writer in one go
pub fn write_to<W: Write>(doc: &ModelDocument, pretty: bool, mut out: W) -> LtrResult<()> {
    let bytes = render(doc, pretty)?;
    out.write_all(&bytes)
        .and_then(|_| out.flush())
        .map_err(|e| LtrError::io("writing model document", e))
}

/// Write the document to its target
pub fn write_model(doc: &ModelDocument, target: &OutputTarget, pretty: bool) -> LtrResult<()> {
    match target {
        OutputTarget::Stdout => write_to(doc, pretty, io::stdout().lock())?,
        OutputTarget::File(path) => {
            let bytes = render(doc, pretty)?;
            fs::write(path, bytes)
                .map_err(|e| LtrError::io(format!("writing {}", path.display()), e))?;
        }
    }
    info!(destination = %target, "model document written");
    Ok(())
}
