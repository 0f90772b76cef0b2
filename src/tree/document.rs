//! Tree JSON documents: `{ "devices": <TreeNode> }`

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TreeError};

use super::node::TreeNode;

/// A persisted tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDocument {
    #[serde(default)]
    pub devices: Option<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl TreeDocument {
    /// Wrap a freshly built tree, stamped with the current time.
    pub fn new(root: TreeNode) -> Self {
        Self {
            devices: Some(root),
            generated_at: Some(Utc::now()),
        }
    }

    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                TreeError::NotFound(path.to_path_buf())
            } else {
                TreeError::io(path, e)
            }
        })?;
        let reader = serde_json::de::IoRead::new(BufReader::new(file));
        let document = decode(serde_json::Deserializer::new(reader)).map_err(|source| {
            TreeError::MalformedJson {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "loaded tree document");
        Ok(document)
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        decode(serde_json::Deserializer::from_str(json))
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the document to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TreeError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| TreeError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, pretty)
            .map_err(|e| match e {
                TreeError::Output(source) => TreeError::io(path, source),
                other => other,
            })?;
        debug!(path = %path.display(), "saved tree document");
        Ok(())
    }

    /// Write the document followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut *writer, self)?;
        } else {
            serde_json::to_writer(&mut *writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Parse without serde_json's nesting limit; the stack grows on demand so
/// any tree the builder can produce reads back.
fn decode<'de, R: serde_json::de::Read<'de>>(
    mut de: serde_json::Deserializer<R>,
) -> serde_json::Result<TreeDocument> {
    de.disable_recursion_limit();
    let document = TreeDocument::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(document)
}
