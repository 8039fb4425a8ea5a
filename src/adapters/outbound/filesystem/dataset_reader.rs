use crate::ports::outbound::{DatasetReader, GovernanceDataset};
use crate::shared::security::validate_input_file;
use crate::shared::{GovernanceError, Result};
use std::fs;
use std::path::Path;

/// On-disk dataset encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Json,
    Toml,
    Yaml,
}

impl DatasetFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// FileSystemReader adapter for loading governance datasets
///
/// Files are checked before reading: symlinks, non-regular files and
/// anything above [`MAX_FILE_SIZE`](crate::shared::security::MAX_FILE_SIZE)
/// are rejected.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader for FileSystemReader {
    fn read_dataset(&self, path: &Path) -> Result<GovernanceDataset> {
        let read_error = |details: String| GovernanceError::FileReadError {
            path: path.to_path_buf(),
            details,
        };
        let parse_error = |details: String| GovernanceError::DatasetParseError {
            path: path.to_path_buf(),
            details,
        };

        validate_input_file(path, "governance dataset").map_err(|e| read_error(e.to_string()))?;
        let format = DatasetFormat::from_path(path).ok_or_else(|| {
            parse_error("unsupported file extension (expected .json, .toml, .yml or .yaml)".to_string())
        })?;
        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;

        let dataset = match format {
            DatasetFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            DatasetFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            DatasetFormat::Yaml => {
                serde_yaml_ng::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
        };
        Ok(dataset)
    }
}
