use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::GeneDictionary;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read gene dictionary '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse gene dictionary: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 从 JSON 文档读取 `{"<sequence>": "<gene id>", ...}`
pub fn load_json<R: Read>(reader: R) -> Result<GeneDictionary, LoadError> {
    let dict: GeneDictionary = serde_json::from_reader(reader)?;
    Ok(dict)
}

pub fn load_json_file(path: &Path) -> Result<GeneDictionary, LoadError> {
    let fh = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dict = load_json(std::io::BufReader::new(fh))?;
    debug!(
        "loaded {} genes from {} (longest reference {} bp)",
        dict.len(),
        path.display(),
        dict.max_reference_len()
    );
    Ok(dict)
}
