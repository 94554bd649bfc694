use std::path::PathBuf;

/// Runtime configuration describing where collection documents live on disk.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Directory holding one `<collection>.json` document per collection.
    pub data_dir: PathBuf,
}

impl FileStoreConfig {
    /// Construct a configuration from an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Build a configuration from the `NEXT_GAME_DATA_DIR` environment
    /// variable, falling back to `data/` next to the binary.
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os("NEXT_GAME_DATA_DIR")
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("data"));
        Self { data_dir }
    }
}
