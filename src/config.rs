use crate::domain::payload::EncodeMode;
use std::path::PathBuf;

pub const ENV_MODE: &str = "SHOPQR_MODE";
pub const ENV_DATA_DIR: &str = "SHOPQR_DATA_DIR";
pub const ENV_DB_PATH: &str = "SHOPQR_DB_PATH";
pub const ENV_PAYEE: &str = "SHOPQR_PAYEE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderConfig {
    pub mode: EncodeMode,
}

/// Where the shop's sheets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Nothing persisted; every sheet starts empty.
    InMemory,
    /// A directory of `<sheet>.csv` files.
    CsvDir(PathBuf),
    /// A RocksDB database. Only usable with the `storage-rocksdb` feature.
    RocksDb(PathBuf),
}

/// Settings resolved from command-line flags and their environment fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub encoder: EncoderConfig,
    pub backend: StoreBackend,
    pub payee: Option<String>,
}

impl Settings {
    /// A database path wins over a data directory.
    pub fn resolve(
        mode: EncodeMode,
        data_dir: Option<PathBuf>,
        db_path: Option<PathBuf>,
        payee: Option<String>,
    ) -> Self {
        let backend = match (db_path, data_dir) {
            (Some(db), _) => StoreBackend::RocksDb(db),
            (None, Some(dir)) => StoreBackend::CsvDir(dir),
            (None, None) => StoreBackend::InMemory,
        };
        Self {
            encoder: EncoderConfig { mode },
            backend,
            payee: payee.filter(|p| !p.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_takes_precedence() {
        let settings = Settings::resolve(
            EncodeMode::Strict,
            Some(PathBuf::from("sheets")),
            Some(PathBuf::from("db")),
            None,
        );
        assert_eq!(settings.backend, StoreBackend::RocksDb(PathBuf::from("db")));
        assert_eq!(settings.encoder.mode, EncodeMode::Strict);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(EncodeMode::default(), None, None, Some("  ".to_string()));
        assert_eq!(settings.backend, StoreBackend::InMemory);
        assert_eq!(settings.encoder.mode, EncodeMode::Standard);
        assert_eq!(settings.payee, None);
    }
}
