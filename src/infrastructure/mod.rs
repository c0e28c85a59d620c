//! Sheet store adapters.

pub mod csv_dir;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::config::StoreBackend;
use crate::domain::ports::SheetStoreBox;
use crate::error::Result;
use csv_dir::CsvSheetStore;
use in_memory::InMemorySheetStore;

/// Opens the store selected by `backend`.
///
/// Without the `storage-rocksdb` feature a RocksDB backend falls back to an
/// in-memory store and logs a warning.
pub fn open_store(backend: &StoreBackend) -> Result<SheetStoreBox> {
    match backend {
        StoreBackend::InMemory => Ok(Box::new(InMemorySheetStore::new())),
        StoreBackend::CsvDir(dir) => Ok(Box::new(CsvSheetStore::open(dir)?)),
        #[cfg(feature = "storage-rocksdb")]
        StoreBackend::RocksDb(path) => Ok(Box::new(self::rocksdb::RocksDbSheetStore::open(path)?)),
        #[cfg(not(feature = "storage-rocksdb"))]
        StoreBackend::RocksDb(path) => {
            tracing::warn!(
                path = %path.display(),
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemorySheetStore::new()))
        }
    }
}
