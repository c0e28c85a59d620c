use crate::domain::ports::{Record, SheetStore};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding one entry per sheet, keyed by sheet name.
pub const CF_SHEETS: &str = "sheets";

/// A persistent sheet store using RocksDB.
///
/// Each sheet is stored whole as a JSON array of records, matching the
/// replace-the-sheet write contract. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbSheetStore {
    db: Arc<DB>,
}

impl RocksDbSheetStore {
    /// Opens or creates a RocksDB instance at `path` with the sheets column family.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_sheets = ColumnFamilyDescriptor::new(CF_SHEETS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_sheets])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> ShopError {
        ShopError::InternalError(Box::new(std::io::Error::other(
            "Sheets column family not found",
        )))
    }
}

#[async_trait]
impl SheetStore for RocksDbSheetStore {
    async fn read(&self, sheet: &str) -> Result<Vec<Record>> {
        let cf = self.db.cf_handle(CF_SHEETS).ok_or_else(Self::missing_cf)?;
        match self.db.get_cf(&cf, sheet.as_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, sheet: &str, records: Vec<Record>) -> Result<()> {
        let cf = self.db.cf_handle(CF_SHEETS).ok_or_else(Self::missing_cf)?;
        let value = serde_json::to_vec(&records)?;
        self.db.put_cf(&cf, sheet.as_bytes(), value)?;
        Ok(())
    }

    async fn sheets(&self) -> Result<Vec<String>> {
        let cf = self.db.cf_handle(CF_SHEETS).ok_or_else(Self::missing_cf)?;
        let mut names = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, _value) = item?;
            let name = String::from_utf8(key.to_vec()).map_err(|e| {
                ShopError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("sheet name is not UTF-8: {}", e),
                )))
            })?;
            names.push(name);
        }
        Ok(names)
    }
}
