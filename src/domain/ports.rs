use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// One row of a sheet: column name to cell text.
pub type Record = BTreeMap<String, String>;

/// A store of named sheets, each a list of flat records.
///
/// Reads return every row of a sheet; writes replace the sheet wholesale.
/// A sheet that was never written reads as empty.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn read(&self, sheet: &str) -> Result<Vec<Record>>;
    async fn write(&self, sheet: &str, records: Vec<Record>) -> Result<()>;
    async fn sheets(&self) -> Result<Vec<String>>;
}

pub type SheetStoreBox = Box<dyn SheetStore>;
