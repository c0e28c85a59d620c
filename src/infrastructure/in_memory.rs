use crate::domain::ports::{Record, SheetStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory sheet store.
///
/// Uses `Arc<RwLock<HashMap<String, Vec<Record>>>>` so clones share the same
/// sheets. Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemorySheetStore {
    sheets: Arc<RwLock<HashMap<String, Vec<Record>>>>,
}

impl InMemorySheetStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn read(&self, sheet: &str) -> Result<Vec<Record>> {
        let sheets = self.sheets.read().await;
        Ok(sheets.get(sheet).cloned().unwrap_or_default())
    }

    async fn write(&self, sheet: &str, records: Vec<Record>) -> Result<()> {
        let mut sheets = self.sheets.write().await;
        sheets.insert(sheet.to_string(), records);
        Ok(())
    }

    async fn sheets(&self) -> Result<Vec<String>> {
        let sheets = self.sheets.read().await;
        let mut names: Vec<String> = sheets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
