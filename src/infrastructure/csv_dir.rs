use crate::domain::ledger;
use crate::domain::ports::{Record, SheetStore};
use crate::error::{Result, ShopError};
use crate::interfaces::csv::sheet_reader::SheetReader;
use crate::interfaces::csv::sheet_writer::SheetWriter;
use async_trait::async_trait;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "csv";

/// A sheet store backed by a directory holding one `<sheet>.csv` per sheet.
///
/// File I/O runs on tokio's blocking pool.
#[derive(Clone, Debug)]
pub struct CsvSheetStore {
    dir: PathBuf,
}

impl CsvSheetStore {
    /// Opens the directory, creating it if missing.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, sheet: &str) -> Result<PathBuf> {
        let valid = !sheet.is_empty()
            && sheet
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ShopError::InvalidSheet(sheet.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", sheet, EXTENSION)))
    }
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ShopError::InternalError(Box::new(e)))?
}

fn read_sheet(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    SheetReader::new(file).records().collect()
}

/// Header of an existing sheet file, or the shop's default columns.
fn empty_sheet_columns(path: &Path, sheet: &str) -> Result<Vec<String>> {
    if path.exists() {
        let headers = SheetReader::new(File::open(path)?).headers()?;
        if !headers.is_empty() {
            return Ok(headers);
        }
    }
    Ok(ledger::sheet_columns(sheet)
        .iter()
        .map(|c| c.to_string())
        .collect())
}

fn write_sheet(path: &Path, sheet: &str, records: &[Record]) -> Result<()> {
    let columns = if records.is_empty() {
        empty_sheet_columns(path, sheet)?
    } else {
        Vec::new()
    };
    // Written beside the target, then renamed over it.
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = SheetWriter::new(File::create(&tmp)?);
        if records.is_empty() {
            writer.write_header(&columns)?;
        } else {
            writer.write_records(records)?;
        }
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn list_sheets(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == EXTENSION)
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[async_trait]
impl SheetStore for CsvSheetStore {
    async fn read(&self, sheet: &str) -> Result<Vec<Record>> {
        let path = self.path(sheet)?;
        let source = path.clone();
        let records = blocking(move || read_sheet(&source)).await?;
        tracing::debug!(path = %path.display(), rows = records.len(), "read sheet");
        Ok(records)
    }

    async fn write(&self, sheet: &str, records: Vec<Record>) -> Result<()> {
        let path = self.path(sheet)?;
        let rows = records.len();
        let (target, name) = (path.clone(), sheet.to_string());
        blocking(move || write_sheet(&target, &name, &records)).await?;
        tracing::debug!(path = %path.display(), rows, "wrote sheet");
        Ok(())
    }

    async fn sheets(&self) -> Result<Vec<String>> {
        let dir = self.dir.clone();
        blocking(move || list_sheets(&dir)).await
    }
}
