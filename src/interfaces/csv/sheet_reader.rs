use crate::domain::ports::Record;
use crate::error::{Result, ShopError};
use std::io::Read;

/// Reads sheet rows from a CSV source whose first line names the columns.
///
/// Cells are trimmed and rows may be shorter than the header; missing cells
/// are simply absent from the record.
pub struct SheetReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SheetReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Column names from the first line; empty for an empty source.
    pub fn headers(mut self) -> Result<Vec<String>> {
        Ok(self.reader.headers()?.iter().map(str::to_string).collect())
    }

    /// Lazily yields each row as a [`Record`].
    pub fn records(mut self) -> impl Iterator<Item = Result<Record>> {
        let (headers, mut header_error) = match self.reader.headers() {
            Ok(headers) => (headers.clone(), None),
            Err(e) => (csv::StringRecord::new(), Some(e)),
        };
        let mut rows = self.reader.into_records();
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            if let Some(e) = header_error.take() {
                done = true;
                return Some(Err(ShopError::from(e)));
            }
            let row = rows.next()?;
            Some(row.map_err(ShopError::from).map(|row| {
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(column, cell)| (column.to_string(), cell.to_string()))
                    .collect()
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_sheet() {
        let data = "date, type, title, amount\n2024-01-01, income, Capital, 5000\n2024-01-02, expense, Rent, 800";
        let reader = SheetReader::new(data.as_bytes());
        let results: Vec<Result<Record>> = reader.records().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.get("title").map(String::as_str), Some("Capital"));
        assert_eq!(first.get("amount").map(String::as_str), Some("5000"));
    }

    #[test]
    fn test_reader_short_row() {
        let data = "product_id,name,sold_date\nA1,Polo";
        let reader = SheetReader::new(data.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 2);
        assert!(!record.contains_key("sold_date"));
    }

    #[test]
    fn test_reader_headers_without_rows() {
        let reader = SheetReader::new("date,type,title,amount\n".as_bytes());
        assert_eq!(
            reader.headers().unwrap(),
            vec!["date", "type", "title", "amount"]
        );
        assert!(SheetReader::new("".as_bytes()).headers().unwrap().is_empty());
    }

    #[test]
    fn test_reader_empty_source() {
        let reader = SheetReader::new("".as_bytes());
        assert_eq!(reader.records().count(), 0);
    }
}
