use crate::domain::ports::Record;
use crate::error::Result;
use std::collections::BTreeSet;
use std::io::Write;

/// Writes sheet rows as CSV. The header is the union of all record columns.
pub struct SheetWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SheetWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes only a header row, for a sheet with no rows.
    pub fn write_header<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        if columns.is_empty() {
            return Ok(());
        }
        self.writer
            .write_record(columns.iter().map(|c| c.as_ref()))?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_records(&mut self, records: &[Record]) -> Result<()> {
        let columns: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect();
        if columns.is_empty() {
            return Ok(());
        }

        self.writer.write_record(&columns)?;
        for record in records {
            self.writer.write_record(
                columns
                    .iter()
                    .map(|c| record.get(*c).map(String::as_str).unwrap_or("")),
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_fills_missing_cells() {
        let records = vec![
            Record::from([
                ("name".to_string(), "Polo".to_string()),
                ("product_id".to_string(), "A1".to_string()),
            ]),
            Record::from([("product_id".to_string(), "A2".to_string())]),
        ];
        let mut buffer = Vec::new();
        SheetWriter::new(&mut buffer).write_records(&records).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "name,product_id\nPolo,A1\n,A2\n");
    }

    #[test]
    fn test_writer_empty_sheet() {
        let mut buffer = Vec::new();
        SheetWriter::new(&mut buffer).write_records(&[]).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_writer_header_only() {
        let mut buffer = Vec::new();
        SheetWriter::new(&mut buffer)
            .write_header(&["date", "type", "title", "amount"])
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "date,type,title,amount\n");
    }
}
