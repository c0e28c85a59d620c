pub mod report_writer;
pub mod sheet_reader;
pub mod sheet_writer;
