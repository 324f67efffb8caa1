//! Filesystem adapters: path sandbox, input record source, report sink.

pub mod csv_sink;
pub mod csv_source;
pub mod sandbox;

pub use csv_sink::CsvReportSink;
pub use csv_source::CsvRecordSource;
pub use sandbox::PathSandbox;
