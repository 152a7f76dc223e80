pub mod csv_reader;
pub mod executor;

pub use csv_reader::{import_sales_csv, parse_sales_csv, read_sales_rows, CsvRows};
pub use executor::{normalize, normalize_row, parse_invoice_date, NormalizedSales, RowRejection};
