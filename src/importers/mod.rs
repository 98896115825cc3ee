pub mod date;
pub mod importer;
pub mod monzo_csv;
pub mod row;
