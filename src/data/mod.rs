//! Data module - CSV loading and processing

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError, SourceTables};
pub use processor::{
    CategoryEncoding, DataProcessor, EncodedTable, ProcessorError, YearValue, COUNTRY_COL,
    GDP_COL, MISSING_CATEGORY_CODE, YEAR_COL,
};
