//! Catalog persistence.
//!
//! # Example
//!
//! ```ignore
//! use tide_rs::io::read_catalog_file;
//!
//! let catalog = read_catalog_file("data/puget_sound.json")?;
//! println!("{} stations", catalog.len());
//! ```

mod catalog_reader;

pub use catalog_reader::{
    CatalogDocument, CatalogFileError, ConstantDocument, ConstituentDocument,
    CorrectionTableDocument, StationDocument, parse_catalog, read_catalog_file,
    write_catalog_file,
};
