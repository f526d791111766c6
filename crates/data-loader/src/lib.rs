//! # Data Loader Crate
//!
//! This crate loads the movie metadata table the recommender is built from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, MetadataField, Catalog)
//! - **parser**: Parse the movies CSV into Rust structs
//! - **index**: Validate rows and build the catalog lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"))?;
//!
//! let avatar = catalog.find_by_title("Avatar").unwrap();
//! println!("{} is movie #{}", avatar.title, avatar.index);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieIndex,
    // Core types
    Catalog,
    MovieRecord,
    // Enums
    MetadataField,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_records(Vec::new()).unwrap();

        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
        assert_eq!(catalog.titles().count(), 0);
    }

    #[test]
    fn test_record_fields() {
        let movie = MovieRecord::new(0, "Avatar")
            .with_field(MetadataField::Genres, "Action Adventure")
            .with_field(MetadataField::Director, "James Cameron");

        assert_eq!(movie.field(MetadataField::Genres), Some("Action Adventure"));
        assert_eq!(movie.field(MetadataField::Director), Some("James Cameron"));
        assert_eq!(movie.field(MetadataField::Tagline), None);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::from_records(vec![MovieRecord::new(0, "Avatar")]).unwrap();

        // Querying non-existent data should return None or empty slices
        assert!(catalog.get(999).is_none());
        assert!(catalog.find_by_title("Titanic").is_none());
        assert!(catalog.indices_with_title("Titanic").is_empty());
    }

    #[test]
    fn test_load_from_reader() {
        let csv = "\
index,title,genres,keywords,tagline,cast,director
0,Avatar,Action,,,,James Cameron
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.get(0).unwrap().director.as_deref(), Some("James Cameron"));
        assert_eq!(MetadataField::Cast.column_name(), "cast");
    }
}
