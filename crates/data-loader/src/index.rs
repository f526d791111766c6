//! Catalog building and validation.
//!
//! Turns parsed rows into a [`Catalog`]:
//! - checks that every record sits at the position its `index` claims
//! - builds the title lookup used for exact title resolution

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load the catalog from a movies CSV file.
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);

        let movies = parser::parse_movies(path)?;
        let catalog = Self::from_records(movies)?;

        info!(
            "Loaded {} movies ({} distinct titles)",
            catalog.len(),
            catalog.distinct_titles()
        );
        Ok(catalog)
    }

    /// Load the catalog from an in-memory or streamed CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let movies = parser::parse_movies_from_reader(reader, "<reader>")?;
        Self::from_records(movies)
    }

    /// Build a catalog from already-parsed records.
    ///
    /// Records must be in index order with `records[i].index == i`.
    pub fn from_records(records: Vec<MovieRecord>) -> Result<Self> {
        let mut catalog = Catalog {
            records,
            title_index: HashMap::new(),
        };
        catalog.validate()?;
        catalog.build_title_index();
        Ok(catalog)
    }

    /// Build the title -> indices lookup.
    ///
    /// Indices are pushed in catalog order, so each list is ascending and its
    /// first entry is the record exact title lookups resolve to.
    fn build_title_index(&mut self) {
        for record in &self.records {
            self.title_index
                .entry(record.title.clone())
                .or_default()
                .push(record.index);
        }

        let duplicated = self
            .title_index
            .values()
            .filter(|indices| indices.len() > 1)
            .count();
        if duplicated > 0 {
            debug!(
                "{} titles are shared by more than one movie; lookups use the lowest index",
                duplicated
            );
        }
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every record's index equals its position
    /// - no title is empty
    pub fn validate(&self) -> Result<()> {
        for (position, record) in self.records.iter().enumerate() {
            if record.index != position {
                return Err(DataLoadError::ValidationError(format!(
                    "record at position {} carries index {}",
                    position, record.index
                )));
            }
            if record.title.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "record {} has an empty title",
                    position
                )));
            }
        }
        Ok(())
    }
}
