//! # Resolver Crate
//!
//! Maps a free-text, possibly misspelled movie name to a catalog title.
//!
//! ## Components
//!
//! ### SequenceMatcher
//! Ratcliff/Obershelp similarity between two strings, with the usual cheap
//! upper bounds (`real_quick_ratio`, `quick_ratio`) for early rejection.
//!
//! ### TitleResolver
//! Scores a query against every distinct catalog title and returns the close
//! matches (ratio >= cutoff), best first. `resolve` returns the best one or
//! `ResolveError::TitleNotFound`; callers never see an empty list where a
//! title was expected.
//!
//! ## Example Usage
//!
//! ```ignore
//! use resolver::TitleResolver;
//! use std::sync::Arc;
//!
//! let resolver = TitleResolver::new(Arc::new(catalog)).with_cutoff(0.6)?;
//!
//! match resolver.resolve("avatr") {
//!     Ok(found) => println!("Did you mean {}?", found.title),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod error;
pub mod sequence;
pub mod resolver;

// Re-export commonly used types
pub use error::{ResolveError, Result};
pub use sequence::{MatchingBlock, SequenceMatcher};
pub use resolver::{TitleMatch, TitleResolver, DEFAULT_CUTOFF, DEFAULT_MAX_CANDIDATES};
