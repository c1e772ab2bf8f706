//! Station resolution by name query.
//!
//! A query matches every station whose name contains it (case-sensitive).
//! Resolution is a pure function: an ambiguous query fails with the full
//! candidate list, and interactive disambiguation is plugged in through
//! [`StationChooser`].
//!
//! # Example
//!
//! ```ignore
//! use tide_rs::resolve::{resolve, ResolveError};
//!
//! match resolve(&catalog, "Seattle") {
//!     Ok(station) => println!("datum {}", station.datum),
//!     Err(ResolveError::AmbiguousStation { candidates, .. }) => {
//!         for (i, name) in candidates.iter().enumerate() {
//!             println!("{}: {}", i + 1, name);
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use thiserror::Error;
use tracing::warn;

use crate::catalog::{HarmonicCatalog, StationHarmonics};

/// Error type for station resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No station name contains the query
    #[error("no station matches {0:?}")]
    StationNotFound(String),

    /// Several station names contain the query
    #[error(
        "{query:?} matches {} stations: {}",
        .candidates.len(),
        .candidates.join(", ")
    )]
    AmbiguousStation {
        query: String,
        candidates: Vec<String>,
    },

    /// A 1-based choice outside the candidate list
    #[error("choice {choice} is not between 1 and {count}")]
    InvalidChoice { choice: usize, count: usize },
}

/// Picks one station among ambiguous candidates.
///
/// Implemented by interactive shells; library callers usually handle
/// [`ResolveError::AmbiguousStation`] directly instead.
pub trait StationChooser {
    /// Return a 1-based index into `candidates`, or `None` to give up.
    fn choose(&mut self, query: &str, candidates: &[&str]) -> Option<usize>;
}

/// Stations whose name contains `query`, in catalog order.
pub fn find_candidates<'a>(catalog: &'a HarmonicCatalog, query: &str) -> Vec<&'a StationHarmonics> {
    catalog
        .stations()
        .iter()
        .filter(|s| s.name.contains(query))
        .collect()
}

/// Resolve `query` to exactly one station.
///
/// # Errors
///
/// - [`ResolveError::StationNotFound`] if no name contains `query`
/// - [`ResolveError::AmbiguousStation`] if more than one does
pub fn resolve<'a>(
    catalog: &'a HarmonicCatalog,
    query: &str,
) -> Result<&'a StationHarmonics, ResolveError> {
    let mut candidates = find_candidates(catalog, query);
    match candidates.len() {
        0 => Err(ResolveError::StationNotFound(query.to_string())),
        1 => Ok(candidates.remove(0)),
        n => {
            warn!(query, matches = n, "ambiguous station query");
            Err(ResolveError::AmbiguousStation {
                query: query.to_string(),
                candidates: candidates.iter().map(|s| s.name.clone()).collect(),
            })
        }
    }
}

/// Pick a candidate by 1-based index.
pub fn choose<'a, T>(candidates: &'a [T], choice: usize) -> Result<&'a T, ResolveError> {
    if choice == 0 || choice > candidates.len() {
        return Err(ResolveError::InvalidChoice {
            choice,
            count: candidates.len(),
        });
    }
    Ok(&candidates[choice - 1])
}

/// Resolve `query`, asking `chooser` when it is ambiguous.
///
/// # Errors
///
/// [`ResolveError::StationNotFound`] as for [`resolve`];
/// [`ResolveError::AmbiguousStation`] if the chooser gives up;
/// [`ResolveError::InvalidChoice`] if it returns an out-of-range index.
pub fn resolve_with<'a>(
    catalog: &'a HarmonicCatalog,
    query: &str,
    chooser: &mut dyn StationChooser,
) -> Result<&'a StationHarmonics, ResolveError> {
    match resolve(catalog, query) {
        Err(ResolveError::AmbiguousStation { query, candidates }) => {
            let names: Vec<&str> = candidates.iter().map(String::as_str).collect();
            let Some(choice) = chooser.choose(&query, &names) else {
                return Err(ResolveError::AmbiguousStation { query, candidates });
            };
            let name = choose(&names, choice)?;
            catalog
                .stations()
                .iter()
                .find(|s| s.name == *name)
                .ok_or_else(|| ResolveError::StationNotFound(name.to_string()))
        }
        other => other,
    }
}
