//! Year-dependent astronomical corrections.
//!
//! Node factors and equilibrium arguments are tabulated once per calendar
//! year. A table row holds one [`NodeCorrection`] per constituent, in the
//! catalog's constituent order.

use serde::{Deserialize, Serialize};

use crate::types::{ConstituentIndex, YearIndex};

/// Corrections for one constituent in one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeCorrection {
    /// Multiplicative amplitude correction (near 1.0)
    pub node_factor: f64,
    /// Additive phase correction in degrees
    pub equilibrium_argument: f64,
}

impl NodeCorrection {
    /// Create a correction entry.
    pub fn new(node_factor: f64, equilibrium_argument: f64) -> Self {
        Self {
            node_factor,
            equilibrium_argument,
        }
    }

    /// Unit node factor and zero equilibrium argument.
    pub const IDENTITY: Self = Self {
        node_factor: 1.0,
        equilibrium_argument: 0.0,
    };
}

/// Node factors and equilibrium arguments for consecutive years.
///
/// Row `k` holds the corrections for year `start_year + k`. The table is not
/// checked on construction; [`HarmonicCatalogBuilder::build`] validates its
/// shape against the catalog's constituents.
///
/// [`HarmonicCatalogBuilder::build`]: super::HarmonicCatalogBuilder::build
#[derive(Clone, Debug, PartialEq)]
pub struct YearCorrectionTable {
    start_year: i32,
    rows: Vec<Vec<NodeCorrection>>,
}

impl YearCorrectionTable {
    /// Create a table whose first row is `start_year`.
    pub fn new(start_year: i32, rows: Vec<Vec<NodeCorrection>>) -> Self {
        Self { start_year, rows }
    }

    /// Table with identity corrections for `n_constituents` over `n_years`.
    ///
    /// Useful when constants are already referenced to the epoch of use.
    pub fn identity(start_year: i32, n_years: usize, n_constituents: usize) -> Self {
        Self::new(
            start_year,
            vec![vec![NodeCorrection::IDENTITY; n_constituents]; n_years],
        )
    }

    /// First covered year.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last covered year, or `None` for an empty table.
    pub fn end_year(&self) -> Option<i32> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.start_year + self.rows.len() as i32 - 1)
        }
    }

    /// Number of covered years.
    pub fn n_years(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table covers no years.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `year`, or `None` if the year is not covered.
    pub fn row_index(&self, year: i32) -> Option<YearIndex> {
        let offset = i64::from(year) - i64::from(self.start_year);
        if offset < 0 || offset >= self.rows.len() as i64 {
            return None;
        }
        Some(YearIndex::new(offset as usize))
    }

    /// Corrections of one row, in constituent order.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds; obtain rows from [`Self::row_index`].
    pub fn row(&self, row: YearIndex) -> &[NodeCorrection] {
        &self.rows[row]
    }

    /// Correction for one constituent in one row.
    pub fn get(&self, row: YearIndex, constituent: ConstituentIndex) -> Option<&NodeCorrection> {
        self.rows.get(row.get())?.get(constituent.get())
    }

    /// Iterate over `(year, row)` pairs.
    pub fn years(&self) -> impl Iterator<Item = (i32, &[NodeCorrection])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(move |(k, row)| (self.start_year + k as i32, row.as_slice()))
    }
}
