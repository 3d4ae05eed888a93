//! Assembly relationships between sequence regions in core-style databases.
//!
//! Each row in table `assembly` states that an interval of an assembled sequence region
//! (e.g. a chromosome) consists of an interval of a component sequence region (e.g. a contig).
//! The intervals have equal lengths, and the component may be in reverse orientation.

use crate::{BaseAdaptor, DatabaseAdaptor, EnsemblError, Result, SelectStatement};

use std::ops::RangeInclusive;
use std::rc::Rc;

use rusqlite::Row;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// A mapping between an assembled and a component sequence region.
///
/// Coordinates are 1-based and inclusive.
///
/// # Examples
///
/// ```
/// use ensembl_base::Assembly;
///
/// // Contig 2 is stored in reverse orientation at chromosome positions 101 to 200.
/// let assembly = Assembly::new(1, 101, 200, 2, 1, 100, -1).unwrap();
/// assert_eq!(assembly.assembled_length(), 100);
/// assert_eq!(assembly.map_assembled_to_component(101), Some(100));
/// assert_eq!(assembly.map_component_to_assembled(100), Some(101));
/// assert_eq!(assembly.map_assembled_to_component(201), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    assembled_identifier: u32,
    assembled_start: u32,
    assembled_end: u32,
    component_identifier: u32,
    component_start: u32,
    component_end: u32,
    orientation: i8,
}

impl Assembly {
    /// Creates a new assembly relationship.
    ///
    /// # Errors
    ///
    /// Returns an error if an interval is empty, the intervals have different lengths, or the orientation is not `1` or `-1`.
    pub fn new(
        assembled_identifier: u32, assembled_start: u32, assembled_end: u32,
        component_identifier: u32, component_start: u32, component_end: u32,
        orientation: i8
    ) -> Result<Self> {
        if assembled_start > assembled_end || component_start > component_end {
            return Err(EnsemblError::InvalidInput(format!(
                "Empty assembly interval {}..={} or {}..={}",
                assembled_start, assembled_end, component_start, component_end
            )));
        }
        if assembled_end - assembled_start != component_end - component_start {
            return Err(EnsemblError::InvalidInput(format!(
                "Assembled length {} differs from component length {}",
                assembled_end - assembled_start + 1, component_end - component_start + 1
            )));
        }
        if orientation != 1 && orientation != -1 {
            return Err(EnsemblError::InvalidInput(format!("Invalid orientation {}", orientation)));
        }
        Ok(Assembly {
            assembled_identifier, assembled_start, assembled_end,
            component_identifier, component_start, component_end,
            orientation,
        })
    }

    /// Returns the identifier of the assembled sequence region.
    pub fn assembled_identifier(&self) -> u32 {
        self.assembled_identifier
    }

    pub fn assembled_start(&self) -> u32 {
        self.assembled_start
    }

    pub fn assembled_end(&self) -> u32 {
        self.assembled_end
    }

    /// Returns the identifier of the component sequence region.
    pub fn component_identifier(&self) -> u32 {
        self.component_identifier
    }

    pub fn component_start(&self) -> u32 {
        self.component_start
    }

    pub fn component_end(&self) -> u32 {
        self.component_end
    }

    /// Returns the orientation of the component relative to the assembled region.
    pub fn orientation(&self) -> i8 {
        self.orientation
    }

    pub fn assembled_length(&self) -> u32 {
        self.assembled_end - self.assembled_start + 1
    }

    pub fn component_length(&self) -> u32 {
        self.component_end - self.component_start + 1
    }

    /// Returns `true` if the assembled interval overlaps with the given interval.
    pub fn overlaps_assembled(&self, start: u32, end: u32) -> bool {
        self.assembled_start <= end && start <= self.assembled_end
    }

    /// Maps an assembled position to the component, or returns [`None`] if the position is not covered.
    pub fn map_assembled_to_component(&self, position: u32) -> Option<u32> {
        if position < self.assembled_start || position > self.assembled_end {
            return None;
        }
        let offset = position - self.assembled_start;
        if self.orientation >= 0 {
            Some(self.component_start + offset)
        } else {
            Some(self.component_end - offset)
        }
    }

    /// Maps a component position to the assembled region, or returns [`None`] if the position is not covered.
    pub fn map_component_to_assembled(&self, position: u32) -> Option<u32> {
        if position < self.component_start || position > self.component_end {
            return None;
        }
        if self.orientation >= 0 {
            Some(self.assembled_start + (position - self.component_start))
        } else {
            Some(self.assembled_start + (self.component_end - position))
        }
    }
}

//-----------------------------------------------------------------------------

/// Adaptor for table `assembly`.
///
/// The table has no primary key, so the identifier-based operations of [`BaseAdaptor`] return errors.
#[derive(Debug)]
pub struct AssemblyAdaptor {
    database_adaptor: Rc<DatabaseAdaptor>,
}

impl AssemblyAdaptor {
    /// Creates a new adaptor for the database.
    pub fn new(database_adaptor: Rc<DatabaseAdaptor>) -> Self {
        AssemblyAdaptor { database_adaptor }
    }

    /// Returns the relationships with the given assembled sequence region.
    ///
    /// If an interval is given, only relationships overlapping with it are returned.
    /// The relationships are sorted by assembled start.
    pub fn fetch_all_by_assembled(&self, seq_region_id: u32, interval: Option<RangeInclusive<u32>>) -> Result<Vec<Assembly>> {
        match interval {
            Some(interval) => self.fetch_all_by_constraint(
                Some("assembly.asm_seq_region_id = ?1 AND assembly.asm_start <= ?3 AND assembly.asm_end >= ?2"),
                (seq_region_id, *interval.start(), *interval.end())
            ),
            None => self.fetch_all_by_constraint(Some("assembly.asm_seq_region_id = ?1"), (seq_region_id,)),
        }
    }

    /// Returns the relationships with the given component sequence region.
    pub fn fetch_all_by_component(&self, seq_region_id: u32) -> Result<Vec<Assembly>> {
        self.fetch_all_by_constraint(Some("assembly.cmp_seq_region_id = ?1"), (seq_region_id,))
    }

    /// Returns the relationships with the assembled sequence region of the given name in the given coordinate system.
    ///
    /// If no coordinate system version is given, any version matches.
    /// The coordinate system must belong to the species of the database adaptor.
    pub fn fetch_all_by_assembled_name(&self, coord_system: &str, version: Option<&str>, seq_region_name: &str) -> Result<Vec<Assembly>> {
        let constraint = "assembly.asm_seq_region_id IN (
            SELECT seq_region.seq_region_id FROM seq_region, coord_system
            WHERE seq_region.coord_system_id = coord_system.coord_system_id
            AND coord_system.species_id = ?1 AND coord_system.name = ?2
            AND (?3 IS NULL OR coord_system.version = ?3)
            AND seq_region.name = ?4)";
        let species_id = self.database_adaptor.species_identifier();
        self.fetch_all_by_constraint(Some(constraint), (species_id, coord_system, version, seq_region_name))
    }
}

impl BaseAdaptor for AssemblyAdaptor {
    type Object = Assembly;

    const STATEMENT: SelectStatement = SelectStatement {
        tables: &["assembly"],
        columns: &[
            "assembly.asm_seq_region_id", "assembly.asm_start", "assembly.asm_end",
            "assembly.cmp_seq_region_id", "assembly.cmp_start", "assembly.cmp_end",
            "assembly.ori",
        ],
        left_join: &[],
        default_condition: None,
        final_condition: Some("ORDER BY assembly.asm_seq_region_id, assembly.asm_start"),
    };

    const PRIMARY_KEY: Option<&'static str> = None;

    fn database_adaptor(&self) -> &DatabaseAdaptor {
        &self.database_adaptor
    }

    fn row_to_object(&self, row: &Row) -> rusqlite::Result<Assembly> {
        Ok(Assembly {
            assembled_identifier: row.get(0)?,
            assembled_start: row.get(1)?,
            assembled_end: row.get(2)?,
            component_identifier: row.get(3)?,
            component_start: row.get(4)?,
            component_end: row.get(5)?,
            orientation: row.get(6)?,
        })
    }
}

//-----------------------------------------------------------------------------
