//! Table registry - best-fit allocation over capacity pools
//!
//! Tables are split into one FIFO pool per capacity class. A table is either
//! queued in its class's pool or occupied, never both.

use shared::models::{PatronId, TableStatus, TableView};
use std::collections::{BTreeMap, HashMap, VecDeque};

use super::error::SeatingError;

/// Seat counts a table may have
pub const TABLE_CAPACITIES: [u32; 4] = [2, 4, 6, 8];

/// One physical table from the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    pub number: u32,
    pub capacity: u32,
}

impl TableDefinition {
    pub fn new(number: u32, capacity: u32) -> Self {
        Self { number, capacity }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    number: u32,
    capacity: u32,
    occupied: bool,
    /// Back-reference only; the patron lives in its queue
    patron: Option<PatronId>,
}

impl Table {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn patron(&self) -> Option<PatronId> {
        self.patron
    }

    pub fn to_view(&self) -> TableView {
        TableView {
            number: self.number,
            capacity: self.capacity,
            occupied: self.occupied,
            patron_id: self.patron,
        }
    }
}

#[derive(Debug, Default)]
pub struct TableRegistry {
    /// Layout order
    tables: Vec<Table>,
    /// table number -> position in `tables`
    index: HashMap<u32, usize>,
    /// capacity -> free table numbers, oldest release first
    available: BTreeMap<u32, VecDeque<u32>>,
}

impl TableRegistry {
    pub fn new(definitions: impl IntoIterator<Item = TableDefinition>) -> Self {
        let mut registry = Self::default();
        registry.initialize(definitions);
        registry
    }

    /// Rebuild the roster; every table starts free in its capacity pool
    pub fn initialize(&mut self, definitions: impl IntoIterator<Item = TableDefinition>) {
        self.tables.clear();
        self.index.clear();
        self.available.clear();

        for def in definitions {
            if self.index.contains_key(&def.number) {
                tracing::warn!(table = def.number, "Duplicate table number in layout, skipped");
                continue;
            }
            self.index.insert(def.number, self.tables.len());
            self.tables.push(Table {
                number: def.number,
                capacity: def.capacity,
                occupied: false,
                patron: None,
            });
            self.available
                .entry(def.capacity)
                .or_default()
                .push_back(def.number);
        }
    }

    /// Front table of the smallest capacity class that fits the party and has a free table
    ///
    /// Pure query. A party larger than the largest class never finds a table.
    pub fn find_available(&self, party_size: u32) -> Option<u32> {
        self.available
            .range(party_size..)
            .find_map(|(_, pool)| pool.front().copied())
    }

    pub fn has_capacity_for(&self, party_size: u32) -> bool {
        self.find_available(party_size).is_some()
    }

    /// Capacity class `find_available` would pick
    pub fn next_available_capacity(&self, party_size: u32) -> Option<u32> {
        self.available
            .range(party_size..)
            .find(|(_, pool)| !pool.is_empty())
            .map(|(&capacity, _)| capacity)
    }

    /// Move a free table to occupied and record its patron
    pub fn assign(&mut self, number: u32, patron: PatronId) -> Result<(), SeatingError> {
        let idx = *self
            .index
            .get(&number)
            .ok_or(SeatingError::TableNotFound(number))?;
        let table = &mut self.tables[idx];
        if table.occupied {
            return Err(SeatingError::TableOccupied(number));
        }

        if let Some(pool) = self.available.get_mut(&table.capacity) {
            pool.retain(|&n| n != number);
        }
        table.occupied = true;
        table.patron = Some(patron);
        Ok(())
    }

    /// Clear occupancy and return the table to the back of its pool
    ///
    /// Returns `Ok(false)` when the table was already free.
    pub fn release(&mut self, number: u32) -> Result<bool, SeatingError> {
        let idx = *self
            .index
            .get(&number)
            .ok_or(SeatingError::TableNotFound(number))?;
        let table = &mut self.tables[idx];
        if !table.occupied {
            tracing::warn!(table = number, "Release of a free table ignored");
            return Ok(false);
        }

        table.occupied = false;
        table.patron = None;
        self.available
            .entry(table.capacity)
            .or_default()
            .push_back(number);
        Ok(true)
    }

    pub fn get(&self, number: u32) -> Option<&Table> {
        self.index.get(&number).map(|&idx| &self.tables[idx])
    }

    pub fn largest_capacity(&self) -> Option<u32> {
        self.tables.iter().map(|t| t.capacity).max()
    }

    /// Free tables per capacity class (classes with zero free tables included)
    pub fn available_counts(&self) -> BTreeMap<u32, usize> {
        self.available
            .iter()
            .map(|(&capacity, pool)| (capacity, pool.len()))
            .collect()
    }

    pub fn status(&self) -> TableStatus {
        let total = self.tables.len();
        let occupied = self.tables.iter().filter(|t| t.occupied).count();
        TableStatus {
            total_tables: total,
            occupied_tables: occupied,
            available_tables: total - occupied,
            available_by_capacity: self.available_counts(),
        }
    }

    pub fn snapshot(&self) -> Vec<TableView> {
        self.tables.iter().map(Table::to_view).collect()
    }

    /// Every table is in exactly one of {its pool, occupied}
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.tables.iter().all(|table| {
            let pooled = self
                .available
                .get(&table.capacity)
                .map(|pool| pool.iter().filter(|&&n| n == table.number).count())
                .unwrap_or(0);
            match table.occupied {
                true => pooled == 0 && table.patron.is_some(),
                false => pooled == 1 && table.patron.is_none(),
            }
        })
    }
}
