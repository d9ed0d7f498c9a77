/**
 * The in-memory record set and the operations on it.
 *
 * Every mutation is staged on a copy of the record list, persisted, and
 * only swapped into the visible state once the save succeeded. A failed
 * save therefore leaves both the file and the in-memory state untouched.
 */
use chrono::{Datelike, Utc};
use tracing::debug;

use crate::record::Record;
use crate::storage::{self, Storage};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("amount cannot be zero")]
    ZeroAmount,
    #[error("record {0} not found")]
    NotFound(u64),
    #[error("month {0} is out of range (1-12)")]
    MonthOutOfRange(u32),
    #[error("Storage error: `{0}`.")]
    Storage(#[from] storage::Error),
}

pub struct Tracker<S> {
    storage: S,
    records: Vec<Record>,
}

impl<S: Storage> Tracker<S> {
    pub fn new(storage: S) -> Result<Tracker<S>, Error> {
        let records = storage.read_all()?;
        Ok(Tracker { storage, records })
    }

    /// Appends a new record with the next free id and persists the set.
    pub fn add(&mut self, description: &str, amount: u64) -> Result<Record, Error> {
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let record = Record {
            id: self.next_id(),
            created_at: Utc::now(),
            amount,
            description: description.to_string(),
        };
        let mut staged = self.records.clone();
        staged.push(record.clone());

        self.storage.save(&staged)?;
        self.records = staged;
        debug!("added record {}", record.id);
        Ok(record)
    }

    /// Replaces the description and/or amount of an existing record. `None`,
    /// an empty description or a zero amount leave the field as it is.
    pub fn update(
        &mut self,
        id: u64,
        description: Option<&str>,
        amount: Option<u64>,
    ) -> Result<Record, Error> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(Error::NotFound(id))?;

        let mut staged = self.records.clone();
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            staged[index].description = description.to_string();
        }
        if let Some(amount) = amount.filter(|&a| a != 0) {
            staged[index].amount = amount;
        }
        let updated = staged[index].clone();

        self.storage.save(&staged)?;
        self.records = staged;
        debug!("updated record {}", id);
        Ok(updated)
    }

    /// Removes the record with the given id. A missing id is not an error.
    pub fn delete(&mut self, id: u64) -> Result<(), Error> {
        let mut staged = self.records.clone();
        staged.retain(|record| record.id != id);

        self.storage.save(&staged)?;
        self.records = staged;
        debug!("deleted record {}", id);
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn summary(&self) -> u64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    pub fn summary_for_month(&self, month: u32, year: i32) -> Result<u64, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::MonthOutOfRange(month));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| {
                record.created_at.month() == month && record.created_at.year() == year
            })
            .map(|record| record.amount)
            .sum())
    }

    pub fn summary_for_year(&self, year: i32) -> u64 {
        self.records
            .iter()
            .filter(|record| record.created_at.year() == year)
            .map(|record| record.amount)
            .sum()
    }

    // Ids grow monotonically; deleting a record never renumbers the rest.
    fn next_id(&self) -> u64 {
        self.records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(1, |id| id + 1)
    }
}
