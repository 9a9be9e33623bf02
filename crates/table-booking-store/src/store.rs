//! Implementation of the table store

use table_booking_core::{ReservationForm, StatusFilter, Table, TableId, NUM_TABLES};

use crate::StoreError;

/// Outcome of a successful cancellation
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cancellation {
    /// The table that became available again
    pub table_id: TableId,
    /// Name of the customer whose reservation was cancelled
    pub cancelled_by: String,
    /// All tables after the cancellation
    pub tables: Vec<Table>,
}

/// Implementation of the store holding all tables
///
/// Every operation validates before it mutates, so a rejected operation
/// leaves the store untouched.
#[derive(Clone, Debug)]
pub struct TableStore {
    /// The tables, sorted by ascending ID
    tables: Vec<Table>,
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore {
    /// Create a new [`TableStore`] with the restaurant's tables.
    pub fn new() -> Self {
        Self::with_tables(NUM_TABLES)
    }

    /// Create a new [`TableStore`] with tables `1..=num_tables`.
    pub fn with_tables(num_tables: u32) -> Self {
        let tables = (1..=num_tables).map(Table::new).collect();
        Self { tables }
    }

    /// Get all tables.
    pub fn list_all(&self) -> &[Table] {
        &self.tables
    }

    /// Get the table with ID `id`.
    pub fn get(&self, id: TableId) -> Result<&Table, StoreError> {
        self.tables
            .iter()
            .find(|table| table.id == id)
            .ok_or(StoreError::NotFound)
    }

    fn get_mut(&mut self, id: TableId) -> Result<&mut Table, StoreError> {
        self.tables
            .iter_mut()
            .find(|table| table.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// Reserve table `id` for the customer described by `form`.
    ///
    /// An already reserved table is reported as such even if `form` is
    /// incomplete. The fields are stored verbatim.
    pub fn reserve(&mut self, id: TableId, form: ReservationForm) -> Result<&Table, StoreError> {
        let table = self.get_mut(id)?;
        if table.is_reserved {
            return Err(StoreError::AlreadyReserved(id));
        }
        let (customer_name, date, time) = form.into_fields().ok_or(StoreError::InvalidInput)?;

        table.is_reserved = true;
        table.customer_name = customer_name;
        table.date = date;
        table.time = time;
        Ok(table)
    }

    /// Cancel the reservation of table `id`.
    pub fn cancel(&mut self, id: TableId) -> Result<Cancellation, StoreError> {
        let table = self.get_mut(id)?;
        if !table.is_reserved {
            return Err(StoreError::NotReserved(id));
        }

        let cancelled_by = std::mem::take(&mut table.customer_name);
        table.is_reserved = false;
        table.date.clear();
        table.time.clear();

        Ok(Cancellation {
            table_id: id,
            cancelled_by,
            tables: self.tables.clone(),
        })
    }

    /// Get the tables passing `status`, in ascending ID order.
    pub fn filter(&self, status: StatusFilter) -> Vec<Table> {
        self.tables
            .iter()
            .filter(|table| status.matches(table))
            .cloned()
            .collect()
    }
}
