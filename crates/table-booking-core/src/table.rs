use serde::{Deserialize, Serialize};

/// Identifier of a table, starting at 1
pub type TableId = u32;

/// A reservable table
///
/// An available table always has empty `customer_name`, `date` and `time`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// The table's ID
    pub id: TableId,
    /// Whether the table is currently reserved
    pub is_reserved: bool,
    /// Name of the customer holding the reservation
    pub customer_name: String,
    /// Date of the reservation, as provided by the customer
    pub date: String,
    /// Time of the reservation, as provided by the customer
    pub time: String,
}

impl Table {
    /// Create a new, available [`Table`]
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            is_reserved: false,
            customer_name: String::new(),
            date: String::new(),
            time: String::new(),
        }
    }
}

/// Payload of a reservation request
///
/// Every field may be missing. The store rejects a form unless all three are
/// present and non-empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    /// Name of the customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Date of the reservation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Time of the reservation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl ReservationForm {
    /// Create a form with all fields set
    pub fn new(
        customer_name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: Some(customer_name.into()),
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    /// Parse a JSON request body
    ///
    /// A body that is empty or not a JSON object of the expected shape yields
    /// a form with every field missing.
    pub fn from_json(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Get `(customer_name, date, time)` if all of them are present and
    /// non-empty
    pub fn into_fields(self) -> Option<(String, String, String)> {
        let filled = |field: Option<String>| field.filter(|s| !s.is_empty());
        Some((
            filled(self.customer_name)?,
            filled(self.date)?,
            filled(self.time)?,
        ))
    }
}

/// Which tables a filter request asks for
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum StatusFilter {
    /// Every table
    #[default]
    All,
    /// Only reserved tables
    Reserved,
    /// Only available tables
    Available,
}

impl StatusFilter {
    /// Interpret the `status` query parameter
    ///
    /// Unknown values select all tables.
    pub fn from_query(status: Option<&str>) -> Self {
        match status {
            Some("reserved") => Self::Reserved,
            Some("available") => Self::Available,
            _ => Self::All,
        }
    }

    /// Check whether `table` passes the filter
    #[inline]
    pub fn matches(self, table: &Table) -> bool {
        match self {
            Self::All => true,
            Self::Reserved => table.is_reserved,
            Self::Available => !table.is_reserved,
        }
    }
}
