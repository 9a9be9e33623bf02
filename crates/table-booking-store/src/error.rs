use table_booking_core::TableId;
use thiserror::Error;

/// Reasons for a rejected store operation
///
/// The `Display` output is the message sent to the client.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum StoreError {
    /// No table has the requested ID
    #[error("Table not found")]
    NotFound,

    /// The table is reserved already
    #[error("Table {0} is already reserved.")]
    AlreadyReserved(TableId),

    /// The reservation lacks the customer name, date or time
    #[error("Please provide customerName, date, and time.")]
    InvalidInput,

    /// The table has no reservation to cancel
    #[error("This table is not currently reserved.")]
    NotReserved(TableId),
}

impl StoreError {
    /// HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound => 404,
            StoreError::AlreadyReserved(_)
            | StoreError::InvalidInput
            | StoreError::NotReserved(_) => 400,
        }
    }
}
