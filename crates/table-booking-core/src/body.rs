//! JSON response bodies

use serde::{Deserialize, Serialize};

use crate::Table;

/// Body consisting of a human-readable message only, used for errors
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    /// The message
    pub message: String,
}

impl MessageResponse {
    /// Create a new [`MessageResponse`]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Answer to a successful reservation
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ReservationResponse {
    /// Confirmation message
    pub message: String,
    /// The table after the reservation
    pub table: Table,
}

/// Answer to a successful cancellation
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CancellationResponse {
    /// Confirmation message
    pub message: String,
    /// All tables after the cancellation
    pub tables: Vec<Table>,
}
