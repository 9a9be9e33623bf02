//! 🏗 Infrastructure for handling requests, etc.
#![warn(missing_docs)]

mod body;
mod request;
mod table;

pub use body::{CancellationResponse, MessageResponse, ReservationResponse};
pub use request::{RawRequest, Request, RequestHandler, RequestKind, RequestMethod, RouteError};
pub use table::{ReservationForm, StatusFilter, Table, TableId};

/// Number of tables in the restaurant
pub const NUM_TABLES: u32 = 10;
