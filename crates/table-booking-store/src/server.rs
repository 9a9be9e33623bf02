//! Request handler serializing access to the store

use parking_lot::Mutex;
use table_booking_core::{
    CancellationResponse, ReservationForm, ReservationResponse, Request, RequestHandler,
    RequestKind, Table, TableId,
};
use tracing::{debug, info};

use crate::{StoreError, TableStore};

/// Successful outcome of a request
#[derive(Debug)]
enum Reply {
    Tables(Vec<Table>),
    Table(Table),
    Reserved(ReservationResponse),
    Cancelled(CancellationResponse),
}

impl Reply {
    fn send(self, rq: Request) {
        match self {
            Reply::Tables(tables) => rq.respond_with_json(200, &tables),
            Reply::Table(table) => rq.respond_with_json(200, &table),
            Reply::Reserved(body) => rq.respond_with_json(200, &body),
            Reply::Cancelled(body) => rq.respond_with_json(200, &body),
        }
    }
}

/// A request handler processing requests one at a time
///
/// The store stays locked for the whole check-then-mutate sequence of an
/// operation. Reading the request body and sending the response happen
/// outside the lock.
pub struct Server(Mutex<TableStore>);

impl RequestHandler for Server {
    fn handle(&self, mut rq: Request) {
        let kind = *rq.kind();
        debug!(method = ?rq.method(), url = rq.url(), ?kind, "handling request");

        let form = match kind {
            RequestKind::Reserve(_) => rq.read_form(),
            _ => ReservationForm::default(),
        };

        match self.process(kind, form) {
            Ok(reply) => reply.send(rq),
            Err(err) => {
                debug!(?kind, %err, "request rejected");
                rq.respond_with_message(err.status_code(), err.to_string());
            }
        }
    }

    fn shutdown(self) {
        // nothing to do
    }
}

impl Server {
    /// Create a handler serving `store`
    pub fn new(store: TableStore) -> Self {
        Self(Mutex::new(store))
    }

    /// Get a copy of all tables
    pub fn snapshot(&self) -> Vec<Table> {
        self.0.lock().list_all().to_vec()
    }

    fn process(&self, kind: RequestKind, form: ReservationForm) -> Result<Reply, StoreError> {
        let mut store = self.0.lock();

        match kind {
            RequestKind::ListTables => Ok(Reply::Tables(store.list_all().to_vec())),
            RequestKind::GetTable(id) => Ok(Reply::Table(store.get(table_id(id)?)?.clone())),
            RequestKind::Reserve(id) => {
                let id = table_id(id)?;
                let table = store.reserve(id, form)?.clone();
                info!(table = id, customer = %table.customer_name, "table reserved");

                let message = format!(
                    "✅ Table {id} successfully reserved by {} on {} at {}.",
                    table.customer_name, table.date, table.time
                );
                Ok(Reply::Reserved(ReservationResponse { message, table }))
            }
            RequestKind::Cancel(id) => {
                let cancellation = store.cancel(table_id(id)?)?;
                info!(
                    table = cancellation.table_id,
                    customer = %cancellation.cancelled_by,
                    "reservation cancelled"
                );

                let message = format!(
                    "❌ Reservation for Table {} by {} has been cancelled.",
                    cancellation.table_id, cancellation.cancelled_by
                );
                Ok(Reply::Cancelled(CancellationResponse {
                    message,
                    tables: cancellation.tables,
                }))
            }
            RequestKind::Filter(status) => Ok(Reply::Tables(store.filter(status))),
        }
    }
}

/// An unparsable ID names no table
#[inline]
fn table_id(id: Option<TableId>) -> Result<TableId, StoreError> {
    id.ok_or(StoreError::NotFound)
}
