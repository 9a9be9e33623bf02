use eyre::Result;
use table_booking_core::Table;
use table_booking_store::TableStore;

mod api;
pub use api::{Api, ApiError, ApiResponse, RawResponse};

pub struct TestCtxBuilder {
    /// Number of tables in the store
    pub tables: u32,
    /// Count of worker threads feeding the request handler
    pub worker_threads: u16,
}

impl TestCtxBuilder {
    /// Create a new test context builder with the restaurant's defaults
    pub fn new() -> Self {
        TestCtxBuilder {
            tables: table_booking_core::NUM_TABLES,
            worker_threads: 2,
        }
    }

    /// Set the number of tables
    pub fn with_tables(mut self, tables: u32) -> Self {
        self.tables = tables;
        self
    }

    /// Set the number of worker threads to use
    pub fn with_worker_threads(mut self, threads: u16) -> Self {
        assert_ne!(threads, 0);
        self.worker_threads = threads;
        self
    }

    /// Build the test context
    pub async fn build(self) -> Result<TestCtx> {
        let store = TableStore::with_tables(self.tables);
        let (server, api) = api::mock::start(self.worker_threads, store).await?;

        Ok(TestCtx {
            api,
            server,
            tables: self.tables,
            worker_threads: self.worker_threads,
            drop_bomb: DropBomb,
        })
    }
}

impl Default for TestCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Test context
pub struct TestCtx {
    /// API allowing to interact with the reservation system
    pub api: Api,
    server: api::mock::MockServer,
    /// Number of tables
    pub tables: u32,
    /// Number of worker threads
    pub worker_threads: u16,

    drop_bomb: DropBomb,
}

impl TestCtx {
    /// Inspect the tables without going through the API
    pub fn snapshot(&self) -> Vec<Table> {
        self.server.snapshot()
    }

    /// Shut the reservation system down and finish the test
    pub async fn finish(self) {
        std::mem::forget(self.drop_bomb);
        drop(self.api);
        self.server.shutdown().await
    }
}

struct DropBomb;

impl Drop for DropBomb {
    fn drop(&mut self) {
        eprintln!("@TestAuthor: You should call `ctx.finish().await` to shut the reservation system down");
    }
}
