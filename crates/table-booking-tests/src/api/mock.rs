//! Mock API implementation directly using the `table-booking-store` crate

use std::sync::Arc;

use eyre::Result;
use table_booking_core::{RawRequest, Request, RequestHandler, RequestKind, RequestMethod, Table};
use table_booking_store::{Server, TableStore};
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};

use super::{Api, RawResponse, RequestMsg};

pub struct MockServer {
    server: Arc<Server>,
    join_handles: Vec<JoinHandle<()>>,
}

struct MockRawRequest {
    url: String,
    method: RequestMethod,
    body: Option<String>,
    response_channel: oneshot::Sender<RawResponse>,
}

pub async fn start(threads: u16, store: TableStore) -> Result<(MockServer, Api)> {
    let server = Arc::new(task::spawn_blocking(move || Server::new(store)).await?);

    let it = (0..threads).map(|_| {
        let (sender, receiver) = flume::bounded::<RequestMsg>(65536);
        let server = server.clone();
        let handle = task::spawn_blocking(move || {
            let server = &*server;
            for msg in receiver.into_iter() {
                let raw = Box::new(MockRawRequest {
                    url: msg.url,
                    method: msg.method,
                    body: msg.body,
                    response_channel: msg.response_channel,
                });
                match RequestKind::from_route(raw.method, &raw.url) {
                    Ok(kind) => server.handle(Request::from_raw(kind, raw)),
                    Err(err) => raw.respond_with_json(err.status_code(), err.to_json()),
                }
            }
        });
        (sender, handle)
    });
    let (senders, join_handles) = it.unzip();

    let mock_server = MockServer {
        server,
        join_handles,
    };
    Ok((mock_server, Api::new(senders)))
}

impl MockServer {
    pub fn snapshot(&self) -> Vec<Table> {
        self.server.snapshot()
    }

    pub async fn shutdown(self) {
        for handle in self.join_handles {
            handle.await.unwrap()
        }
        task::spawn_blocking(move || Arc::into_inner(self.server).unwrap().shutdown())
            .await
            .unwrap();
    }
}

impl RawRequest for MockRawRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> RequestMethod {
        self.method
    }

    fn read_string(&mut self) -> std::io::Result<String> {
        Ok(self.body.take().unwrap_or_default())
    }

    fn respond_with_json(self: Box<Self>, status: u16, body: String) {
        let response = RawResponse { status, body };
        // The test may have given up on the answer already
        let _ = self.response_channel.send(response);
    }
}
