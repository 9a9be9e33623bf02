use std::sync::Arc;

use eyre::Result;
use flume::Sender;
use serde::de::DeserializeOwned;
use table_booking_core::{
    CancellationResponse, MessageResponse, RequestMethod, ReservationForm, ReservationResponse,
    Table, TableId,
};
use thiserror::Error;
use tokio::sync::oneshot;

pub mod mock;

#[derive(Debug, Error)]
#[error("Error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Status code and body exactly as sent by the handler
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    fn into_api_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        let result = if self.status == 200 {
            Ok(serde_json::from_str(&self.body)?)
        } else {
            let MessageResponse { message } = serde_json::from_str(&self.body)?;
            Err(ApiError {
                status: self.status,
                message,
            })
        };
        Ok(ApiResponse {
            status: self.status,
            result,
        })
    }
}

struct RequestMsg {
    method: RequestMethod,
    url: String,
    body: Option<String>,
    response_channel: oneshot::Sender<RawResponse>,
}

pub struct Api {
    /// One channel per worker thread
    channels: Arc<Vec<Sender<RequestMsg>>>,

    my_channel: Sender<RequestMsg>,
    my_index: usize,
}

impl Api {
    fn new(channels: Vec<Sender<RequestMsg>>) -> Self {
        let my_channel = channels[0].clone();
        Self {
            channels: Arc::new(channels),
            my_channel,
            my_index: 0,
        }
    }
}

impl Clone for Api {
    fn clone(&self) -> Self {
        let my_index = (self.my_index + 1) % self.channels.len();
        Self {
            channels: self.channels.clone(),
            my_channel: self.channels[my_index].clone(),
            my_index,
        }
    }
}

impl Api {
    /// Send an arbitrary request and get the untouched response
    pub async fn request(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<RawResponse> {
        let (sender, receiver) = oneshot::channel();
        let msg = RequestMsg {
            method,
            url: url.to_owned(),
            body,
            response_channel: sender,
        };
        self.my_channel.send_async(msg).await?;
        Ok(receiver.await?)
    }

    pub async fn list_tables(&self) -> Result<ApiResponse<Vec<Table>>> {
        let response = self.request(RequestMethod::Get, "/tables", None);
        response.await?.into_api_response()
    }

    pub async fn get_table(&self, id: TableId) -> Result<ApiResponse<Table>> {
        let url = format!("/tables/{id}");
        let response = self.request(RequestMethod::Get, &url, None);
        response.await?.into_api_response()
    }

    pub async fn reserve(
        &self,
        id: TableId,
        form: &ReservationForm,
    ) -> Result<ApiResponse<ReservationResponse>> {
        let url = format!("/reserve/{id}");
        let body = serde_json::to_string(form)?;
        let response = self.request(RequestMethod::Post, &url, Some(body));
        response.await?.into_api_response()
    }

    pub async fn cancel(&self, id: TableId) -> Result<ApiResponse<CancellationResponse>> {
        let url = format!("/cancel/{id}");
        let response = self.request(RequestMethod::Post, &url, None);
        response.await?.into_api_response()
    }

    pub async fn filter(&self, status: Option<&str>) -> Result<ApiResponse<Vec<Table>>> {
        let url = match status {
            Some(status) => format!("/filter?status={status}"),
            None => String::from("/filter"),
        };
        let response = self.request(RequestMethod::Get, &url, None);
        response.await?.into_api_response()
    }
}

pub struct ApiResponse<T> {
    pub status: u16,
    pub result: ApiResult<T>,
}

impl<T> ApiResponse<T> {
    /// Get the error message of a failed request, panicking on success
    pub fn expect_err(self, status: u16) -> String {
        assert_eq!(self.status, status, "unexpected status code");
        match self.result {
            Ok(_) => panic!("request with status {status} must not succeed"),
            Err(err) => err.message,
        }
    }
}
