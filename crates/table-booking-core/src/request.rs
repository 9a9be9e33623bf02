use std::borrow::Cow;
use std::io;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use thiserror::Error;

use crate::{MessageResponse, ReservationForm, StatusFilter, TableId};

/// Kind of the request, together with the arguments taken from the URL
///
/// Table IDs that cannot be parsed are kept as [`None`]; they match no table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RequestKind {
    /// `GET /tables`: list all tables
    ListTables,

    /// `GET /tables/:id`: get a single table
    GetTable(Option<TableId>),

    /// `POST /reserve/:id`: reserve a table
    ///
    /// The body is a JSON [`ReservationForm`].
    Reserve(Option<TableId>),

    /// `POST /cancel/:id`: cancel the reservation of a table
    Cancel(Option<TableId>),

    /// `GET /filter?status=reserved|available`: list tables by status
    Filter(StatusFilter),
}

/// Failure to map a URL onto a [`RequestKind`]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum RouteError {
    /// No route for this path
    #[error("no route for this path")]
    NotFound,
    /// The path exists, but not for this method
    #[error("method not allowed for this path")]
    MethodNotAllowed,
}

/// Answer for requests that match no route
const ROUTE_NOT_FOUND: &str = "🦀 could not find the service you are looking for!

Valid requests are:
  GET  /tables
  GET  /tables/:id
  POST /reserve/:id
  POST /cancel/:id
  GET  /filter?status=reserved|available";

impl RouteError {
    /// HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::NotFound => 404,
            RouteError::MethodNotAllowed => 405,
        }
    }

    /// Message sent to the client
    pub fn message(&self) -> &'static str {
        match self {
            RouteError::NotFound => ROUTE_NOT_FOUND,
            RouteError::MethodNotAllowed => "🦀 this service does not support the request method!",
        }
    }

    /// The `{"message": ...}` body sent to the client
    pub fn to_json(&self) -> String {
        serde_json::to_string(&MessageResponse::new(self.message())).unwrap_or_default()
    }
}

impl RequestKind {
    /// Determine the request kind from the method and the URL (path and
    /// optional query string)
    pub fn from_route(method: RequestMethod, url: &str) -> Result<Self, RouteError> {
        use RequestKind::*;
        use RequestMethod::*;

        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };
        let path = path.strip_prefix('/').ok_or(RouteError::NotFound)?;
        let path = path.strip_suffix('/').unwrap_or(path);

        let mut segments = path.split('/');
        let (kind, expected) = match (segments.next(), segments.next(), segments.next()) {
            (Some("tables"), None, _) => (ListTables, Get),
            (Some("tables"), Some(id), None) => (GetTable(parse_id(&decode(id))), Get),
            (Some("reserve"), Some(id), None) => (Reserve(parse_id(&decode(id))), Post),
            (Some("cancel"), Some(id), None) => (Cancel(parse_id(&decode(id))), Post),
            (Some("filter"), None, _) => {
                let status = query.and_then(|q| query_param(q, "status"));
                (Filter(StatusFilter::from_query(status.as_deref())), Get)
            }
            _ => return Err(RouteError::NotFound),
        };

        if method != expected {
            return Err(RouteError::MethodNotAllowed);
        }
        Ok(kind)
    }
}

/// Percent-decode a path segment or query component
///
/// Invalid UTF-8 is replaced rather than rejected.
fn decode(component: &str) -> Cow<'_, str> {
    percent_decode_str(component).decode_utf8_lossy()
}

/// Parse the leading decimal digits of a path segment
///
/// Leading whitespace and a `+` sign are skipped. `"3abc"` is table 3, while
/// `"abc"` is no table at all.
fn parse_id(segment: &str) -> Option<TableId> {
    let digits = segment.trim_start();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Look up the decoded value of `name` in a query string
///
/// A parameter given more than once has no single value and yields [`None`].
/// In query strings `+` stands for a space.
fn query_param(query: &str, name: &str) -> Option<String> {
    let mut values = query.split('&').filter_map(|pair| {
        let pair = pair.replace('+', " ");
        let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
        (decode(key) == name).then(|| decode(value).into_owned())
    });

    let value = values.next()?;
    match values.next() {
        Some(_) => None,
        None => Some(value),
    }
}

/// Request sent from a web browser
pub struct Request {
    kind: RequestKind,
    raw: Box<dyn RawRequest + Send>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("kind", &self.kind)
            .field("raw", &format_args!(".."))
            .finish()
    }
}

/// HTTP request method
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestMethod {
    /// GET request
    Get,
    /// POST request, may have a payload
    Post,
}

/// Interface for handling requests from a web browser
pub trait RequestHandler {
    /// Handle a request from a web browser
    ///
    /// This method may be called concurrently from different threads.
    fn handle(&self, request: Request);

    /// Shut the handler down
    fn shutdown(self);
}

/// A raw request, implemented by the HTTP server
pub trait RawRequest {
    /// Get the URL
    fn url(&self) -> &str;
    /// Get the request method
    fn method(&self) -> RequestMethod;

    /// Read the request body as string
    fn read_string(&mut self) -> io::Result<String>;

    /// Respond with the given status code and JSON body
    fn respond_with_json(self: Box<Self>, status: u16, body: String);
}

impl Request {
    /// Get the request's kind
    #[inline]
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    /// Get the request URL
    #[inline]
    pub fn url(&self) -> &str {
        self.raw.url()
    }

    /// Get the request method
    #[inline]
    pub fn method(&self) -> RequestMethod {
        self.raw.method()
    }

    /// Read the payload provided by the web browser as a UTF-8 string
    ///
    /// This method has side effects and should be called only once per
    /// request.
    #[inline]
    pub fn read_string(&mut self) -> io::Result<String> {
        self.raw.read_string()
    }

    /// Read the payload as a [`ReservationForm`]
    ///
    /// Communication errors and malformed payloads both result in a form with
    /// every field missing. Like [`Self::read_string()`], this method should
    /// be called only once per request.
    pub fn read_form(&mut self) -> ReservationForm {
        match self.read_string() {
            Ok(body) => ReservationForm::from_json(&body),
            Err(_) => ReservationForm::default(),
        }
    }

    /// Respond with `body` serialized as JSON
    ///
    /// This method blocks until the response has been sent.
    pub fn respond_with_json<T: Serialize>(self, status: u16, body: &T) {
        match serde_json::to_string(body) {
            Ok(json) => self.raw.respond_with_json(status, json),
            Err(err) => self.respond_with_message(500, err.to_string()),
        }
    }

    /// Respond with a `{"message": ...}` body
    ///
    /// This method blocks until the response has been sent.
    pub fn respond_with_message(self, status: u16, message: impl Into<String>) {
        self.respond_with_json(status, &MessageResponse::new(message))
    }

    /// Create a new request from a [`RawRequest`]
    #[inline]
    pub fn from_raw(kind: RequestKind, raw: Box<dyn RawRequest + Send>) -> Self {
        Self { kind, raw }
    }
}
