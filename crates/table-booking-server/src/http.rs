//! 🏗 HTTP request implementation

use std::io;
use std::io::{Cursor, Read};

use table_booking_core::{RequestKind, RequestMethod, RouteError};
use tiny_http::{Header, Response};
use tracing::warn;

/// Largest accepted request body in bytes
const BODY_LIMIT: u64 = 100 * 1024;

struct HTTPRequest(tiny_http::Request);

impl table_booking_core::RawRequest for HTTPRequest {
    fn url(&self) -> &str {
        self.0.url()
    }

    fn method(&self) -> RequestMethod {
        match self.0.method() {
            tiny_http::Method::Post => RequestMethod::Post,
            // `parse` lets nothing but GET, HEAD and POST through
            _ => RequestMethod::Get,
        }
    }

    /// Bodies larger than [`BODY_LIMIT`] are rejected with
    /// [`io::ErrorKind::InvalidData`].
    fn read_string(&mut self) -> io::Result<String> {
        let too_large = || io::Error::new(io::ErrorKind::InvalidData, "request body too large");

        let length = self.0.body_length().unwrap_or(0);
        if length as u64 > BODY_LIMIT {
            return Err(too_large());
        }

        let mut s = String::with_capacity(length);
        let reader = self.0.as_reader();
        reader.take(BODY_LIMIT + 1).read_to_string(&mut s)?;
        if s.len() as u64 > BODY_LIMIT {
            return Err(too_large());
        }
        Ok(s)
    }

    fn respond_with_json(self: Box<Self>, status: u16, body: String) {
        respond(self.0, json_response(status, body));
    }
}

/// Parse the given HTTP request
///
/// If [`None`] is returned, the request was already answered with a
/// corresponding error message.
pub fn parse(rq: tiny_http::Request) -> Option<table_booking_core::Request> {
    use tiny_http::Method::*;

    let method = match rq.method() {
        Options => {
            respond(rq, empty_response(204));
            return None;
        }
        // tiny_http leaves out the body when answering HEAD
        Get | Head => RequestMethod::Get,
        Post => RequestMethod::Post,
        _ => {
            respond_route_error(rq, RouteError::MethodNotAllowed);
            return None;
        }
    };

    match RequestKind::from_route(method, rq.url()) {
        Ok(kind) => Some(table_booking_core::Request::from_raw(
            kind,
            Box::new(HTTPRequest(rq)),
        )),
        Err(err) => {
            respond_route_error(rq, err);
            None
        }
    }
}

fn respond_route_error(rq: tiny_http::Request, err: RouteError) {
    respond(rq, json_response(err.status_code(), err.to_json()));
}

/// Build a response with a JSON `body` and CORS headers
fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let mut res = Response::from_string(body).with_status_code(status);
    add_header(&mut res, b"Content-Type", b"application/json; charset=utf-8");
    add_response_cors_headers(&mut res);
    res
}

/// Build an empty response with CORS headers
fn empty_response(status: u16) -> Response<io::Empty> {
    let mut res = Response::empty(status);
    add_response_cors_headers(&mut res);
    res
}

fn respond<R: Read>(rq: tiny_http::Request, res: Response<R>) {
    let url = rq.url().to_owned();
    if let Err(err) = rq.respond(res) {
        warn!(%url, %err, "HTTP response failed");
    }
}

/// Add CORS headers to `res`
fn add_response_cors_headers<R: Read>(res: &mut Response<R>) {
    add_header(res, b"Access-Control-Allow-Origin", b"*");
    add_header(res, b"Access-Control-Allow-Methods", b"GET,HEAD,PUT,PATCH,POST,DELETE");
    add_header(res, b"Access-Control-Allow-Headers", b"*");
    add_header(res, b"Access-Control-Expose-Headers", b"*");
}

fn add_header<R: Read>(res: &mut Response<R>, field: &[u8], value: &[u8]) {
    if let Ok(header) = Header::from_bytes(field, value) {
        res.add_header(header);
    }
}

#[cfg(test)]
mod tests {
    use table_booking_core::{ReservationForm, StatusFilter};
    use tiny_http::{Method, TestRequest};

    use super::*;

    fn request(method: Method, path: &'static str) -> tiny_http::Request {
        TestRequest::new().with_method(method).with_path(path).into()
    }

    fn post(path: &'static str, body: &'static str) -> tiny_http::Request {
        TestRequest::new()
            .with_method(Method::Post)
            .with_path(path)
            .with_body(body)
            .into()
    }

    fn header<'a, R: Read>(res: &'a Response<R>, field: &'static str) -> Option<&'a str> {
        res.headers()
            .iter()
            .find(|h| h.field.equiv(field))
            .map(|h| h.value.as_str())
    }

    #[test]
    fn valid_routes_are_passed_on() {
        let rq = parse(request(Method::Get, "/tables/2")).unwrap();
        assert_eq!(*rq.kind(), RequestKind::GetTable(Some(2)));

        let rq = parse(request(Method::Get, "/filter?status=reserv%65d")).unwrap();
        assert_eq!(*rq.kind(), RequestKind::Filter(StatusFilter::Reserved));

        let rq = parse(request(Method::Post, "/cancel/4")).unwrap();
        assert_eq!(*rq.kind(), RequestKind::Cancel(Some(4)));
        assert_eq!(rq.method(), RequestMethod::Post);
    }

    #[test]
    fn head_is_answered_like_get() {
        let rq = parse(request(Method::Head, "/tables")).unwrap();
        assert_eq!(*rq.kind(), RequestKind::ListTables);
        assert_eq!(rq.method(), RequestMethod::Get);
    }

    #[test]
    fn other_requests_are_answered_directly() {
        assert!(parse(request(Method::Options, "/reserve/1")).is_none());
        assert!(parse(request(Method::Put, "/tables")).is_none());
        assert!(parse(request(Method::Delete, "/tables/1")).is_none());
        assert!(parse(request(Method::Get, "/menu")).is_none());
        assert!(parse(request(Method::Get, "/reserve/1")).is_none());
    }

    #[test]
    fn reservation_body_is_read() {
        let mut rq = parse(post(
            "/reserve/3",
            r#"{"customerName":"Alice","date":"2024-01-01","time":"18:00"}"#,
        ))
        .unwrap();
        assert_eq!(
            rq.read_form(),
            ReservationForm::new("Alice", "2024-01-01", "18:00")
        );
    }

    #[test]
    fn oversized_body_counts_as_empty_form() {
        let name = "A".repeat(BODY_LIMIT as usize);
        let body = format!(r#"{{"customerName":"{name}","date":"d","time":"t"}}"#);
        let body: &'static str = Box::leak(body.into_boxed_str());

        let mut rq = parse(post("/reserve/3", body)).unwrap();
        assert!(rq.read_string().is_err());

        let mut rq = parse(post("/reserve/3", body)).unwrap();
        assert_eq!(rq.read_form(), ReservationForm::default());
    }

    #[test]
    fn json_responses_carry_content_type_and_cors() {
        let res = json_response(404, RouteError::NotFound.to_json());
        assert_eq!(res.status_code().0, 404);
        assert_eq!(
            header(&res, "Content-Type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(header(&res, "Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(header(&res, "Access-Control-Allow-Headers"), Some("*"));
    }

    #[test]
    fn preflight_response_is_empty_with_cors() {
        let res = empty_response(204);
        assert_eq!(res.status_code().0, 204);
        assert_eq!(header(&res, "Content-Type"), None);
        assert_eq!(header(&res, "Access-Control-Allow-Origin"), Some("*"));
        assert!(header(&res, "Access-Control-Allow-Methods")
            .is_some_and(|methods| methods.contains("POST")));
    }
}
