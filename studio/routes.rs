use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedPages;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn body_response(body: String, content_type: &[u8]) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", content_type).unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    body_response(body, b"text/html; charset=utf-8")
}

pub fn svg_response(body: String) -> Response<Cursor<Vec<u8>>> {
    body_response(body, b"image/svg+xml")
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes a request to one of the pre-rendered pages.
pub fn dispatch(request: Request, pages: SharedPages) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("");

    let response = match (method, path) {
        (Method::Get, "/") => html_response(pages.network_page.clone()),
        (Method::Get, "/network.svg") => svg_response(pages.network_svg.clone()),
        (Method::Get, "/state") => match &pages.state_page {
            Some(page) => html_response(page.clone()),
            None => not_found(),
        },
        _ => not_found(),
    };

    log::debug!("{} {} -> {}", request.method(), url, response.status_code().0);
    let _ = request.respond(response);
}
