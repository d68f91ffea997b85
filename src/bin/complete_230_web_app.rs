//! Two-route web "hello world".
//!
//! Run with: cargo run --bin complete_230_web_app
//! then open http://127.0.0.1:8080/ or http://127.0.0.1:8080/Bob

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bytes::Bytes;
use colored::Colorize;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type HttpResult = Result<Response<Full<Bytes>>, hyper::http::Error>;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Milestone 1: Routing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Index,
    Hello(&'a str),
}

/// `/` is the index; `/{name}` takes exactly one non-empty segment, still
/// percent-encoded.
pub fn resolve(path: &str) -> Option<Route<'_>> {
    match path.strip_prefix('/')? {
        "" => Some(Route::Index),
        segment if !segment.contains('/') => Some(Route::Hello(segment)),
        _ => None,
    }
}

// =============================================================================
// Milestone 2: Handlers
// =============================================================================

fn respond(status: StatusCode, content_type: &str, body: String) -> HttpResult {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(Bytes::from(body)))
}

fn html(body: String) -> HttpResult {
    respond(StatusCode::OK, "text/html; charset=utf-8", body)
}

pub fn index() -> HttpResult {
    html("<h1>Index Page</h1>".to_string())
}

pub fn hello(name: Option<&str>) -> HttpResult {
    html(format!("<h1>Hello, {}</h1>", name.unwrap_or("World")))
}

fn not_found() -> HttpResult {
    respond(
        StatusCode::NOT_FOUND,
        "text/plain; charset=utf-8",
        "404: Not Found".to_string(),
    )
}

fn method_not_allowed() -> HttpResult {
    let mut response = respond(
        StatusCode::METHOD_NOT_ALLOWED,
        "text/plain; charset=utf-8",
        "405: Method Not Allowed".to_string(),
    )?;
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    Ok(response)
}

pub async fn handle<B>(req: Request<B>) -> HttpResult {
    let Some(route) = resolve(req.uri().path()) else {
        return not_found();
    };

    // GET routes answer HEAD too; hyper drops the body for HEAD.
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return method_not_allowed();
    }

    match route {
        Route::Index => index(),
        Route::Hello(segment) => hello(Some(&percent_decode_str(segment).decode_utf8_lossy())),
    }
}

// =============================================================================
// Milestone 3: Serving
// =============================================================================

fn log_access(peer: SocketAddr, request_line: &str, status: StatusCode) {
    let status = if status.is_success() {
        status.as_u16().to_string().green()
    } else {
        status.as_u16().to_string().yellow()
    };
    println!("{} \"{}\" {}", peer, request_line, status);
}

pub async fn serve(listener: TcpListener) -> Result<(), BoxError> {
    loop {
        let (tcp, peer) = listener.accept().await?;
        let io = TokioIo::new(tcp);

        tokio::task::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| async move {
                let request_line =
                    format!("{} {} {:?}", req.method(), req.uri().path(), req.version());
                let response = handle(req).await?;
                log_access(peer, &request_line, response.status());
                Ok::<_, hyper::http::Error>(response)
            });

            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service)
                .await
            {
                eprintln!("Error serving connection: {:?}", err);
            }
        });
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::default();
    let listener = TcpListener::bind(config.addr()).await?;

    println!("======== Running on http://{} ========", config.addr());
    println!("(Press CTRL+C to quit)");

    serve(listener).await
}
