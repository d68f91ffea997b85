//! The smallest possible HTTP server: one handler for every request.
//!
//! Run with: cargo run --bin complete_110_http_server

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

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

/// Answers every request the same way, whatever the method or path.
async fn hello<B>(req: Request<B>) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    println!("{}: {}", req.method(), req.uri());
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html")
        .body(Full::new(Bytes::from("<h1>Hello world!</h1>")))
}

// Malformed requests never reach `hello`: hyper answers them with 400 itself.
async fn serve(listener: TcpListener) -> Result<(), BoxError> {
    loop {
        let (tcp, _) = listener.accept().await?;
        let io = TokioIo::new(tcp);

        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(hello))
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
    let listener = TcpListener::bind(SocketAddr::new(config.host, config.port)).await?;

    // Listens on every interface but advertises the loopback address.
    let local = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), config.port);
    println!("Server is running at http://{}/", local);
    serve(listener).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::{BodyExt, Empty};
    use hyper::Method;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_every_request_gets_the_greeting() {
        for (method, uri) in [(Method::GET, "/"), (Method::POST, "/anything?x=1")] {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .body(Empty::<Bytes>::new())
                .unwrap();
            let response = hello(req).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
            let body = response.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], b"<h1>Hello world!</h1>");
        }
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener));

        let body = reqwest::get(format!("http://{}/some/path", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "<h1>Hello world!</h1>");
    }

    #[test]
    fn test_default_config_listens_on_every_interface() {
        let config = ServerConfig::default();
        assert!(config.host.is_unspecified());
        assert_eq!(config.port, 8080);
    }

    #[tokio::test]
    async fn test_malformed_request_gets_400() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nnot a header\r\n\r\n")
            .await
            .unwrap();

        let mut reply = Vec::new();
        stream.read_to_end(&mut reply).await.unwrap();
        let reply = String::from_utf8_lossy(&reply);
        assert!(reply.starts_with("HTTP/1.1 400"), "unexpected reply: {reply}");
    }
}
