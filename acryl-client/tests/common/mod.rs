//! In-process stub node for client tests.
//!
//! A hyper HTTP/1 server on `127.0.0.1:0`, driven by its own tokio runtime on
//! a background thread so that blocking and async tests can share it. Every
//! request is recorded before the canned answer goes out.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;

use acryl::{AddressIdentity, KeySource, Network};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// A request as received by the stub.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response for a method and path.
pub type Responder = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

type Requests = Arc<Mutex<Vec<Recorded>>>;

pub struct StubNode {
    pub addr: SocketAddr,
    pub requests: Requests,
}

impl StubNode {
    /// Start a stub answering with `respond(method, path)`.
    pub fn start(respond: Box<Responder>) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.set_nonblocking(true).expect("Failed to set nonblocking");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let requests = Requests::default();
        let respond: Arc<Responder> = Arc::from(respond);

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build runtime");
            runtime.block_on(serve(listener, recorded, respond));
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(listener: std::net::TcpListener, recorded: Requests, respond: Arc<Responder>) {
    let listener = TcpListener::from_std(listener).expect("Failed to register listener");
    loop {
        let Ok((stream, _)) = listener.accept().await else {
            continue;
        };
        let io = TokioIo::new(stream);
        let recorded = Arc::clone(&recorded);
        let respond = Arc::clone(&respond);

        tokio::spawn(async move {
            let service = service_fn(|req| handle(req, Arc::clone(&recorded), Arc::clone(&respond)));
            // Clients hanging up mid-connection are expected in tests.
            let _ = http1::Builder::new().serve_connection(io, service).await;
        });
    }
}

async fn handle(
    req: Request<Incoming>,
    recorded: Requests,
    respond: Arc<Responder>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let headers = req
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();
    let body = match req.collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(_) => String::new(),
    };

    let (status, response_body) = respond(&method, &path);
    recorded.lock().unwrap().push(Recorded {
        method,
        path,
        headers,
        body,
    });

    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(response_body)))
        .unwrap())
}

/// Node that answers the endpoints an identity uses.
pub fn happy_node() -> StubNode {
    StubNode::start(Box::new(|method, path| match (method, path) {
        ("GET", "/node/version") => (200, r#"{"version":"Acryl v1.0.2"}"#.to_string()),
        ("GET", p) if p.starts_with("/addresses/balance/") => {
            let address = p.trim_start_matches("/addresses/balance/");
            (
                200,
                format!(r#"{{"address":"{address}","confirmations":0,"balance":250000000}}"#),
            )
        }
        ("GET", p) if p.starts_with("/addresses/effectiveBalance/") => {
            let address = p.trim_start_matches("/addresses/effectiveBalance/");
            (
                200,
                format!(r#"{{"address":"{address}","confirmations":0,"balance":300000000}}"#),
            )
        }
        ("GET", "/alias/by-alias/bobby") => (
            200,
            format!(r#"{{"address":"{RECIPIENT_ADDRESS}"}}"#),
        ),
        ("GET", p) if p.starts_with("/alias/by-alias/") => (
            404,
            r#"{"error":302,"message":"alias 'alias:A:nobody' doesn't exist"}"#.to_string(),
        ),
        ("POST", p) if p.contains("/broadcast") => (
            200,
            r#"{"id":"7ViWrUMCK9zh6sEtGszt31ELgd3rp9jeeP8YL57tQ2K","type":4}"#.to_string(),
        ),
        _ => (404, "not found".to_string()),
    }))
}

/// Node that rejects every broadcast.
pub fn rejecting_node() -> StubNode {
    StubNode::start(Box::new(|_, _| {
        (
            400,
            r#"{"error":112,"message":"State check failed. Reason: negative acryl balance"}"#
                .to_string(),
        )
    }))
}

/// Node whose backend is down: plain-text 503 for everything.
pub fn unavailable_node() -> StubNode {
    StubNode::start(Box::new(|_, _| (503, "Service Unavailable".to_string())))
}

pub const SENDER_ADDRESS: &str = "3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN";
pub const RECIPIENT_ADDRESS: &str = "3ESULF5zussA682zSYRSkKAGrwQ5roo6TVA";

pub fn sender() -> AddressIdentity {
    AddressIdentity::generate(KeySource::seed("test-seed"), Network::Mainnet).unwrap()
}

/// An address that accepts no connections.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
