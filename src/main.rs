use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use gridgate::config::Config;
use gridgate::handler::{Downstream, Gateway};
use gridgate::http::mime;
use gridgate::logger;
use gridgate::store::{connect, MemoryStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load_from("gridgate")?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(run(cfg))
}

async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // The binary fronts an in-memory store seeded from local files. A real
    // deployment implements `StoreClient` for its store backend and embeds
    // the library instead.
    let store = connect::<MemoryStore>(&cfg.gateway).await?;
    seed_store(&store, &cfg).await;

    let gateway = Arc::new(
        Gateway::new(&cfg.gateway.prefix, Arc::new(store.clone()), DefaultApp)
            .not_found_includes_id(cfg.gateway.not_found_includes_id)
            .access_log(cfg.logging.access_log),
    );

    let listener = create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if cfg.logging.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                serve_connection(stream, Arc::clone(&gateway));
            }
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

/// Serve one HTTP/1.1 connection in a spawned task.
fn serve_connection(stream: tokio::net::TcpStream, gateway: Arc<Gateway<DefaultApp>>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let gateway = Arc::clone(&gateway);
                async move { gateway.handle(req).await }
            }),
        );
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Load the configured `[[preload]]` files into the store.
async fn seed_store(store: &MemoryStore, cfg: &Config) {
    for entry in &cfg.preload {
        match tokio::fs::read(&entry.path).await {
            Ok(content) => {
                let content_type = entry.content_type.clone().unwrap_or_else(|| {
                    mime::get_content_type(
                        Path::new(&entry.path).extension().and_then(|e| e.to_str()),
                    )
                    .to_string()
                });
                let id = store.insert(&content_type, content).await;
                logger::log_seeded_file(&entry.path, &id, &content_type);
            }
            Err(e) => logger::log_warning(&format!("Skipping preload '{}': {e}", entry.path)),
        }
    }
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled so the port can be
/// rebound right after a restart instead of waiting out TIME_WAIT.
fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

const HOMEPAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>gridgate</title></head>\n\
<body><h1>gridgate</h1>\n<p>Stored files are served under the configured prefix; \
everything else lands here.</p></body>\n</html>\n";

/// Fallback application for every path the gateway does not claim.
struct DefaultApp;

#[async_trait]
impl Downstream<Incoming> for DefaultApp {
    async fn call(&self, req: Request<Incoming>) -> Response<Full<Bytes>> {
        if req.uri().path() == "/" {
            Response::builder()
                .status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(Full::new(Bytes::from(HOMEPAGE)))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
        } else {
            Response::builder()
                .status(404)
                .header("Content-Type", "text/plain")
                .body(Full::new(Bytes::from("404 Not Found")))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
        }
    }
}
