// Plain stdout/stderr logging, one line per event.

use std::net::SocketAddr;

use hyper::{Method, Uri, Version};

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("File gateway started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!(
        "Serving stored files under: /{}/",
        config.gateway.prefix.trim_matches('/')
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_file_response(id: &str, status: u16) {
    println!("[File] {id} -> {status}");
}

pub fn log_seeded_file(path: &str, id: &str, content_type: &str) {
    println!("[Store] Seeded {path} as {id} ({content_type})");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[Warn] {message}");
}
