//! Request/response logging for /api routes

use std::{net::SocketAddr, time::Instant};
use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{error, info};

/// Log every /api request with client info, status and latency
pub async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api/") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let query = request.uri().query().map(|q| format!("?{}", q)).unwrap_or_default();
    let peer = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|c| c.0);
    let client = client_address(request.headers(), peer);
    let user_agent = request.headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!("[API REQUEST] {} {}{} | Client: {}, UserAgent: {}", method, path, query, client, user_agent);

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.as_u16() >= 400 {
        error!("[API RESPONSE] {} {} | Status: {} | Time: {}ms", method, path, status.as_u16(), elapsed_ms);
    } else {
        info!("[API RESPONSE] {} {} | Status: {} | Time: {}ms", method, path, status.as_u16(), elapsed_ms);
    }

    response
}

/// Real client address, honouring proxy headers before the socket peer
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers.get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("unknown"))
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }

    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
