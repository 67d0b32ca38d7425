use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

/// Extension key for the caller's IP address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Middleware to record the client IP address
///
/// Priority:
/// 1. X-Forwarded-For header (first hop)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address, when the server was started with it
pub async fn extract_client_ip(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ip) = client_ip(&request, connect_info.map(|ConnectInfo(addr)| addr)) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

fn client_ip(request: &Request, peer: Option<SocketAddr>) -> Option<IpAddr> {
    let header = |name: &str| request.headers().get(name).and_then(|v| v.to_str().ok());

    if let Some(forwarded) = header("x-forwarded-for") {
        return forwarded
            .split(',')
            .next()
            .and_then(|s| s.trim().parse::<IpAddr>().ok());
    }
    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.trim().parse::<IpAddr>().ok();
    }
    peer.map(|addr| addr.ip())
}
