use std::net::IpAddr;
use url::Host;

/// Canonical form of a catalog host: trimmed, lowercased domain or a plain IP.
pub fn normalize_host(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains("://") {
        return None;
    }
    if let Ok(ip) = trimmed.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    match Host::parse(trimmed).ok()? {
        Host::Domain(domain) if !domain.contains(char::is_whitespace) => Some(domain),
        Host::Domain(_) => None,
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}
