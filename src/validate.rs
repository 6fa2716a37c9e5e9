//! URL syntax validation

use std::net::Ipv4Addr;
use url::{Host, Url};

const ALLOWED_SCHEMES: [&str; 12] = [
    "ftp", "ftps", "git", "http", "https", "irc", "rtmp", "rtmps", "rtsp", "sftp", "ssh", "telnet",
];

/// Check whether `input` is an absolute URL worth encoding.
///
/// The host must be a dotted-quad IPv4 address, a bracketed IPv6 address,
/// `localhost`, or a dotted domain name ending in an alphabetic top-level
/// label. Never panics; anything malformed is simply rejected.
pub fn is_valid_url(input: &str) -> bool {
    // `Url::parse` silently strips surrounding whitespace and embedded tabs/newlines.
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return false;
    }

    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(err) => {
            tracing::debug!(%err, "URL failed to parse");
            return false;
        }
    };

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        // `url` also accepts shorthand like `http://999` or `http://0x7f.1`.
        Some(Host::Ipv4(addr)) => written_ipv4(input) == Some(addr),
        Some(Host::Ipv6(_)) => true,
        // Non-special schemes leave the host opaque, IPv4 included.
        Some(Host::Domain(domain)) => {
            domain.parse::<Ipv4Addr>().is_ok() || is_valid_domain(domain)
        }
        None => false,
    }
}

/// The host exactly as written in `input`, parsed as a strict dotted quad.
fn written_ipv4(input: &str) -> Option<Ipv4Addr> {
    let (_, rest) = input.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host_port.split(':').next()?;
    host.parse().ok()
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    labels.last().is_some_and(|tld| {
        tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
    })
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
