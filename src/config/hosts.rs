//
//  gerrit-client
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Host name helpers.

/// Normalizes a host for use as a configuration key.
///
/// Strips the scheme and trailing slashes and lowercases the result. A path
/// (for servers mounted under a prefix) is kept.
///
/// ```
/// use gerrit_client::config::normalize_host;
///
/// assert_eq!(normalize_host("https://Review.Example.com/"), "review.example.com");
/// assert_eq!(normalize_host("http://example.com/gerrit"), "example.com/gerrit");
/// ```
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("https://").unwrap_or(&host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

/// Turns user input into a base URL, assuming HTTPS when no scheme is given.
pub fn host_url(input: &str) -> String {
    let input = input.trim().trim_end_matches('/');
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("review.example.com"), "review.example.com");
        assert_eq!(normalize_host("  HTTPS://review.example.com// "), "review.example.com");
        assert_eq!(normalize_host("https://review.example.com//"), "review.example.com");
    }

    #[test]
    fn test_host_url() {
        assert_eq!(host_url("review.example.com"), "https://review.example.com");
        assert_eq!(host_url("http://localhost:8080/"), "http://localhost:8080");
    }
}
