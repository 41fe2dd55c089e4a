//! URL helpers for validating and comparing target entries.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::time::unix_time_ms_now;

struct ParsedUrl<'a> {
    host: &'a str,
    path: &'a str,
}

fn parse_absolute_url(url: &str) -> Option<ParsedUrl<'_>> {
    let (scheme, rest) = url.split_once("://")?;
    let mut scheme_chars = scheme.chars();
    if !scheme_chars.next()?.is_ascii_alphabetic()
        || !scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = if host_port.starts_with('[') {
        host_port.find(']').map(|end| &host_port[..=end])?
    } else {
        host_port.split(':').next().unwrap_or_default()
    };
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return None;
    }

    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
    Some(ParsedUrl {
        host,
        path: &tail[..path_end],
    })
}

/// Reduces a URL to `host + path`, or lowercases and trims input that is not an absolute URL.
pub fn normalize_url(url: &str) -> String {
    match parse_absolute_url(url.trim()) {
        Some(parsed) => {
            let path = if parsed.path.is_empty() { "/" } else { parsed.path };
            format!("{}{}", parsed.host.to_ascii_lowercase(), path)
        }
        None => url.trim().to_lowercase(),
    }
}

fn bare_domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static domain pattern is valid")
    })
}

/// Returns `true` when `pattern` can be used as a target entry.
///
/// Accepts anything that parses as an absolute URL once `https://` is prefixed to scheme-less
/// input, or a bare `name.tld` domain.
pub fn is_valid_url_pattern(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let candidate = if pattern.starts_with("http") {
        pattern.to_string()
    } else {
        format!("https://{pattern}")
    };
    parse_absolute_url(&candidate).is_some() || bare_domain_pattern().is_match(pattern)
}

/// Normalized counterpart of [`crate::DirectionRecord::matches_url`].
pub fn should_apply_direction(current_url: &str, target_urls: &[String]) -> bool {
    let current = normalize_url(current_url);
    target_urls
        .iter()
        .any(|target| current.contains(normalize_url(target).as_str()))
}

/// Generates a record id of the form `config_<unix ms>_<9 alphanumerics>`.
pub fn generate_config_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("config_{}_{}", unix_time_ms_now(), &suffix[..9])
}
