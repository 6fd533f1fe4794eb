//! Host validation.
//!
//! Applied to hosts extracted by a full [`Url::parse`](crate::Url::parse).
//! A bracketed host must contain a valid IPv6 address; a dotted-quad IPv4
//! address is accepted as-is; anything else must satisfy RFC-1123-style
//! domain syntax.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::Error;

/// RFC 1035 §2.3.4 limits, as relaxed by RFC 1123.
const MAX_HOST_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validate a host string as stored on a `Url` (IPv6 literals bracketed).
pub(crate) fn validate(host: &str) -> Result<(), Error> {
    if host.starts_with('[') {
        let inner = host.strip_prefix('[').and_then(|h| h.strip_suffix(']'));
        return match inner {
            Some(inner) if inner.parse::<Ipv6Addr>().is_ok() => Ok(()),
            _ => Err(Error::invalid_url(format!(
                "host `{host}` is not a valid IPv6 literal"
            ))),
        };
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }

    validate_domain(host)
}

/// RFC-1123-style domain syntax: at most 253 characters overall, labels of
/// 1-63 alphanumeric-or-hyphen characters, no leading or trailing hyphen,
/// no empty label.
fn validate_domain(host: &str) -> Result<(), Error> {
    let fail = || Error::invalid_url(format!("host `{host}` is not a valid host name"));

    if host.is_empty() || host.len() > MAX_HOST_LEN {
        return Err(fail());
    }

    for label in host.split('.') {
        let bytes = label.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
            return Err(fail());
        }
        if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
            return Err(fail());
        }
        if !bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-') {
            return Err(fail());
        }
    }

    Ok(())
}
