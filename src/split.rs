//! Generic URL splitting.
//!
//! Splits a URL string into raw components -- scheme, authority parts,
//! path, query, fragment -- without semantic validation of the host (that
//! happens in [`host`](crate::host) during a full parse).  The scanner
//! peels components off in RFC 3986 order: fragment first, then scheme,
//! then a `//`-introduced authority, then query, leaving the path.
//!
//! One deliberate laxness: the port is converted with a 0-inclusive range,
//! so `http://example.com:0/` splits successfully and preserves port `0`.
//! Every explicit setter path rejects `0`; see
//! [`Url::set_port`](crate::Url::set_port).

use crate::authority;
use crate::error::Error;

/// Raw components extracted from a URL string.
#[derive(Debug)]
pub(crate) struct RawUrl {
    pub(crate) scheme: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

/// Split a URL string into raw components.
pub(crate) fn split(input: &str) -> Result<RawUrl, Error> {
    trace!("splitting URL `{}`", input);

    // Fragment first (RFC 3986 §3.5); an empty fragment stays `Some("")`
    // so the accessor can distinguish `#` from no fragment at all.
    let (rest, fragment) = match input.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment.to_owned())),
        None => (input, None),
    };

    let (scheme, rest) = split_scheme(rest);

    let (raw_authority, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c| c == '/' || c == '?')
                .unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
        None => (rest.to_owned(), None),
    };

    let mut components = RawUrl {
        scheme: scheme.map(str::to_owned),
        user: None,
        password: None,
        host: None,
        port: None,
        path,
        query,
        fragment,
    };

    if let Some(raw) = raw_authority {
        if raw.is_empty() {
            return Err(Error::invalid_url(format!("empty authority in URL `{input}`")));
        }
        let scanned = authority::scan(raw)?;
        let port = match scanned.port {
            Some(digits) => Some(authority::lax_port(digits, raw)?),
            None => None,
        };
        let (user, password) = authority::normalize_user_info(scanned.user, scanned.password);
        components.user = user;
        components.password = password;
        components.host = Some(scanned.host.to_owned());
        components.port = port;
    }

    Ok(components)
}

/// Split a leading scheme off the input, if one is present.
///
/// A scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` immediately
/// followed by `:`, before any `/` or `?` (RFC 3986 §3.1).
fn split_scheme(input: &str) -> (Option<&str>, &str) {
    let bytes = input.as_bytes();
    if !bytes.first().is_some_and(|b| b.is_ascii_alphabetic()) {
        return (None, input);
    }
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b':' => return (Some(&input[..i]), &input[i + 1..]),
            _ if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') => {}
            _ => break,
        }
    }
    (None, input)
}
