//! Authority parsing.
//!
//! Parses the `[user[:password]@]host[:port]` segment of a URL, where `host`
//! may be a bracketed IPv6 literal.  The presence of `[` anywhere in the
//! input gates which of the two host forms is matched:
//!
//! - **IPv6 form:** optional userinfo prefix, then `[...]` (stored with its
//!   brackets), then an optional `:port` consuming the remainder verbatim.
//! - **Generic form:** optional userinfo prefix, then everything up to the
//!   last `:` is the host and everything after it is the port candidate.
//!
//! Userinfo ends at the first `@`: the user is everything before the first
//! `:` of that prefix, the password is the remainder and may itself contain
//! `:` (but never `@`).
//!
//! [`scan`] performs grammar-level matching only and hands back string
//! slices; [`parse`] is the strict entry point used by
//! [`Url::set_authority`](crate::Url::set_authority), which additionally
//! enforces the 1-65535 port range and user-info normalization.

use crate::error::Error;

/// Grammar-level slices of an authority string.
///
/// The port, when present, is guaranteed non-empty and all-ASCII-digits;
/// numeric conversion is left to the caller because the top-level URL
/// splitter and `set_authority` apply different ranges (see
/// [`lax_port`] vs [`parse`]).
pub(crate) struct RawAuthority<'a> {
    pub(crate) user: Option<&'a str>,
    pub(crate) password: Option<&'a str>,
    /// Host slice; IPv6 literals keep their enclosing brackets.
    pub(crate) host: &'a str,
    pub(crate) port: Option<&'a str>,
}

/// A fully validated authority, ready to assign onto a `Url`.
#[derive(Debug)]
pub(crate) struct Authority {
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
}

/// Split an authority string into grammar-level parts.
///
/// Fails with an invalid-URL error on: empty input, the degenerate `"@"`
/// authority, an empty host, a port that is empty or contains a non-digit,
/// or input that matches neither host form.
pub(crate) fn scan(input: &str) -> Result<RawAuthority<'_>, Error> {
    if input.is_empty() {
        return Err(Error::invalid_url("empty authority"));
    }
    if input == "@" {
        return Err(Error::invalid_url("empty host in authority `@`"));
    }

    let (userinfo, rest) = match input.find('@') {
        Some(at) => (Some(&input[..at]), &input[at + 1..]),
        None => (None, input),
    };

    let (user, password) = match userinfo {
        Some(userinfo) => match userinfo.split_once(':') {
            Some((user, password)) => (Some(user), Some(password)),
            None => (Some(userinfo), None),
        },
        None => (None, None),
    };

    let (host, port) = if input.contains('[') {
        scan_bracketed_host(rest, input)?
    } else {
        scan_generic_host(rest, input)?
    };

    if let Some(port) = port {
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_url(format!(
                "invalid port `{port}` in authority `{input}`"
            )));
        }
    }

    Ok(RawAuthority {
        user,
        password,
        host,
        port,
    })
}

/// Parse an authority string with strict semantics: grammar matching, the
/// 1-65535 port range, and user-info normalization (an empty user clears
/// the password as well).
pub(crate) fn parse(input: &str) -> Result<Authority, Error> {
    let raw = scan(input)?;

    let port = match raw.port {
        Some(digits) => {
            let value = digits
                .parse::<u32>()
                .ok()
                .filter(|value| (1..=65535).contains(value))
                .ok_or_else(|| {
                    Error::invalid_url(format!(
                        "port `{digits}` out of range (1-65535) in authority `{input}`"
                    ))
                })?;
            Some(value as u16)
        }
        None => None,
    };

    let (user, password) = normalize_user_info(raw.user, raw.password);

    Ok(Authority {
        user,
        password,
        host: raw.host.to_owned(),
        port,
    })
}

/// Convert a digit-only port slice with the lax range used by the top-level
/// URL splitter: `0` is accepted and preserved, anything above 65535 is
/// rejected.
pub(crate) fn lax_port(digits: &str, authority: &str) -> Result<u16, Error> {
    digits.parse::<u16>().map_err(|_| {
        Error::invalid_url(format!(
            "port `{digits}` out of range in authority `{authority}`"
        ))
    })
}

/// Apply the combined user-info assignment rule: an absent or empty user
/// clears both fields; otherwise both are stored as given.
pub(crate) fn normalize_user_info(
    user: Option<&str>,
    password: Option<&str>,
) -> (Option<String>, Option<String>) {
    match user {
        None | Some("") => (None, None),
        Some(user) => (Some(user.to_owned()), password.map(str::to_owned)),
    }
}

/// Match the IPv6 host form against the post-userinfo remainder.
fn scan_bracketed_host<'a>(
    rest: &'a str,
    authority: &str,
) -> Result<(&'a str, Option<&'a str>), Error> {
    let malformed = || Error::invalid_url(format!("invalid authority format `{authority}`"));

    let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
    let close = inner.find(']').ok_or_else(malformed)?;
    if close == 0 {
        return Err(Error::invalid_url(format!(
            "empty host in authority `{authority}`"
        )));
    }

    // Keep the brackets: slice from the opening `[` through the closing `]`.
    let host = &rest[..close + 2];
    let after = &inner[close + 1..];
    let port = if after.is_empty() {
        None
    } else if let Some(port) = after.strip_prefix(':') {
        Some(port)
    } else {
        return Err(malformed());
    };

    Ok((host, port))
}

/// Match the generic host form: host up to the last `:`, optional port after.
fn scan_generic_host<'a>(
    rest: &'a str,
    authority: &str,
) -> Result<(&'a str, Option<&'a str>), Error> {
    let (host, port) = match rest.rfind(':') {
        Some(colon) => (&rest[..colon], Some(&rest[colon + 1..])),
        None => (rest, None),
    };
    if host.is_empty() {
        return Err(Error::invalid_url(format!(
            "empty host in authority `{authority}`"
        )));
    }
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_table() {
        // (input, user, password, host, port, label)
        type TestCase<'a> = (
            &'a str,
            Option<&'a str>,
            Option<&'a str>,
            &'a str,
            Option<u16>,
            &'a str,
        );
        let cases: &[TestCase] = &[
            ("example.com", None, None, "example.com", None, "bare host"),
            ("example.com:8080", None, None, "example.com", Some(8080), "host with port"),
            ("alice@example.com", Some("alice"), None, "example.com", None, "user only"),
            (
                "alice:s3cret@example.com:81",
                Some("alice"),
                Some("s3cret"),
                "example.com",
                Some(81),
                "full credentials",
            ),
            (
                "user:pass@[::1]:8080",
                Some("user"),
                Some("pass"),
                "[::1]",
                Some(8080),
                "ipv6 with credentials",
            ),
            ("[2001:db8::1]", None, None, "[2001:db8::1]", None, "bare ipv6"),
            ("[::1]:443", None, None, "[::1]", Some(443), "ipv6 with port"),
            (
                "u:p:with:colons@host",
                Some("u"),
                Some("p:with:colons"),
                "host",
                None,
                "password may contain colons",
            ),
            ("192.168.1.1:65535", None, None, "192.168.1.1", Some(65535), "max port"),
            ("host:1", None, None, "host", Some(1), "min port"),
            // Empty user clears the password too.
            (":secret@host", None, None, "host", None, "empty user drops password"),
        ];

        for &(input, user, password, host, port, label) in cases {
            let authority = parse(input).unwrap_or_else(|e| panic!("{label}: {e}"));
            assert_eq!(authority.user.as_deref(), user, "{label}: user");
            assert_eq!(authority.password.as_deref(), password, "{label}: password");
            assert_eq!(authority.host, host, "{label}: host");
            assert_eq!(authority.port, port, "{label}: port");
        }
    }

    #[test]
    fn parse_invalid_table() {
        // (input, expected detail fragment, label)
        let cases: &[(&str, &str, &str)] = &[
            ("", "empty authority", "empty input"),
            ("@", "empty host", "bare at sign"),
            (":8080", "empty host", "port without host"),
            ("user:pass@", "empty host", "credentials without host"),
            ("user@:8080", "empty host", "user and port without host"),
            ("host:", "invalid port", "trailing colon"),
            ("host:80a", "invalid port", "non-digit port"),
            ("host:-80", "invalid port", "negative port"),
            ("a:b:c", "invalid port", "colons without digits"),
            ("host:0", "out of range", "port zero"),
            ("host:65536", "out of range", "port above u16"),
            ("host:99999999999", "out of range", "huge port"),
            ("[::1", "invalid authority format", "unclosed bracket"),
            ("[]:80", "empty host", "empty ipv6 literal"),
            ("[::1]8080", "invalid authority format", "junk after bracket"),
            ("u[x@host", "invalid authority format", "bracket in userinfo"),
        ];

        for &(input, fragment, label) in cases {
            let err = parse(input).unwrap_err();
            assert!(err.is_invalid_url(), "{label}: kind");
            assert!(
                err.detail().contains(fragment),
                "{label}: detail `{}` should contain `{fragment}`",
                err.detail(),
            );
        }
    }

    #[test]
    fn normalize_user_info_table() {
        // (user, password, expected_user, expected_password, label)
        type TestCase<'a> = (
            Option<&'a str>,
            Option<&'a str>,
            Option<&'a str>,
            Option<&'a str>,
            &'a str,
        );
        let cases: &[TestCase] = &[
            (None, None, None, None, "both absent"),
            (None, Some("pw"), None, None, "password without user"),
            (Some(""), Some("pw"), None, None, "empty user drops password"),
            (Some("alice"), None, Some("alice"), None, "user only"),
            (Some("alice"), Some("pw"), Some("alice"), Some("pw"), "both present"),
            (Some("alice"), Some(""), Some("alice"), Some(""), "empty password kept"),
        ];

        for &(user, password, expected_user, expected_password, label) in cases {
            let (user, password) = normalize_user_info(user, password);
            assert_eq!(user.as_deref(), expected_user, "{label}: user");
            assert_eq!(password.as_deref(), expected_password, "{label}: password");
        }
    }

    #[test]
    fn lax_port_accepts_zero() {
        assert_eq!(lax_port("0", "host:0").unwrap(), 0);
        assert_eq!(lax_port("65535", "host:65535").unwrap(), 65535);
        assert!(lax_port("65536", "host:65536").unwrap_err().is_invalid_url());
    }
}
