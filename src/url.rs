//! URL value type.
//!
//! Provides the public [`Url`] type: a mutable bag of URL components that
//! parses once, mutates in place, and re-serializes on demand.  Canonical
//! inputs round-trip exactly -- including query-key order -- so callers can
//! rewrite one component without disturbing the rest of the string.
//!
//! # Absolute vs. relative output
//!
//! [`build_absolute`](Url::build_absolute) renders
//! `scheme://authority/path?query#fragment` (protocol-relative `//...`
//! without a scheme) and fails on a host-less value;
//! [`build_relative`](Url::build_relative) renders only
//! `path?query#fragment` and cannot fail.  Plain [`build`](Url::build)
//! picks between them from the host and the per-instance
//! [`UrlFormat`] preference.
//!
//! # Default ports
//!
//! A read-only table of well-known ports (http 80, https 443, ftp 21, ...)
//! drives `:port` elision: a port equal to its scheme's default can be
//! dropped from the authority by passing `false` to
//! [`authority_with`](Url::authority_with) or clearing
//! [`set_always_include_default_port`](Url::set_always_include_default_port).
//! [`full_host`](Url::full_host) always includes the port.

use std::fmt;
use std::str::FromStr;

use crate::authority;
use crate::error::Error;
use crate::host;
use crate::query::Query;
use crate::split;

// ---------------------------------------------------------------------------
// Standard-ports table
// ---------------------------------------------------------------------------

/// Well-known scheme/port pairs.  Read-only configuration data, shared by
/// every `Url` instance.
const STANDARD_PORTS: &[(&str, u16)] = &[
    ("http", 80),
    ("https", 443),
    ("ftp", 21),
    ("sftp", 22),
    ("ftps", 990),
    ("smtp", 25),
    ("pop3", 110),
    ("imap", 143),
    ("ssh", 22),
    ("telnet", 23),
    ("ldap", 389),
    ("mysql", 3306),
    ("postgres", 5432),
    ("rdp", 3389),
];

/// The conventional port for `scheme`, if it has one.
///
/// Lookup is ASCII-case-insensitive (`"HTTP"` finds 80).
pub fn standard_port(scheme: &str) -> Option<u16> {
    STANDARD_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

// ---------------------------------------------------------------------------
// UrlFormat
// ---------------------------------------------------------------------------

/// The textual form plain [`Url::build`] prefers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UrlFormat {
    /// Emit only `path?query#fragment`.
    Relative,
    /// Emit `scheme://authority/...` whenever a host is available.
    #[default]
    Absolute,
}

// ---------------------------------------------------------------------------
// Url
// ---------------------------------------------------------------------------

/// A parsed, mutable URL.
///
/// Every component has an accessor and a mutator; `Clone` gives an
/// independent deep copy.  Concurrent mutation of a single instance is the
/// caller's problem -- treat it as a plain mutable struct, not a shared
/// resource.
///
/// ```
/// use urlkit::Url;
///
/// let mut url = Url::parse("https://example.com:88/foo?bar=baz#frag").unwrap();
/// assert_eq!(url.host(), Some("example.com"));
/// assert_eq!(url.port(), Some(88));
///
/// url.set_port(Some(8443)).unwrap();
/// assert_eq!(url.build(), "https://example.com:8443/foo?bar=baz#frag");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    scheme: Option<String>,
    user: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
    query: Query,
    fragment: Option<String>,
    preferred_format: UrlFormat,
    always_include_default_port: bool,
}

impl Default for Url {
    fn default() -> Self {
        Self {
            scheme: None,
            user: None,
            password: None,
            host: None,
            port: None,
            path: String::new(),
            query: Query::new(),
            fragment: None,
            preferred_format: UrlFormat::Absolute,
            always_include_default_port: true,
        }
    }
}

impl Url {
    /// Create an empty URL; fill it in with the setters.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Parsing --

    /// Parse a URL string with the default output preferences
    /// (absolute form, default ports included).
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, UrlFormat::Absolute, true)
    }

    /// Parse a URL string with explicit output preferences.
    ///
    /// Fails with an invalid-URL error when the input cannot be split into
    /// components, when an extracted host fails validation (bracketed
    /// hosts must be IPv6 literals, everything else must be a dotted-quad
    /// IPv4 address or an RFC-1123 domain name), or when a port is
    /// malformed.
    ///
    /// A port of `0` in the input is preserved as-is; only the explicit
    /// setters enforce the 1-65535 range.  See [`set_port`](Url::set_port).
    pub fn parse_with(
        input: &str,
        preferred_format: UrlFormat,
        always_include_default_port: bool,
    ) -> Result<Self, Error> {
        let raw = split::split(input)?;
        if let Some(host) = raw.host.as_deref() {
            host::validate(host)?;
        }
        let query = match raw.query.as_deref() {
            Some(query) => Query::decode(query),
            None => Query::new(),
        };
        debug!("parsed URL `{}`", input);

        Ok(Self {
            scheme: raw.scheme,
            user: raw.user,
            password: raw.password,
            host: raw.host,
            port: raw.port,
            path: raw.path,
            query,
            fragment: raw.fragment,
            preferred_format,
            always_include_default_port,
        })
    }

    // -- Component accessors --

    /// The scheme, stored exactly as given (no case normalization).
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Replace the scheme.  Stored as given; `None` clears it.
    pub fn set_scheme(&mut self, scheme: Option<&str>) {
        self.scheme = scheme.map(str::to_owned);
    }

    /// The user component.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The password component.
    ///
    /// Only meaningful alongside a user: when no user is set, any stored
    /// password is treated as absent.
    pub fn password(&self) -> Option<&str> {
        if self.user.is_none() {
            return None;
        }
        self.password.as_deref()
    }

    /// Set user and password together.
    ///
    /// An absent or empty user clears both fields; otherwise both are
    /// stored as given.
    pub fn set_user_info(&mut self, user: Option<&str>, password: Option<&str>) {
        let (user, password) = authority::normalize_user_info(user, password);
        self.user = user;
        self.password = password;
    }

    /// The `user[:password]` display form, or `None` without a user.
    ///
    /// An empty password is hidden; a non-empty one is always shown.
    pub fn user_info(&self) -> Option<String> {
        let user = self.user.as_deref()?;
        match self.password.as_deref() {
            Some(password) if !password.is_empty() => Some(format!("{user}:{password}")),
            _ => Some(user.to_owned()),
        }
    }

    /// The host.  IPv6 literals include their brackets (`"[::1]"`).
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Replace the host.  Stored as given -- no validation is applied, the
    /// same trust [`set_authority`](Url::set_authority) extends to its own
    /// grammar.  `None` clears it.
    pub fn set_host(&mut self, host: Option<&str>) {
        self.host = host.map(str::to_owned);
    }

    /// The port.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Replace the port.  `None` clears it; `Some(0)` is rejected (the
    /// valid range is 1-65535).
    ///
    /// Note the asymmetry with parsing: `parse("http://example.com:0/")`
    /// preserves port `0`, because the top-level splitter takes the port
    /// verbatim from the input.
    pub fn set_port(&mut self, port: Option<u16>) -> Result<(), Error> {
        if port == Some(0) {
            return Err(Error::invalid_url("port `0` out of range (1-65535)"));
        }
        self.port = port;
        Ok(())
    }

    /// The path.  Defaults to `""`, which is distinct from `"/"`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// The query mapping.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Mutable access to the query mapping.
    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    /// Replace the whole query mapping.
    pub fn set_query(&mut self, query: Query) {
        self.query = query;
    }

    /// The fragment.
    ///
    /// `Some("")` and `None` both produce no `#fragment` on output but stay
    /// distinguishable here.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Replace the fragment.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(str::to_owned);
    }

    /// The form plain [`build`](Url::build) prefers.
    pub fn preferred_format(&self) -> UrlFormat {
        self.preferred_format
    }

    /// Choose the form plain [`build`](Url::build) prefers.
    pub fn set_preferred_format(&mut self, format: UrlFormat) {
        self.preferred_format = format;
    }

    /// Whether a port matching the scheme's well-known default is still
    /// written out by [`authority`](Url::authority).
    pub fn always_include_default_port(&self) -> bool {
        self.always_include_default_port
    }

    /// Control default-port elision for [`authority`](Url::authority) and
    /// the built output.
    pub fn set_always_include_default_port(&mut self, include: bool) {
        self.always_include_default_port = include;
    }

    // -- Authority --

    /// The `user[:password]@host[:port]` segment, using the instance's
    /// default-port preference.  Empty string when no host is set.
    pub fn authority(&self) -> String {
        self.authority_with(self.always_include_default_port)
    }

    /// The authority segment with explicit control over default-port
    /// elision: with `false`, a port equal to the scheme's well-known
    /// default is dropped.
    ///
    /// A port is elided exactly when it equals the scheme's default and
    /// `include_default_port` is `false`; unknown or absent schemes always
    /// show their port.
    pub fn authority_with(&self, include_default_port: bool) -> String {
        let Some(host) = self.host.as_deref() else {
            return String::new();
        };

        let mut out = String::new();
        if let Some(user_info) = self.user_info() {
            out.push_str(&user_info);
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = self.port {
            let is_default = self
                .scheme
                .as_deref()
                .and_then(standard_port)
                .is_some_and(|default| default == port);
            if include_default_port || !is_default {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }
        out
    }

    /// Replace user, password, host, and port from an authority string.
    ///
    /// `None` or an empty string clears all four components.  Otherwise the
    /// string is parsed against the authority grammar
    /// (`[user[:password]@]host[:port]`, bracketed IPv6 hosts supported)
    /// with the port restricted to 1-65535.  The parse is all-or-nothing:
    /// on failure the previous components are untouched.
    ///
    /// Unlike [`parse`](Url::parse), no semantic host validation is
    /// applied -- the grammar isolating a host substring is trusted.
    pub fn set_authority(&mut self, authority: Option<&str>) -> Result<(), Error> {
        match authority {
            None | Some("") => {
                self.user = None;
                self.password = None;
                self.host = None;
                self.port = None;
                Ok(())
            }
            Some(input) => {
                let parsed = authority::parse(input)?;
                debug!("authority set to `{}`", input);
                self.user = parsed.user;
                self.password = parsed.password;
                self.host = Some(parsed.host);
                self.port = parsed.port;
                Ok(())
            }
        }
    }

    /// The host with its port (`"example.com:80"`), or `None` without a
    /// host.  The port is always included here, regardless of the
    /// default-port preference.
    pub fn full_host(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        Some(match self.port {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }

    // -- Building --

    /// Serialize the URL in its preferred form.
    ///
    /// Absolute when a host is set and the preferred format is
    /// [`UrlFormat::Absolute`]; relative otherwise.  Infallible by
    /// construction -- the absolute form is only chosen when a host exists.
    pub fn build(&self) -> String {
        match (self.host.is_some(), self.preferred_format) {
            (true, UrlFormat::Absolute) => self.absolute(),
            _ => self.build_relative(),
        }
    }

    /// Serialize as an absolute URL.
    ///
    /// Fails with an incomplete-URL error when no host is set.  Without a
    /// scheme the output is protocol-relative (`//host/...`).  A `/`
    /// separator is inserted when the path is non-empty and does not
    /// already start with one.
    pub fn build_absolute(&self) -> Result<String, Error> {
        if self.host.is_none() {
            return Err(Error::incomplete_url(
                "cannot build an absolute URL without a host",
            ));
        }
        Ok(self.absolute())
    }

    /// Serialize the relative portion only: `path?query#fragment`.
    ///
    /// The query is omitted when empty; the fragment is omitted when unset
    /// or empty.
    pub fn build_relative(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query.encode());
        }
        if let Some(fragment) = self.fragment.as_deref() {
            if !fragment.is_empty() {
                out.push('#');
                out.push_str(fragment);
            }
        }
        out
    }

    /// Absolute serialization; callers have checked that a host is set.
    fn absolute(&self) -> String {
        let mut out = match self.scheme.as_deref() {
            Some(scheme) => format!("{scheme}://"),
            None => String::from("//"),
        };
        out.push_str(&self.authority());
        if !self.path.is_empty() && !self.path.starts_with('/') {
            out.push('/');
        }
        out.push_str(&self.build_relative());
        out
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl fmt::Display for Url {
    /// Same output as [`Url::build`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Url::parse(s)
    }
}

impl TryFrom<String> for Url {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Url::parse(&s)
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.build()
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.build())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
