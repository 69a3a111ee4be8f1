//! The mutable URI value type.

mod ops;

use crate::error::{Error, FormatError, ValueError};
use crate::host::{join_opt, DomainParts};
use crate::protocol;
use crate::query::{decode, encode, tokenize, QueryMap, QueryToken, QueryValue};
use core::fmt;
use core::str::FromStr;
use std::cell::{OnceCell, RefCell};

/// A parsed, mutable URI.
///
/// Parsing is maximally permissive: structurally odd strings are
/// accepted, and contradictions (a password without a username, a
/// protocol without a host) only surface when the combined field is
/// read or the URI is serialized.
///
/// # Examples
///
/// ```
/// use muri::Uri;
///
/// let mut uri = Uri::parse("http://gusiev.com/posts/index.html?a=b#top")?;
/// assert_eq!(uri.protocol(), Some("http"));
/// assert_eq!(uri.host(), Some("gusiev.com"));
/// assert_eq!(uri.path(), Some("/posts/index.html"));
/// assert_eq!(uri.anchor(), Some("top"));
///
/// uri.set_ssl(true)?;
/// assert_eq!(uri.to_uri_string()?, "https://gusiev.com/posts/index.html?a=b#top");
/// # Ok::<_, muri::Error>(())
/// ```
///
/// A protocol-relative URI keeps its explicitly-empty protocol, which is
/// distinct from having none at all:
///
/// ```
/// use muri::Uri;
///
/// let relative = Uri::parse("//gusiev.com")?;
/// assert_eq!(relative.protocol(), Some(""));
/// assert_eq!(relative.to_uri_string()?, "//gusiev.com");
///
/// let bare = Uri::parse("gusiev.com")?;
/// assert_eq!(bare.protocol(), None);
/// assert_eq!(bare.to_uri_string()?, "gusiev.com");
/// # Ok::<_, muri::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Uri {
    protocol: Option<String>,
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u32>,
    path: Option<String>,
    anchor: Option<String>,
    query_tokens: Vec<QueryToken>,
    // Derived tree cache; the source of truth when `tree_authoritative`.
    query_tree: RefCell<Option<QueryMap>>,
    tree_authoritative: bool,
    // Host decomposition cache, cleared by every host-changing setter.
    domain_cache: OnceCell<DomainParts>,
}

impl Uri {
    /// Creates a URI with every part absent.
    pub fn new() -> Uri {
        Uri::default()
    }

    /// Parses a URI-like string.
    ///
    /// Splitting order is load-bearing: fragment first, then query, then
    /// protocol and authority, then path, so that later steps never see
    /// the earlier markers. The only value that can fail here is a
    /// malformed port.
    pub fn parse(input: &str) -> Result<Uri, Error> {
        let mut uri = Uri::new();
        let rest = uri.strip_anchor_and_query(input);
        let rest = uri.strip_protocol(&rest);
        let rest = match rest.find('/') {
            Some(i) => {
                let (authority, path) = rest.split_at(i);
                uri.set_path(Some(path));
                authority.to_string()
            }
            None => rest.to_string(),
        };
        uri.set_authority(Some(&rest))?;
        Ok(uri)
    }

    /// Creates a URI from a bag of parts, applying them in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use muri::{Part, Uri};
    ///
    /// let uri = Uri::from_parts([
    ///     (Part::Host, "gusiev.com".into()),
    ///     (Part::Path, "index.html".into()),
    /// ])?;
    /// assert_eq!(uri.to_uri_string()?, "gusiev.com/index.html");
    /// # Ok::<_, muri::Error>(())
    /// ```
    pub fn from_parts<I>(parts: I) -> Result<Uri, Error>
    where
        I: IntoIterator<Item = (crate::Part, crate::PartValue)>,
    {
        let mut uri = Uri::new();
        uri.replace(parts)?;
        Ok(uri)
    }

    // Splits off `#anchor`, then `?query`, returning what precedes them.
    // Later `#` characters belong to the anchor and are not re-split.
    fn strip_anchor_and_query(&mut self, s: &str) -> String {
        let (rest, anchor) = match s.split_once('#') {
            Some((rest, anchor)) => (rest, Some(anchor)),
            None => (s, None),
        };
        self.set_anchor(anchor);
        match rest.split_once('?') {
            Some((rest, query)) => {
                self.set_query_string(query);
                rest.to_string()
            }
            None => rest.to_string(),
        }
    }

    // Takes an explicit protocol off the front. `://` must occur before
    // any `/`; the split happens at the first `:`. A leading `//` marks
    // the protocol as explicitly empty when none was found.
    fn strip_protocol<'a>(&mut self, s: &'a str) -> &'a str {
        let mut rest = s;
        if let Some(i) = s.find("://") {
            if !s[..i].contains('/') {
                if let Some((protocol, after)) = s.split_once(':') {
                    self.set_protocol(Some(protocol));
                    rest = after;
                }
            }
        }
        if let Some(after) = rest.strip_prefix("//") {
            if self.protocol.is_none() {
                self.protocol = Some(String::new());
            }
            rest = after;
        }
        rest
    }

    /// The protocol, lowercased. `Some("")` marks a protocol-relative
    /// URI; `None` means no protocol marker at all.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Sets the protocol, stripping any trailing `://` decoration and
    /// lowercasing. `None` clears it; the empty string is the
    /// protocol-relative marker.
    pub fn set_protocol(&mut self, protocol: Option<&str>) {
        self.protocol = protocol.map(|p| {
            let p = p.strip_suffix('/').unwrap_or(p);
            let p = p.strip_suffix('/').unwrap_or(p);
            let p = p.strip_suffix(':').unwrap_or(p);
            p.to_ascii_lowercase()
        });
    }

    /// The host, lowercased. IPv6 literals keep their brackets.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The host, or the empty string when absent.
    pub fn host_or_empty(&self) -> &str {
        self.host.as_deref().unwrap_or("")
    }

    /// Sets the host, lowercasing it. `None` and the empty string clear.
    pub fn set_host(&mut self, host: Option<&str>) {
        self.host = match host {
            None | Some("") => None,
            Some(h) => Some(h.to_ascii_lowercase()),
        };
        self.domain_cache = OnceCell::new();
    }

    /// Sets the host from a sequence of labels, skipping absent ones.
    /// All labels absent clears the host.
    pub fn set_host_labels(&mut self, labels: &[Option<&str>]) {
        let joined = join_opt(labels);
        self.set_host(joined.as_deref());
    }

    /// The explicit port, if one was written out.
    pub fn port(&self) -> Option<u32> {
        self.port
    }

    /// The explicit port, or the protocol's default.
    pub fn port_or_default(&self) -> Option<u32> {
        self.port.or_else(|| self.default_port())
    }

    /// The default port of the current protocol, if known.
    pub fn default_port(&self) -> Option<u32> {
        self.protocol.as_deref().and_then(protocol::default_port)
    }

    /// Sets or clears the port.
    pub fn set_port(&mut self, port: Option<u32>) {
        self.port = port;
    }

    /// Sets the port from its string form. Whitespace padding is
    /// tolerated; the empty string clears the port.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPort`] unless the string is a
    /// non-negative integer.
    pub fn set_port_str(&mut self, port: &str) -> Result<(), ValueError> {
        let trimmed = port.trim();
        if trimmed.is_empty() {
            self.port = None;
            return Ok(());
        }
        match trimmed.parse::<u32>() {
            Ok(n) => {
                self.port = Some(n);
                Ok(())
            }
            Err(_) => Err(ValueError::InvalidPort(port.to_string())),
        }
    }

    // A port that must be written out: set and different from the default.
    fn explicit_port(&self) -> bool {
        self.port.is_some() && self.port != self.default_port()
    }

    /// The username, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Sets or clears the username.
    pub fn set_username(&mut self, username: Option<&str>) {
        self.username = username.map(str::to_string);
    }

    /// The password, if set.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Sets or clears the password.
    pub fn set_password(&mut self, password: Option<&str>) {
        self.password = password.map(str::to_string);
    }

    /// The path. `None` means no path at all, which is distinct from
    /// the root path `/`.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The path, or `/` when absent.
    pub fn path_or_root(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }

    /// Sets the path, prefixing `/` unless already rooted. `None` and
    /// the empty string clear it.
    pub fn set_path(&mut self, path: Option<&str>) {
        self.path = match path {
            None | Some("") => None,
            Some(p) if p.starts_with('/') => Some(p.to_string()),
            Some(p) => Some(format!("/{p}")),
        };
    }

    /// The anchor (fragment), if one was present.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Sets the anchor. The empty string means "no anchor".
    pub fn set_anchor(&mut self, anchor: Option<&str>) {
        self.anchor = match anchor {
            None | Some("") => None,
            Some(a) => Some(a.to_string()),
        };
    }

    /// `username:password`, omitting the password part when unset.
    ///
    /// # Errors
    ///
    /// A password without a username cannot be written out.
    pub fn userinfo(&self) -> Result<Option<String>, FormatError> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Some(format!("{username}:{password}"))),
            (Some(username), None) => Ok(Some(username.clone())),
            (None, Some(_)) => Err(FormatError::PasswordWithoutUsername),
            (None, None) => Ok(None),
        }
    }

    /// Sets username and password from a `username:password` string.
    /// `None` or an empty string clears both.
    pub fn set_userinfo(&mut self, userinfo: Option<&str>) {
        match userinfo {
            None | Some("") => {
                self.username = None;
                self.password = None;
            }
            Some(info) => match info.split_once(':') {
                Some((username, password)) => {
                    self.set_username(Some(username));
                    self.set_password(Some(password));
                }
                None => {
                    self.set_username(Some(info));
                    self.set_password(None);
                }
            },
        }
    }

    /// `host:port`, with the port written only when it differs from the
    /// protocol's default.
    ///
    /// # Errors
    ///
    /// An explicit port without a host cannot be written out.
    pub fn hostinfo(&self) -> Result<Option<String>, FormatError> {
        if !self.explicit_port() {
            return Ok(self.host.clone());
        }
        match (&self.host, self.port) {
            (Some(host), Some(port)) => Ok(Some(format!("{host}:{port}"))),
            _ => Err(FormatError::PortWithoutHost),
        }
    }

    /// Sets host and port from a `host:port` string. An IPv6 literal
    /// (`[...]`) is an opaque host token immune to colon-splitting; an
    /// explicit but empty port (`host:`) means no port.
    pub fn set_hostinfo(&mut self, hostinfo: &str) -> Result<(), ValueError> {
        if hostinfo.starts_with('[') && hostinfo.ends_with(']') {
            self.set_host(Some(hostinfo));
            self.port = None;
            return Ok(());
        }
        match hostinfo.rsplit_once(':').filter(|(host, _)| !host.is_empty()) {
            Some((host, port)) => {
                self.set_host(Some(host));
                self.set_port_str(port)
            }
            None => {
                self.set_host(Some(hostinfo));
                self.port = None;
                Ok(())
            }
        }
    }

    /// `userinfo@hostinfo`, or bare `hostinfo`.
    pub fn authority(&self) -> Result<Option<String>, FormatError> {
        let hostinfo = self.hostinfo()?;
        match self.userinfo()? {
            Some(userinfo) => Ok(Some(format!(
                "{userinfo}@{}",
                hostinfo.unwrap_or_default()
            ))),
            None => Ok(hostinfo),
        }
    }

    /// Sets userinfo, host and port from an authority string. `None`
    /// clears all of them.
    pub fn set_authority(&mut self, authority: Option<&str>) -> Result<(), ValueError> {
        let authority = authority.unwrap_or("");
        let rest = match authority.split_once('@') {
            Some((userinfo, rest)) => {
                self.set_userinfo(Some(userinfo));
                rest
            }
            None => {
                self.set_userinfo(None);
                authority
            }
        };
        self.set_hostinfo(rest)
    }

    /// `protocol://authority`, or bare `authority` when no protocol is
    /// set.
    ///
    /// # Errors
    ///
    /// A protocol without a host cannot be written out.
    pub fn location(&self) -> Result<Option<String>, FormatError> {
        match &self.protocol {
            Some(protocol) => {
                if self.host.is_none() {
                    return Err(FormatError::ProtocolWithoutHost);
                }
                let authority = self.authority()?.unwrap_or_default();
                if protocol.is_empty() {
                    Ok(Some(format!("//{authority}")))
                } else {
                    Ok(Some(format!("{protocol}://{authority}")))
                }
            }
            None => self.authority(),
        }
    }

    /// Sets protocol, userinfo, host and port from a location string.
    /// `None` clears all of them.
    pub fn set_location(&mut self, location: Option<&str>) -> Result<(), ValueError> {
        let location = location.unwrap_or("");
        let location = location.strip_suffix('/').unwrap_or(location);
        self.protocol = None;
        let rest = self.strip_protocol(location);
        let rest = rest.to_string();
        self.set_authority(Some(&rest))
    }

    /// The path (or `/`) plus the query string, when any tokens exist.
    pub fn request(&self) -> Result<String, Error> {
        let mut out = self.path_or_root().to_string();
        if let Some(query) = self.query_string()? {
            out.push('?');
            out.push_str(&query);
        }
        Ok(out)
    }

    /// Sets path, query and anchor from a request string.
    pub fn set_request(&mut self, request: &str) {
        let rest = self.strip_anchor_and_query(request);
        self.set_path(Some(&rest));
    }

    /// The request plus `#anchor`, when one is set.
    pub fn resource(&self) -> Result<String, Error> {
        let mut out = self.request()?;
        if let Some(anchor) = &self.anchor {
            out.push('#');
            out.push_str(anchor);
        }
        Ok(out)
    }

    /// Replaces path, query and anchor from a resource string.
    pub fn set_resource(&mut self, resource: &str) {
        self.set_anchor(None);
        self.set_query_tokens(Vec::new());
        self.set_path(None);
        self.set_request(resource);
    }

    fn domain_parts(&self) -> &DomainParts {
        self.domain_cache.get_or_init(|| match &self.host {
            Some(host) => DomainParts::of(host),
            None => DomainParts::default(),
        })
    }

    /// The domain name plus zone, e.g. `gusiev.com.ua`.
    pub fn domain(&self) -> Option<String> {
        self.domain_parts().domain()
    }

    /// Replaces everything after the subdomain.
    pub fn set_domain(&mut self, domain: Option<&str>) {
        let subdomain = self.subdomain();
        self.set_host_labels(&[subdomain.as_deref(), domain]);
    }

    /// The labels before the domain name, e.g. `www.blog`.
    pub fn subdomain(&self) -> Option<String> {
        self.domain_parts().subdomain.clone()
    }

    /// Replaces the labels before the domain.
    pub fn set_subdomain(&mut self, subdomain: Option<&str>) {
        let domain = self.domain();
        self.set_host_labels(&[subdomain, domain.as_deref()]);
    }

    /// The single label identifying the domain, e.g. `gusiev`.
    pub fn domain_name(&self) -> Option<String> {
        self.domain_parts().domain_name.clone()
    }

    /// Replaces the domain-name label, keeping subdomain and zone.
    pub fn set_domain_name(&mut self, name: Option<&str>) {
        let subdomain = self.subdomain();
        let zone = self.domain_zone();
        self.set_host_labels(&[subdomain.as_deref(), name, zone.as_deref()]);
    }

    /// The heuristically-identified domain suffix, e.g. `com.ua`.
    pub fn domain_zone(&self) -> Option<String> {
        self.domain_parts().zone.clone()
    }

    /// Replaces the domain zone, keeping subdomain and domain name.
    pub fn set_domain_zone(&mut self, zone: Option<&str>) {
        let subdomain = self.subdomain();
        let name = self.domain_name();
        self.set_host_labels(&[subdomain.as_deref(), name.as_deref(), zone]);
    }

    // Path segments including empty ones, so trailing slashes survive.
    fn path_tokens(&self) -> Vec<&str> {
        match &self.path {
            Some(path) => path.split('/').collect(),
            None => Vec::new(),
        }
    }

    /// The last path segment, when non-empty.
    pub fn filename(&self) -> Option<String> {
        self.path_tokens()
            .last()
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
    }

    /// Replaces the last path segment. `None` strips the filename,
    /// leaving the directory.
    pub fn set_filename(&mut self, name: Option<&str>) {
        let name = match name {
            Some(name) => name.strip_prefix('/').unwrap_or(name).to_string(),
            None => {
                if self.path.is_none() {
                    return;
                }
                String::new()
            }
        };
        let mut tokens: Vec<String> = self.path_tokens().iter().map(|s| s.to_string()).collect();
        match tokens.last_mut() {
            Some(last) => *last = name,
            None => tokens.push(name),
        }
        let path = tokens.join("/");
        self.set_path(Some(&path));
    }

    /// The path up to (and excluding) the filename.
    pub fn directory(&self) -> Option<String> {
        let tokens = self.path_tokens();
        match tokens.len() {
            0 => None,
            n => Some(tokens[..n - 1].join("/")),
        }
    }

    /// Replaces the directory, keeping the filename. `None` means the
    /// root directory.
    pub fn set_directory(&mut self, directory: Option<&str>) {
        let filename = self.filename();
        let mut dir = directory.unwrap_or("/").to_string();
        if filename.is_some() && !dir.ends_with('/') {
            dir.push('/');
        }
        let path = format!("{dir}{}", filename.unwrap_or_default());
        self.set_path(Some(&path));
    }

    /// The filename suffix after its last dot, when there is one.
    pub fn extension(&self) -> Option<String> {
        let filename = self.filename()?;
        let tokens: Vec<&str> = filename.split('.').collect();
        if tokens.len() > 1 {
            tokens.last().map(|e| e.to_string())
        } else {
            None
        }
    }

    /// Replaces (or, with `None`, removes) the filename's extension.
    ///
    /// # Errors
    ///
    /// There must be a filename to put the extension on.
    pub fn set_extension(&mut self, extension: Option<&str>) -> Result<(), FormatError> {
        let filename = self
            .filename()
            .ok_or(FormatError::ExtensionWithoutFilename)?;
        let mut tokens: Vec<&str> = filename.split('.').collect();
        match extension {
            Some(ext) if tokens.len() == 1 => tokens.push(ext),
            Some(ext) => {
                if let Some(last) = tokens.last_mut() {
                    *last = ext;
                }
            }
            None if tokens.len() > 1 => {
                tokens.pop();
            }
            None => return Ok(()),
        }
        let joined = tokens.join(".");
        self.set_filename(Some(&joined));
        Ok(())
    }

    /// Whether the current protocol is secure; `false` when the protocol
    /// is unknown or unset.
    pub fn ssl(&self) -> bool {
        self.protocol
            .as_deref()
            .is_some_and(protocol::is_secure)
    }

    /// Switches the protocol to its secure or insecure counterpart.
    ///
    /// # Errors
    ///
    /// The current protocol must appear in the secure/insecure pairing
    /// table.
    pub fn set_ssl(&mut self, ssl: bool) -> Result<(), ValueError> {
        let target = self
            .protocol
            .as_deref()
            .and_then(|p| protocol::for_ssl(p, ssl));
        match target {
            Some(protocol) => {
                self.set_protocol(Some(protocol));
                Ok(())
            }
            None => Err(ValueError::SslNotSupported(self.protocol.clone())),
        }
    }

    /// Whether the protocol serves web pages.
    pub fn is_web_protocol(&self) -> bool {
        self.protocol
            .as_deref()
            .is_some_and(|p| protocol::WEB_PROTOCOLS.contains(&p))
    }

    /// Whether the effective port is a default web port.
    pub fn is_default_web_port(&self) -> bool {
        self.port_or_default().is_some_and(|port| {
            protocol::WEB_PROTOCOLS
                .iter()
                .any(|p| protocol::default_port(p) == Some(port))
        })
    }

    /// Whether the path points at a site's home page.
    pub fn is_home_page(&self) -> bool {
        let path = self.path_or_root();
        path == "/" || path == "/index.html"
    }

    /// Whether the canonical string is a valid RFC 3986 URI reference,
    /// checked by an external strict parser.
    ///
    /// # Errors
    ///
    /// Serialization itself may fail; validity is only defined for URIs
    /// that can be written out.
    pub fn is_rfc3986(&self) -> Result<bool, Error> {
        let uri = self.to_uri_string()?;
        Ok(fluent_uri::UriRef::parse(uri.as_str()).is_ok())
    }

    /// The ordered query token sequence.
    ///
    /// When the tree is the source of truth the tokens are re-encoded
    /// from it, which can fail; otherwise this is a copy of the stored
    /// sequence.
    pub fn query_tokens(&self) -> Result<Vec<QueryToken>, Error> {
        if self.tree_authoritative {
            if let Some(tree) = &*self.query_tree.borrow() {
                return encode(&QueryValue::Map(tree.clone()));
            }
        }
        Ok(self.query_tokens.clone())
    }

    /// Replaces the query with a token sequence, making tokens the
    /// source of truth again.
    pub fn set_query_tokens(&mut self, tokens: Vec<QueryToken>) {
        self.query_tokens = tokens;
        *self.query_tree.get_mut() = None;
        self.tree_authoritative = false;
    }

    /// Replaces the query from a raw query string.
    pub fn set_query_string(&mut self, query: &str) {
        self.set_query_tokens(tokenize(query));
    }

    /// The query string, or `None` when there are no tokens at all.
    pub fn query_string(&self) -> Result<Option<String>, Error> {
        let tokens = self.query_tokens()?;
        if tokens.is_empty() {
            return Ok(None);
        }
        let strings: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        Ok(Some(strings.join("&")))
    }

    /// The nested query tree, decoded from the tokens (and cached) or
    /// returned directly when the tree is the source of truth.
    ///
    /// # Errors
    ///
    /// Decoding fails on a sequence/mapping shape conflict.
    pub fn query(&self) -> Result<QueryMap, Error> {
        if let Some(tree) = &*self.query_tree.borrow() {
            return Ok(tree.clone());
        }
        let tree = decode(&self.query_tokens)?;
        *self.query_tree.borrow_mut() = Some(tree.clone());
        Ok(tree)
    }

    /// A mutable view of the query tree. Materializes the tree and makes
    /// it the source of truth until tokens are reassigned.
    pub fn query_mut(&mut self) -> Result<&mut QueryMap, Error> {
        if self.query_tree.get_mut().is_none() {
            let tree = decode(&self.query_tokens)?;
            *self.query_tree.get_mut() = Some(tree);
        }
        self.tree_authoritative = true;
        match self.query_tree.get_mut() {
            Some(tree) => Ok(tree),
            None => unreachable!("query tree was just materialized"),
        }
    }

    /// Replaces the query with a tree, making it the source of truth.
    pub fn set_query_map(&mut self, map: QueryMap) {
        self.query_tokens = Vec::new();
        *self.query_tree.get_mut() = Some(map);
        self.tree_authoritative = true;
    }

    /// Serializes the canonical string form.
    ///
    /// # Errors
    ///
    /// Fails on the lazily-detected contradictions: password without
    /// username, protocol without host, explicit port without host, and
    /// on query trees the bracket grammar cannot express.
    ///
    /// # Examples
    ///
    /// ```
    /// use muri::Uri;
    ///
    /// let mut uri = Uri::new();
    /// uri.set_protocol(Some("http"));
    /// assert!(uri.to_uri_string().is_err());
    ///
    /// uri.set_host(Some("gusiev.com"));
    /// assert_eq!(uri.to_uri_string()?, "http://gusiev.com");
    /// # Ok::<_, muri::Error>(())
    /// ```
    pub fn to_uri_string(&self) -> Result<String, Error> {
        let mut out = String::new();
        if let Some(location) = self.location()? {
            out.push_str(&location);
        }
        if self.host.is_some() {
            if let Some(path) = &self.path {
                out.push_str(path);
            }
        } else {
            out.push_str(self.path_or_root());
        }
        if let Some(query) = self.query_string()? {
            out.push('?');
            out.push_str(&query);
        }
        if let Some(anchor) = &self.anchor {
            out.push('#');
            out.push_str(anchor);
        }
        Ok(out)
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

/// Equality is equality of canonical strings; query token order is part
/// of the identity and is never normalized. A URI that cannot serialize
/// is equal to nothing, not even itself.
impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        match (self.to_uri_string(), other.to_uri_string()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("protocol", &self.protocol)
            .field("username", &self.username)
            .field("password", &self.password)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query_tokens)
            .field("anchor", &self.anchor)
            .finish()
    }
}
