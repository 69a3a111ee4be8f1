//! The closed set of name-addressable URI parts.
//!
//! Generic get/set and the mutation operations dispatch on [`Part`]
//! with an explicit match, so an illegal part name is an error at
//! construction, not a lookup failure at use. Aliases forward to one
//! canonical part and never duplicate state.

use crate::error::ValueError;
use crate::query::{QueryMap, QueryToken};
use core::fmt;
use core::str::FromStr;

/// A name-addressable part of a [`Uri`].
///
/// [`Uri`]: crate::Uri
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Part {
    /// The protocol; aliases `schema`, `scheme`.
    Protocol,
    /// The fragment; alias `fragment`.
    Anchor,
    /// The host; alias `hostname`.
    Host,
    /// The username; alias `user`.
    Username,
    /// The password.
    Password,
    /// The port number.
    Port,
    /// The path.
    Path,
    /// The nested query tree.
    Query,
    /// The ordered query token sequence.
    QueryTokens,
    /// The raw query string.
    QueryString,
    /// `userinfo@host:port`.
    Authority,
    /// `username:password`.
    Userinfo,
    /// `host:port`.
    Hostinfo,
    /// `protocol://authority`.
    Location,
    /// Path plus query string; alias `request_uri`.
    Request,
    /// Request plus anchor.
    Resource,
    /// Domain name plus zone.
    Domain,
    /// The single domain-name label.
    DomainName,
    /// The trailing domain suffix labels.
    DomainZone,
    /// The labels before the domain name.
    Subdomain,
    /// The path up to the filename.
    Directory,
    /// The last path segment, when non-empty.
    Filename,
    /// The filename suffix after its last dot.
    Extension,
    /// Whether the protocol is secure.
    Ssl,
}

impl Part {
    /// The canonical name of the part.
    pub fn name(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Anchor => "anchor",
            Self::Host => "host",
            Self::Username => "username",
            Self::Password => "password",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::QueryTokens => "query_tokens",
            Self::QueryString => "query_string",
            Self::Authority => "authority",
            Self::Userinfo => "userinfo",
            Self::Hostinfo => "hostinfo",
            Self::Location => "location",
            Self::Request => "request",
            Self::Resource => "resource",
            Self::Domain => "domain",
            Self::DomainName => "domainname",
            Self::DomainZone => "domainzone",
            Self::Subdomain => "subdomain",
            Self::Directory => "directory",
            Self::Filename => "filename",
            Self::Extension => "extension",
            Self::Ssl => "ssl",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Part {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "protocol" | "schema" | "scheme" => Self::Protocol,
            "anchor" | "fragment" => Self::Anchor,
            "host" | "hostname" => Self::Host,
            "username" | "user" => Self::Username,
            "password" => Self::Password,
            "port" => Self::Port,
            "path" => Self::Path,
            "query" => Self::Query,
            "query_tokens" => Self::QueryTokens,
            "query_string" => Self::QueryString,
            "authority" => Self::Authority,
            "userinfo" => Self::Userinfo,
            "hostinfo" => Self::Hostinfo,
            "location" => Self::Location,
            "request" | "request_uri" => Self::Request,
            "resource" => Self::Resource,
            "domain" => Self::Domain,
            "domainname" | "domain_name" => Self::DomainName,
            "domainzone" | "domain_zone" => Self::DomainZone,
            "subdomain" => Self::Subdomain,
            "directory" => Self::Directory,
            "filename" => Self::Filename,
            "extension" => Self::Extension,
            "ssl" => Self::Ssl,
            _ => return Err(ValueError::UnknownPart(s.to_string())),
        })
    }
}

/// A value assignable to a [`Part`].
///
/// The `From` impls make part bags read naturally:
///
/// ```
/// use muri::{Part, PartValue};
///
/// let parts: Vec<(Part, PartValue)> = vec![
///     (Part::Host, "gusiev.com".into()),
///     (Part::Port, 3000.into()),
///     (Part::Anchor, PartValue::Null),
/// ];
/// # let _ = parts;
/// ```
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PartValue {
    /// Clears the part.
    Null,
    /// A string value; accepted by every string-shaped part.
    Str(String),
    /// An integer value, for the port.
    Int(u32),
    /// A boolean value, for the `ssl` part.
    Bool(bool),
    /// A token sequence, for the query parts.
    Tokens(Vec<QueryToken>),
    /// A query tree, for the query parts.
    Tree(QueryMap),
}

impl PartValue {
    /// Whether this value counts as unset for the `defaults` operation.
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for PartValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PartValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Option<&str>> for PartValue {
    fn from(s: Option<&str>) -> Self {
        match s {
            Some(s) => Self::Str(s.to_string()),
            None => Self::Null,
        }
    }
}

impl From<Option<String>> for PartValue {
    fn from(s: Option<String>) -> Self {
        match s {
            Some(s) => Self::Str(s),
            None => Self::Null,
        }
    }
}

impl From<u32> for PartValue {
    fn from(n: u32) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for PartValue {
    fn from(n: i32) -> Self {
        // Negative ports are rejected by the port setter, not here;
        // clamp-free conversion keeps the error observable.
        if n < 0 {
            Self::Str(n.to_string())
        } else {
            Self::Int(n as u32)
        }
    }
}

impl From<bool> for PartValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<QueryToken>> for PartValue {
    fn from(tokens: Vec<QueryToken>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<QueryMap> for PartValue {
    fn from(map: QueryMap) -> Self {
        Self::Tree(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_forward_to_canonical_parts() {
        assert_eq!("schema".parse::<Part>().unwrap(), Part::Protocol);
        assert_eq!("scheme".parse::<Part>().unwrap(), Part::Protocol);
        assert_eq!("fragment".parse::<Part>().unwrap(), Part::Anchor);
        assert_eq!("hostname".parse::<Part>().unwrap(), Part::Host);
        assert_eq!("user".parse::<Part>().unwrap(), Part::Username);
        assert_eq!("request_uri".parse::<Part>().unwrap(), Part::Request);
    }

    #[test]
    fn unknown_names_fail_at_construction() {
        let err = "bogus".parse::<Part>().unwrap_err();
        assert_eq!(err, ValueError::UnknownPart("bogus".into()));
    }
}
