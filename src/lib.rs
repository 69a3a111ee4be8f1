#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A permissive URI/URL value type with mutable parts.
//!
//! [`Uri`] parses almost anything: partial references, bare hosts,
//! protocol-relative strings. Structural contradictions (a password
//! without a username, a protocol without a host) are detected lazily,
//! when the combined part is read or the URI is serialized, never at
//! parse time. Strict RFC 3986 validity is available as a predicate via
//! [`Uri::is_rfc3986`].
//!
//! Every part is addressable by name through the [`Part`] enum, which
//! powers the four bulk mutation operations: [`update`], [`merge`],
//! [`defaults`] and [`replace`].
//!
//! ```
//! use muri::{Part, Uri};
//!
//! let mut uri = Uri::parse("http://gusiev.com/index.html?a=1")?;
//! assert_eq!(uri.extension(), Some("html".to_string()));
//! assert_eq!(uri.domain_zone(), Some("com".to_string()));
//!
//! uri.merge([(Part::Query, "b=2".into())])?;
//! assert_eq!(uri.to_uri_string()?, "http://gusiev.com/index.html?a=1&b=2");
//! # Ok::<_, muri::Error>(())
//! ```
//!
//! The query has two interchangeable views: an ordered token sequence
//! (duplicates allowed) and a nested tree decoded from `key[sub][]`
//! bracket suffixes. See the [`query`] module.
//!
//! # Feature flags
//!
//! - `serde`: string-form `Serialize` and `Deserialize` impls for
//!   [`Uri`].

mod error;
pub mod host;
mod part;
pub mod protocol;
pub mod query;
#[cfg(feature = "serde")]
mod serde;
mod uri;

pub use error::{Error, FormatError, QueryShape, QueryTypeError, ValueError};
pub use part::{Part, PartValue};
pub use uri::Uri;

use query::{QueryMap, QueryToken, QueryValue};

/// Parses a URI-like string. Shorthand for [`Uri::parse`].
pub fn parse(uri: &str) -> Result<Uri, Error> {
    Uri::parse(uri)
}

/// Parses, applies each part through its setter (query-bearing parts
/// overwrite), and re-serializes.
///
/// # Examples
///
/// ```
/// use muri::{Part, query::QueryMap};
///
/// let out = muri::update("/index.html?a=b", [
///     (Part::Query, QueryMap::from([("c", "d")]).into()),
/// ])?;
/// assert_eq!(out, "/index.html?c=d");
/// # Ok::<_, muri::Error>(())
/// ```
pub fn update<I>(uri: &str, parts: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (Part, PartValue)>,
{
    let mut uri = Uri::parse(uri)?;
    uri.update(parts)?;
    uri.to_uri_string()
}

/// Parses, applies each part with query-bearing parts combining into
/// the existing query, and re-serializes.
pub fn merge<I>(uri: &str, parts: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (Part, PartValue)>,
{
    let mut uri = Uri::parse(uri)?;
    uri.merge(parts)?;
    uri.to_uri_string()
}

/// Parses, assigns only the parts that are currently absent or blank,
/// and re-serializes.
pub fn defaults<I>(uri: &str, parts: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (Part, PartValue)>,
{
    let mut uri = Uri::parse(uri)?;
    uri.defaults(parts)?;
    uri.to_uri_string()
}

/// Parses, overwrites each given part, and re-serializes.
pub fn replace<I>(uri: &str, parts: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (Part, PartValue)>,
{
    let mut uri = Uri::parse(uri)?;
    uri.replace(parts)?;
    uri.to_uri_string()
}

/// Splits a query string into its ordered tokens.
pub fn query_tokens(query: &str) -> Vec<QueryToken> {
    query::tokenize(query)
}

/// Decodes a query string into a nested tree.
///
/// # Examples
///
/// ```
/// use muri::query::QueryValue;
///
/// let tree = muri::parse_query("x[y][z]=1")?;
/// let QueryValue::Map(y) = tree.get("x").unwrap() else { panic!() };
/// assert_eq!(y.get("y").unwrap(), &QueryValue::Map([("z", "1")].into()));
/// # Ok::<_, muri::Error>(())
/// ```
pub fn parse_query(query: &str) -> Result<QueryMap, Error> {
    Ok(query::decode(&query::tokenize(query))?)
}

/// Encodes a query tree (or any query value) into a query string.
///
/// # Errors
///
/// A bare or nested sequence has no bracket-suffix spelling.
pub fn serialize_query(query: impl Into<QueryValue>) -> Result<String, Error> {
    let tokens = query::encode(&query.into())?;
    let strings: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    Ok(strings.join("&"))
}
