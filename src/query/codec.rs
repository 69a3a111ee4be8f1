//! Decoding token sequences into query trees and encoding them back.
//!
//! The bracket-suffix grammar on a token name is parsed by recursive
//! descent into a root key plus a path of segments, which is then folded
//! into the tree. Decoding never fabricates bracket structure that was
//! not present, and a key used with conflicting shapes is an error,
//! never a silent coercion.

use super::{QueryMap, QueryToken, QueryValue};
use crate::error::{Error, QueryShape, QueryTypeError, ValueError};

/// One step of a bracket-suffix path.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Seg {
    /// `[]`: append to a sequence.
    Append,
    /// `[key]` (or a bare trailing key): descend into a mapping.
    Key(String),
}

/// Parses a token name into its root key and bracket-suffix path.
///
/// Brackets before the root key are ignored, as are stray closing
/// brackets between segments. Returns `None` for a name with no key
/// at all; such tokens stay in the token sequence but do not reach
/// the tree.
fn key_path(name: &str) -> Option<(String, Vec<Seg>)> {
    let rest = name.trim_start_matches(['[', ']']);
    let end = rest.find(['[', ']']).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let root = rest[..end].to_string();
    let mut rest = rest[end..].trim_start_matches(']');

    let mut segs = Vec::new();
    while !rest.is_empty() {
        if let Some(r) = rest.strip_prefix("[]") {
            segs.push(Seg::Append);
            rest = r;
            continue;
        }
        let r = rest.trim_start_matches(['[', ']']);
        if r.is_empty() {
            break;
        }
        let end = r.find(['[', ']']).unwrap_or(r.len());
        segs.push(Seg::Key(r[..end].to_string()));
        rest = r[end..].trim_start_matches(']');
    }
    Some((root, segs))
}

fn conflict(key: &str, expected: QueryShape) -> QueryTypeError {
    QueryTypeError {
        key: key.to_string(),
        expected,
    }
}

fn assign(
    map: &mut QueryMap,
    key: &str,
    segs: &[Seg],
    value: Option<String>,
) -> Result<(), QueryTypeError> {
    match segs.first() {
        // `key`: plain scalar, last occurrence wins even over containers.
        None => {
            map.insert(key, QueryValue::Scalar(value));
            Ok(())
        }
        // `key[sub]...`: the slot must be absent or a mapping.
        Some(Seg::Key(sub)) => {
            let slot = map.slot(key, QueryValue::Map(QueryMap::new()));
            let QueryValue::Map(inner) = slot else {
                return Err(conflict(key, QueryShape::Mapping));
            };
            assign(inner, sub, &segs[1..], value)
        }
        // `key[]...`: the slot must be absent or a sequence.
        Some(Seg::Append) => {
            let slot = map.slot(key, QueryValue::Seq(Vec::new()));
            let QueryValue::Seq(seq) = slot else {
                return Err(conflict(key, QueryShape::Sequence));
            };
            match segs.get(1) {
                // `key[]`: append a scalar element.
                None => {
                    seq.push(QueryValue::Scalar(value));
                    Ok(())
                }
                // `key[][sub]...`: consecutive tokens group into the last
                // element until a subkey repeats, which starts a new one.
                Some(Seg::Key(sub)) => {
                    let rest = &segs[2..];
                    match seq.last_mut() {
                        Some(QueryValue::Map(last)) if !last.contains_key(sub) => {
                            assign(last, sub, rest, value)
                        }
                        _ => {
                            let mut fresh = QueryMap::new();
                            assign(&mut fresh, sub, rest, value)?;
                            seq.push(QueryValue::Map(fresh));
                            Ok(())
                        }
                    }
                }
                // `key[][]...`: the grammar cannot address into a nested
                // sequence; the element degenerates to an absent scalar.
                Some(Seg::Append) => {
                    seq.push(QueryValue::NONE);
                    Ok(())
                }
            }
        }
    }
}

/// Decodes an ordered token sequence into a query tree.
///
/// # Examples
///
/// ```
/// use muri::query::{decode, tokenize, QueryValue};
///
/// let tree = decode(&tokenize("x[y][z]=1"))?;
/// let QueryValue::Map(x) = tree.get("x").unwrap() else { unreachable!() };
/// let QueryValue::Map(y) = x.get("y").unwrap() else { unreachable!() };
/// assert_eq!(y.get("z"), Some(&QueryValue::from("1")));
/// # Ok::<_, muri::QueryTypeError>(())
/// ```
///
/// # Errors
///
/// Returns a [`QueryTypeError`] naming the offending key when a key is
/// used as both a sequence and a mapping.
pub fn decode(tokens: &[QueryToken]) -> Result<QueryMap, QueryTypeError> {
    let mut map = QueryMap::new();
    for token in tokens {
        let Some((root, segs)) = key_path(token.name()) else {
            continue;
        };
        assign(&mut map, &root, &segs, token.value().map(str::to_string))?;
    }
    Ok(map)
}

fn encode_value(
    tokens: &mut Vec<QueryToken>,
    namespace: Option<&str>,
    value: &QueryValue,
) -> Result<(), Error> {
    match value {
        // A scalar with no enclosing key has no place in a query string.
        QueryValue::Scalar(v) => {
            if let Some(ns) = namespace {
                tokens.push(QueryToken::new(ns, v.clone()));
            }
            Ok(())
        }
        QueryValue::Map(map) => {
            for (key, value) in map.iter() {
                if value.is_empty_container() {
                    continue;
                }
                let child = match namespace {
                    Some(ns) => format!("{ns}[{key}]"),
                    None => key.to_string(),
                };
                encode_value(tokens, Some(&child), value)?;
            }
            Ok(())
        }
        QueryValue::Seq(items) => {
            let Some(ns) = namespace else {
                return Err(ValueError::SequenceWithoutKey.into());
            };
            let item_ns = format!("{ns}[]");
            for item in items {
                match item {
                    QueryValue::Seq(_) => {
                        return Err(ValueError::NestedSequence(ns.to_string()).into());
                    }
                    item => encode_value(tokens, Some(&item_ns), item)?,
                }
            }
            Ok(())
        }
    }
}

/// Encodes a query tree into an ordered token sequence, depth-first and
/// in insertion order.
///
/// A key holding an empty sequence or mapping is omitted entirely. An
/// absent scalar encodes as the bare key with no `=`, symmetric with
/// [`decode`]. A sequence needs an enclosing key, and a sequence directly
/// inside a sequence cannot be expressed by the grammar; both are errors.
///
/// # Examples
///
/// ```
/// use muri::query::{encode, QueryMap, QueryValue};
///
/// let tree = QueryValue::Map(QueryMap::from([
///     ("a", QueryValue::from(vec!["1", "2"])),
///     ("b", QueryValue::from("blah")),
/// ]));
/// let tokens = encode(&tree)?;
/// let s: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
/// assert_eq!(s.join("&"), "a%5B%5D=1&a%5B%5D=2&b=blah");
/// # Ok::<_, muri::Error>(())
/// ```
pub fn encode(value: &QueryValue) -> Result<Vec<QueryToken>, Error> {
    let mut tokens = Vec::new();
    encode_value(&mut tokens, None, value)?;
    Ok(tokens)
}
