use core::fmt;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// The characters escaped by [`form_encode`]; everything outside
/// `[A-Za-z0-9*\-._]`, with space handled separately as `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b' ');

/// Encodes a string in the `www-form` dialect: percent-encoding with
/// space written as `+`. Brackets are escaped on output.
pub(crate) fn form_encode(s: &str) -> String {
    utf8_percent_encode(s, FORM).to_string().replace(' ', "+")
}

/// Decodes a `www-form` string, mapping `+` back to space. Invalid UTF-8
/// octets are replaced rather than rejected; decoding is permissive.
pub(crate) fn form_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// One raw `name` or `name=value` unit of a query string.
///
/// Duplicates are allowed and order is preserved; the token sequence is
/// the canonical query state from which the nested tree is derived.
///
/// A token without `=` carries an absent value, distinct from a token
/// with an empty one:
///
/// ```
/// use muri::query::QueryToken;
///
/// assert_eq!(QueryToken::parse("a").value(), None);
/// assert_eq!(QueryToken::parse("a=").value(), Some(""));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryToken {
    name: String,
    value: Option<String>,
}

impl QueryToken {
    /// Creates a token from already-decoded parts.
    pub fn new(name: impl Into<String>, value: Option<String>) -> QueryToken {
        QueryToken {
            name: name.into(),
            value,
        }
    }

    /// Parses one raw token, splitting on the first `=` and
    /// form-decoding both sides.
    pub fn parse(raw: &str) -> QueryToken {
        match raw.split_once('=') {
            Some((name, value)) => QueryToken {
                name: form_decode(name),
                value: Some(form_decode(value)),
            },
            None => QueryToken {
                name: form_decode(raw),
                value: None,
            },
        }
    }

    /// The decoded name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decoded value, or `None` when the token had no `=`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consumes the token into its parts.
    pub fn into_pair(self) -> (String, Option<String>) {
        (self.name, self.value)
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&form_encode(&self.name))?;
        if let Some(value) = &self.value {
            write!(f, "={}", form_encode(value))?;
        }
        Ok(())
    }
}

impl From<(&str, &str)> for QueryToken {
    fn from((name, value): (&str, &str)) -> Self {
        QueryToken::new(name, Some(value.to_string()))
    }
}

impl From<(&str, Option<&str>)> for QueryToken {
    fn from((name, value): (&str, Option<&str>)) -> Self {
        QueryToken::new(name, value.map(str::to_string))
    }
}

impl From<(String, Option<String>)> for QueryToken {
    fn from((name, value): (String, Option<String>)) -> Self {
        QueryToken::new(name, value)
    }
}

/// Splits a raw query string into tokens.
///
/// Separators are `&` and `;`; spaces directly after a separator are
/// consumed. A leading `?` is ignored, and an empty string yields no
/// tokens at all.
pub fn tokenize(query: &str) -> Vec<QueryToken> {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return Vec::new();
    }
    query
        .split(['&', ';'])
        .enumerate()
        .map(|(i, raw)| {
            let raw = if i == 0 { raw } else { raw.trim_start_matches(' ') };
            QueryToken::parse(raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let token = QueryToken::parse("q=cowboy+hat%3F");
        assert_eq!(token.name(), "q");
        assert_eq!(token.value(), Some("cowboy hat?"));
        assert_eq!(token.to_string(), "q=cowboy+hat%3F");
    }

    #[test]
    fn valueless_token_stays_valueless() {
        let token = QueryToken::parse("flag");
        assert_eq!(token.value(), None);
        assert_eq!(token.to_string(), "flag");
    }

    #[test]
    fn brackets_are_escaped_on_output_only() {
        let token = QueryToken::parse("a%5Bb%5D=c");
        assert_eq!(token.name(), "a[b]");
        assert_eq!(QueryToken::new("a[b]", Some("c".into())).to_string(), "a%5Bb%5D=c");
    }

    #[test]
    fn tokenize_separators() {
        let tokens = tokenize("a=1&b=2; c=3");
        let names: Vec<&str> = tokens.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(tokenize(""), []);
        assert_eq!(tokenize("?a=1").len(), 1);
    }
}
