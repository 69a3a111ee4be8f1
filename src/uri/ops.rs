//! Name-keyed access and the part-bag mutation operations.

use super::Uri;
use crate::error::{Error, ValueError};
use crate::part::{Part, PartValue};
use crate::query::{decode, tokenize, QueryMap};

// Coerces a part value into an optional string, the way most parts
// accept their input. Token sequences and trees have no string shape.
fn coerce_str(part: Part, value: PartValue) -> Result<Option<String>, ValueError> {
    match value {
        PartValue::Null => Ok(None),
        PartValue::Str(s) => Ok(Some(s)),
        PartValue::Int(n) => Ok(Some(n.to_string())),
        PartValue::Bool(b) => Ok(Some(b.to_string())),
        PartValue::Tokens(_) | PartValue::Tree(_) => Err(ValueError::Unassignable(part.name())),
    }
}

impl Uri {
    /// Reads a part by name.
    ///
    /// Returns `None` when the part is absent. Reading a combined part
    /// can surface the lazily-detected contradictions.
    ///
    /// # Examples
    ///
    /// ```
    /// use muri::{Part, Uri};
    ///
    /// let uri = Uri::parse("http://gusiev.com:3000/index.html")?;
    /// assert_eq!(uri.get(Part::Hostinfo)?, Some("gusiev.com:3000".into()));
    /// assert_eq!(uri.get(Part::Extension)?, Some("html".into()));
    /// assert_eq!(uri.get(Part::Anchor)?, None);
    /// # Ok::<_, muri::Error>(())
    /// ```
    pub fn get(&self, part: Part) -> Result<Option<PartValue>, Error> {
        Ok(match part {
            Part::Protocol => self.protocol().map(Into::into),
            Part::Anchor => self.anchor().map(Into::into),
            Part::Host => self.host().map(Into::into),
            Part::Username => self.username().map(Into::into),
            Part::Password => self.password().map(Into::into),
            Part::Port => self.port().map(PartValue::Int),
            Part::Path => self.path().map(Into::into),
            Part::Query => Some(PartValue::Tree(self.query()?)),
            Part::QueryTokens => Some(PartValue::Tokens(self.query_tokens()?)),
            Part::QueryString => self.query_string()?.map(PartValue::Str),
            Part::Authority => self.authority()?.map(PartValue::Str),
            Part::Userinfo => self.userinfo()?.map(PartValue::Str),
            Part::Hostinfo => self.hostinfo()?.map(PartValue::Str),
            Part::Location => self.location()?.map(PartValue::Str),
            Part::Request => Some(PartValue::Str(self.request()?)),
            Part::Resource => Some(PartValue::Str(self.resource()?)),
            Part::Domain => self.domain().map(PartValue::Str),
            Part::DomainName => self.domain_name().map(PartValue::Str),
            Part::DomainZone => self.domain_zone().map(PartValue::Str),
            Part::Subdomain => self.subdomain().map(PartValue::Str),
            Part::Directory => self.directory().map(PartValue::Str),
            Part::Filename => self.filename().map(PartValue::Str),
            Part::Extension => self.extension().map(PartValue::Str),
            Part::Ssl => Some(PartValue::Bool(self.ssl())),
        })
    }

    /// Assigns a part by name, routing to the corresponding setter.
    pub fn set(&mut self, part: Part, value: PartValue) -> Result<(), Error> {
        match part {
            Part::Protocol => {
                let v = coerce_str(part, value)?;
                self.set_protocol(v.as_deref());
            }
            Part::Anchor => {
                let v = coerce_str(part, value)?;
                self.set_anchor(v.as_deref());
            }
            Part::Host => {
                let v = coerce_str(part, value)?;
                self.set_host(v.as_deref());
            }
            Part::Username => {
                let v = coerce_str(part, value)?;
                self.set_username(v.as_deref());
            }
            Part::Password => {
                let v = coerce_str(part, value)?;
                self.set_password(v.as_deref());
            }
            Part::Port => match value {
                PartValue::Null => self.set_port(None),
                PartValue::Int(n) => self.set_port(Some(n)),
                PartValue::Str(s) => self.set_port_str(&s)?,
                other => return Err(ValueError::InvalidPort(format!("{other:?}")).into()),
            },
            Part::Path => {
                let v = coerce_str(part, value)?;
                self.set_path(v.as_deref());
            }
            Part::Query | Part::QueryTokens | Part::QueryString => match value {
                PartValue::Null => self.set_query_tokens(Vec::new()),
                PartValue::Str(s) => self.set_query_string(&s),
                PartValue::Tokens(tokens) => self.set_query_tokens(tokens),
                PartValue::Tree(map) => self.set_query_map(map),
                _ => return Err(ValueError::Unassignable(part.name()).into()),
            },
            Part::Authority => {
                let v = coerce_str(part, value)?;
                self.set_authority(v.as_deref())?;
            }
            Part::Userinfo => {
                let v = coerce_str(part, value)?;
                self.set_userinfo(v.as_deref());
            }
            Part::Hostinfo => match coerce_str(part, value)? {
                Some(s) => self.set_hostinfo(&s)?,
                None => {
                    self.set_host(None);
                    self.set_port(None);
                }
            },
            Part::Location => {
                let v = coerce_str(part, value)?;
                self.set_location(v.as_deref())?;
            }
            Part::Request => {
                let v = coerce_str(part, value)?;
                self.set_request(v.as_deref().unwrap_or(""));
            }
            Part::Resource => {
                let v = coerce_str(part, value)?;
                self.set_resource(v.as_deref().unwrap_or(""));
            }
            Part::Domain => {
                let v = coerce_str(part, value)?;
                self.set_domain(v.as_deref());
            }
            Part::DomainName => {
                let v = coerce_str(part, value)?;
                self.set_domain_name(v.as_deref());
            }
            Part::DomainZone => {
                let v = coerce_str(part, value)?;
                self.set_domain_zone(v.as_deref());
            }
            Part::Subdomain => {
                let v = coerce_str(part, value)?;
                self.set_subdomain(v.as_deref());
            }
            Part::Directory => {
                let v = coerce_str(part, value)?;
                self.set_directory(v.as_deref());
            }
            Part::Filename => {
                let v = coerce_str(part, value)?;
                self.set_filename(v.as_deref());
            }
            Part::Extension => {
                let v = coerce_str(part, value)?;
                self.set_extension(v.as_deref())?;
            }
            Part::Ssl => match value {
                PartValue::Bool(b) => self.set_ssl(b)?,
                PartValue::Null => self.set_ssl(false)?,
                _ => return Err(ValueError::Unassignable(part.name()).into()),
            },
        }
        Ok(())
    }

    /// Applies each part in caller order through its setter. A
    /// query-bearing part overwrites the existing query, it does not
    /// merge.
    ///
    /// # Examples
    ///
    /// ```
    /// use muri::{Part, Uri};
    /// use muri::query::QueryMap;
    ///
    /// let mut uri = Uri::parse("/index.html?a=b")?;
    /// uri.update([(Part::Query, QueryMap::from([("c", "d")]).into())])?;
    /// assert_eq!(uri.to_uri_string()?, "/index.html?c=d");
    /// # Ok::<_, muri::Error>(())
    /// ```
    pub fn update<I>(&mut self, parts: I) -> Result<&mut Uri, Error>
    where
        I: IntoIterator<Item = (Part, PartValue)>,
    {
        for (part, value) in parts {
            self.set(part, value)?;
        }
        Ok(self)
    }

    /// Like [`update`], except query-bearing parts combine with the
    /// existing query instead of overwriting it.
    ///
    /// A tree argument deep-merges into the existing tree, overwriting
    /// on key collision; a string or token argument is decoded and
    /// appended to the token sequence, so duplicate keys legitimately
    /// accumulate.
    ///
    /// [`update`]: Self::update
    ///
    /// # Examples
    ///
    /// ```
    /// use muri::{Part, Uri};
    /// use muri::query::QueryMap;
    ///
    /// let mut uri = Uri::parse("//host?a=1")?;
    /// uri.merge([(Part::Query, QueryMap::from([("b", 2i64)]).into())])?;
    /// assert_eq!(uri.to_uri_string()?, "//host?a=1&b=2");
    ///
    /// let mut uri = Uri::parse("//host?a=1")?;
    /// uri.merge([(Part::Query, "a=2".into())])?;
    /// assert_eq!(uri.to_uri_string()?, "//host?a=1&a=2");
    /// # Ok::<_, muri::Error>(())
    /// ```
    pub fn merge<I>(&mut self, parts: I) -> Result<&mut Uri, Error>
    where
        I: IntoIterator<Item = (Part, PartValue)>,
    {
        for (part, value) in parts {
            match part {
                Part::Query | Part::QueryTokens | Part::QueryString => {
                    self.merge_query(value)?;
                }
                _ => self.set(part, value)?,
            }
        }
        Ok(self)
    }

    /// Combines a value into the existing query: trees deep-merge,
    /// strings and token sequences append.
    pub fn merge_query(&mut self, value: PartValue) -> Result<(), Error> {
        match value {
            PartValue::Tree(map) => {
                self.query_mut()?.deep_merge(map);
                Ok(())
            }
            PartValue::Str(s) => {
                let mut tokens = self.query_tokens()?;
                tokens.extend(tokenize(&s));
                self.set_query_tokens(tokens);
                Ok(())
            }
            PartValue::Tokens(extra) => {
                let mut tokens = self.query_tokens()?;
                tokens.extend(extra);
                self.set_query_tokens(tokens);
                Ok(())
            }
            PartValue::Null => Ok(()),
            _ => Err(ValueError::Unassignable(Part::Query.name()).into()),
        }
    }

    /// Like [`update`], but a part is only assigned when its current
    /// value is absent, `false` or empty; for the query, only top-level
    /// keys not already present are added.
    ///
    /// [`update`]: Self::update
    pub fn defaults<I>(&mut self, parts: I) -> Result<&mut Uri, Error>
    where
        I: IntoIterator<Item = (Part, PartValue)>,
    {
        for (part, value) in parts {
            match part {
                Part::Query | Part::QueryTokens | Part::QueryString => {
                    let incoming: QueryMap = match value {
                        PartValue::Tree(map) => map,
                        PartValue::Str(s) => decode(&tokenize(&s))?,
                        PartValue::Tokens(tokens) => decode(&tokens)?,
                        PartValue::Null => continue,
                        _ => return Err(ValueError::Unassignable(part.name()).into()),
                    };
                    let current = self.query()?;
                    let missing: Vec<_> = incoming
                        .into_iter()
                        .filter(|(key, _)| !current.contains_key(key))
                        .collect();
                    if !missing.is_empty() {
                        let tree = self.query_mut()?;
                        for (key, value) in missing {
                            tree.insert(key, value);
                        }
                    }
                }
                _ => {
                    let blank = self.get(part)?.map_or(true, |v| v.is_blank());
                    if blank {
                        self.set(part, value)?;
                    }
                }
            }
        }
        Ok(self)
    }

    /// A plain alias of [`update`]'s overwriting behavior, applied to
    /// every part including the query.
    ///
    /// [`update`]: Self::update
    pub fn replace<I>(&mut self, parts: I) -> Result<&mut Uri, Error>
    where
        I: IntoIterator<Item = (Part, PartValue)>,
    {
        self.update(parts)
    }
}
