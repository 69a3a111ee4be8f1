use core::fmt;

/// A structurally contradictory combination of parts, detected lazily
/// when a derived field is read or the URI is serialized.
///
/// Assigning the offending part never fails; only reading a combined
/// field that cannot exist does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A password is set but no username is.
    PasswordWithoutUsername,
    /// A protocol is set (possibly the empty, protocol-relative marker)
    /// but no host is.
    ProtocolWithoutHost,
    /// A port that differs from the protocol's default is set
    /// but no host is.
    PortWithoutHost,
    /// An extension was assigned on a path that has no filename.
    ExtensionWithoutFilename,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::PasswordWithoutUsername => {
                "can not build URI with password but without username"
            }
            Self::ProtocolWithoutHost => "can not build URI with protocol but without host",
            Self::PortWithoutHost => "can not build URI with port but without host",
            Self::ExtensionWithoutFilename => {
                "can not assign extension when there is no filename"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FormatError {}

/// An invalid literal value supplied to a setter or to the query encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// A port that is not a non-negative integer.
    InvalidPort(String),
    /// The `ssl` setter was used on a protocol absent from the
    /// secure/insecure pairing table.
    SslNotSupported(Option<String>),
    /// A sequence was serialized without an enclosing key.
    SequenceWithoutKey,
    /// A sequence element that is itself a sequence; the bracket grammar
    /// cannot express it without an intermediate mapping.
    NestedSequence(String),
    /// An unknown part name was given to the name-keyed API.
    UnknownPart(String),
    /// The given value cannot be assigned to the given part.
    Unassignable(&'static str),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort(s) => write!(f, "port should be an Integer >= 0, got {s:?}"),
            Self::SslNotSupported(Some(p)) => {
                write!(f, "can not specify SSL for {p:?} protocol")
            }
            Self::SslNotSupported(None) => {
                f.write_str("can not specify SSL when no protocol is set")
            }
            Self::SequenceWithoutKey => {
                f.write_str("can not serialize a sequence without an enclosing key")
            }
            Self::NestedSequence(key) => write!(
                f,
                "can not serialize a sequence directly inside a sequence at `{key}'; \
                 wrap it in a mapping"
            ),
            Self::UnknownPart(name) => write!(f, "unknown URI part `{name}'"),
            Self::Unassignable(part) => write!(f, "can not assign this value to `{part}'"),
        }
    }
}

impl std::error::Error for ValueError {}

/// The shape a query slot was expected to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryShape {
    /// A `key[]`-style sequence.
    Sequence,
    /// A `key[sub]`-style mapping.
    Mapping,
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        })
    }
}

/// The same query key was used as both a sequence and a mapping across
/// one decode or encode pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTypeError {
    pub(crate) key: String,
    pub(crate) expected: QueryShape,
}

impl QueryTypeError {
    /// Returns the offending key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the shape the slot was expected to have.
    pub fn expected(&self) -> QueryShape {
        self.expected
    }
}

impl fmt::Display for QueryTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} for parameter `{}'", self.expected, self.key)
    }
}

impl std::error::Error for QueryTypeError {}

/// Any error this crate produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A lazily-detected structural contradiction.
    Format(FormatError),
    /// An invalid literal value.
    Value(ValueError),
    /// A sequence/mapping shape conflict in a nested query.
    QueryType(QueryTypeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => e.fmt(f),
            Self::Value(e) => e.fmt(f),
            Self::QueryType(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Value(e) => Some(e),
            Self::QueryType(e) => Some(e),
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ValueError> for Error {
    fn from(e: ValueError) -> Self {
        Self::Value(e)
    }
}

impl From<QueryTypeError> for Error {
    fn from(e: QueryTypeError) -> Self {
        Self::QueryType(e)
    }
}
