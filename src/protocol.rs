//! The static protocol metadata table.
//!
//! Entries are process-lifetime constants shared by every [`Uri`];
//! nothing here is ever mutated per-instance.
//!
//! [`Uri`]: crate::Uri

/// Metadata for one registered protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolEntry {
    /// The lowercase protocol name.
    pub name: &'static str,
    /// The port implied when none is written out, if the protocol has one.
    pub default_port: Option<u32>,
    /// Whether the protocol is secure.
    pub secure: bool,
}

const fn entry(name: &'static str, default_port: Option<u32>, secure: bool) -> ProtocolEntry {
    ProtocolEntry {
        name,
        default_port,
        secure,
    }
}

/// Protocols with a known default port and security level.
///
/// Unknown protocols are not an error anywhere in this crate: lookups on
/// them simply yield no default port and "not secure".
pub const PROTOCOLS: &[ProtocolEntry] = &[
    entry("file", None, false),
    entry("ftp", Some(21), false),
    entry("gopher", Some(70), false),
    entry("http", Some(80), false),
    entry("https", Some(443), true),
    entry("imap", Some(143), false),
    entry("ldap", Some(389), false),
    entry("memcached", Some(11211), false),
    entry("mongo", Some(27017), false),
    entry("mysql", Some(3306), false),
    entry("nntp", Some(119), false),
    entry("pop", Some(110), false),
    entry("postgres", Some(5432), false),
    entry("prospero", Some(1525), false),
    entry("rabbitmq", Some(5672), false),
    entry("redis", Some(6379), false),
    entry("sftp", Some(22), true),
    entry("smtp", Some(25), false),
    entry("ssh", Some(22), true),
    entry("svn", Some(3690), false),
    entry("svn+ssh", Some(22), true),
    entry("telnet", Some(23), false),
    entry("tftp", Some(69), false),
    entry("wais", Some(210), false),
    entry("ws", Some(80), false),
    entry("wss", Some(443), true),
];

/// Insecure/secure pairs of the same logical service, used exclusively
/// by the `ssl` setter.
pub const SSL_MAPPING: &[(&str, &str)] = &[
    ("http", "https"),
    ("ftp", "sftp"),
    ("svn", "svn+ssh"),
    ("ws", "wss"),
];

/// Protocols that serve web pages.
pub const WEB_PROTOCOLS: &[&str] = &["http", "https"];

/// Looks up a protocol entry by name.
pub fn lookup(name: &str) -> Option<&'static ProtocolEntry> {
    PROTOCOLS.iter().find(|e| e.name == name)
}

/// Returns the default port of `name`, or `None` for unknown protocols
/// and protocols without one.
pub fn default_port(name: &str) -> Option<u32> {
    lookup(name).and_then(|e| e.default_port)
}

/// Returns whether `name` is a secure protocol; `false` when unknown.
pub fn is_secure(name: &str) -> bool {
    lookup(name).is_some_and(|e| e.secure)
}

/// Maps `name` to its counterpart at the requested security level.
///
/// Returns `None` when the protocol appears in neither column of the
/// pairing table.
pub fn for_ssl(name: &str, ssl: bool) -> Option<&'static str> {
    if let Some(&(insecure, secure)) = SSL_MAPPING.iter().find(|&&(i, _)| i == name) {
        return Some(if ssl { secure } else { insecure });
    }
    SSL_MAPPING
        .iter()
        .find(|&&(_, s)| s == name)
        .map(|&(insecure, secure)| if ssl { secure } else { insecure })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lookups() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("https"), Some(443));
        assert_eq!(default_port("file"), None);
        assert!(is_secure("https"));
        assert!(is_secure("svn+ssh"));
        assert!(!is_secure("http"));
    }

    #[test]
    fn unknown_lookups_are_not_errors() {
        assert_eq!(lookup("gemini"), None);
        assert_eq!(default_port("gemini"), None);
        assert!(!is_secure("gemini"));
    }

    #[test]
    fn ssl_mapping_is_bidirectional() {
        assert_eq!(for_ssl("http", true), Some("https"));
        assert_eq!(for_ssl("http", false), Some("http"));
        assert_eq!(for_ssl("https", true), Some("https"));
        assert_eq!(for_ssl("https", false), Some("http"));
        assert_eq!(for_ssl("ftp", true), Some("sftp"));
        assert_eq!(for_ssl("wss", false), Some("ws"));
        assert_eq!(for_ssl("gopher", true), None);
    }
}
