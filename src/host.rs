//! Hostname decomposition.
//!
//! Splits a hostname into subdomain, domain name and zone with a
//! label-length heuristic: trailing labels of three characters or fewer
//! fold into the zone while at least two labels remain. This is not a
//! public-suffix-list lookup; a multi-label suffix that falls outside the
//! heuristic's window decomposes "incorrectly" by design.

/// The decomposition of a hostname.
///
/// # Examples
///
/// ```
/// use muri::host::DomainParts;
///
/// let parts = DomainParts::of("www.blog.gusiev.com.ua");
/// assert_eq!(parts.subdomain.as_deref(), Some("www.blog"));
/// assert_eq!(parts.domain_name.as_deref(), Some("gusiev"));
/// assert_eq!(parts.zone.as_deref(), Some("com.ua"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomainParts {
    /// The labels before the domain name, joined with `.`.
    pub subdomain: Option<String>,
    /// The single label identifying the domain.
    pub domain_name: Option<String>,
    /// The trailing suffix labels, joined with `.`.
    pub zone: Option<String>,
}

impl DomainParts {
    /// Decomposes a hostname.
    pub fn of(host: &str) -> DomainParts {
        let mut labels: Vec<&str> = host.split('.').collect();
        let mut zone = Vec::new();
        while labels.len() >= 2 && labels.last().is_some_and(|l| l.len() <= 3) {
            if let Some(label) = labels.pop() {
                zone.insert(0, label);
            }
        }
        let mut subdomain = Vec::new();
        while labels.len() > 1 {
            subdomain.push(labels.remove(0));
        }
        DomainParts {
            subdomain: join(&subdomain),
            domain_name: labels.first().map(|s| s.to_string()),
            zone: join(&zone),
        }
    }

    /// The domain name and zone joined back together, e.g. `gusiev.com.ua`.
    pub fn domain(&self) -> Option<String> {
        join_opt(&[self.domain_name.as_deref(), self.zone.as_deref()])
    }
}

fn join(labels: &[&str]) -> Option<String> {
    if labels.is_empty() {
        None
    } else {
        Some(labels.join("."))
    }
}

/// Joins present labels with `.`, yielding `None` when all are absent.
pub(crate) fn join_opt(labels: &[Option<&str>]) -> Option<String> {
    let present: Vec<&str> = labels.iter().flatten().copied().collect();
    join(&present)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(host: &str) -> (Option<String>, Option<String>, Option<String>) {
        let p = DomainParts::of(host);
        (p.subdomain, p.domain_name, p.zone)
    }

    #[test]
    fn single_label() {
        assert_eq!(parts("localhost"), (None, Some("localhost".into()), None));
    }

    #[test]
    fn plain_domain() {
        assert_eq!(
            parts("gusiev.com"),
            (None, Some("gusiev".into()), Some("com".into()))
        );
    }

    #[test]
    fn multi_label_zone_and_subdomain() {
        assert_eq!(
            parts("www.blog.gusiev.com.ua"),
            (
                Some("www.blog".into()),
                Some("gusiev".into()),
                Some("com.ua".into())
            )
        );
    }

    #[test]
    fn long_tld_stays_out_of_zone() {
        // "info" is four characters, outside the heuristic's window.
        assert_eq!(
            parts("example.info"),
            (Some("example".into()), Some("info".into()), None)
        );
    }

    #[test]
    fn at_least_two_labels_are_retained() {
        // Both labels are short, but one must stay as the domain name.
        assert_eq!(parts("co.ua"), (None, Some("co".into()), Some("ua".into())));
    }

    #[test]
    fn domain_joins_name_and_zone() {
        assert_eq!(
            DomainParts::of("www.gusiev.com").domain().as_deref(),
            Some("gusiev.com")
        );
        assert_eq!(DomainParts::of("localhost").domain().as_deref(), Some("localhost"));
    }
}
