use muri::{FormatError, Uri};

#[test]
fn host_decomposes_into_subdomain_name_and_zone() {
    let u = Uri::parse("http://www.blog.gusiev.com.ua/").unwrap();
    assert_eq!(u.subdomain(), Some("www.blog".to_string()));
    assert_eq!(u.domain_name(), Some("gusiev".to_string()));
    assert_eq!(u.domain_zone(), Some("com.ua".to_string()));
    assert_eq!(u.domain(), Some("gusiev.com.ua".to_string()));
}

#[test]
fn single_label_host_has_no_zone_or_subdomain() {
    let u = Uri::parse("http://localhost:3000/").unwrap();
    assert_eq!(u.subdomain(), None);
    assert_eq!(u.domain_name(), Some("localhost".to_string()));
    assert_eq!(u.domain_zone(), None);
    assert_eq!(u.domain(), Some("localhost".to_string()));
}

#[test]
fn domain_setters_recompose_the_host() {
    let mut u = Uri::parse("http://www.gusiev.com/").unwrap();
    u.set_domain_name(Some("example"));
    assert_eq!(u.host(), Some("www.example.com"));

    u.set_subdomain(None);
    assert_eq!(u.host(), Some("example.com"));

    u.set_domain_zone(Some("org"));
    assert_eq!(u.host(), Some("example.org"));

    u.set_domain(Some("gusiev.com.ua"));
    assert_eq!(u.host(), Some("gusiev.com.ua"));
}

#[test]
fn filename_directory_and_extension() {
    let u = Uri::parse("http://gusiev.com/articles/index.html").unwrap();
    assert_eq!(u.directory(), Some("/articles".to_string()));
    assert_eq!(u.filename(), Some("index.html".to_string()));
    assert_eq!(u.extension(), Some("html".to_string()));
}

#[test]
fn trailing_slash_means_no_filename() {
    let u = Uri::parse("http://gusiev.com/articles/").unwrap();
    assert_eq!(u.filename(), None);
    assert_eq!(u.directory(), Some("/articles".to_string()));
    assert_eq!(u.extension(), None);
}

#[test]
fn set_filename_keeps_the_directory() {
    let mut u = Uri::parse("http://gusiev.com/articles/index.html").unwrap();
    u.set_filename(Some("feed.xml"));
    assert_eq!(u.path(), Some("/articles/feed.xml"));

    u.set_filename(None);
    assert_eq!(u.path(), Some("/articles/"));
    assert_eq!(u.filename(), None);
}

#[test]
fn set_directory_keeps_the_filename() {
    let mut u = Uri::parse("http://gusiev.com/articles/index.html").unwrap();
    u.set_directory(Some("/posts"));
    assert_eq!(u.path(), Some("/posts/index.html"));

    u.set_directory(None);
    assert_eq!(u.path(), Some("/index.html"));
}

#[test]
fn set_extension_replaces_or_strips() {
    let mut u = Uri::parse("/articles/index.html").unwrap();
    u.set_extension(Some("xml")).unwrap();
    assert_eq!(u.path(), Some("/articles/index.xml"));

    u.set_extension(None).unwrap();
    assert_eq!(u.path(), Some("/articles/index"));

    // no dot in the filename: adding appends, removing is a no-op
    u.set_extension(Some("html")).unwrap();
    assert_eq!(u.path(), Some("/articles/index.html"));
    u.set_extension(None).unwrap();
    u.set_extension(None).unwrap();
    assert_eq!(u.path(), Some("/articles/index"));
}

#[test]
fn extension_needs_a_filename() {
    let mut u = Uri::parse("http://gusiev.com/articles/").unwrap();
    assert_eq!(
        u.set_extension(Some("html")).unwrap_err(),
        FormatError::ExtensionWithoutFilename
    );
}

#[test]
fn request_resource_and_location() {
    let u = Uri::parse("http://gusiev.com/path?a=1#top").unwrap();
    assert_eq!(u.location().unwrap(), Some("http://gusiev.com".to_string()));
    assert_eq!(u.request().unwrap(), "/path?a=1");
    assert_eq!(u.resource().unwrap(), "/path?a=1#top");
}

#[test]
fn request_defaults_to_the_root_path() {
    let u = Uri::parse("http://gusiev.com?a=1").unwrap();
    assert_eq!(u.request().unwrap(), "/?a=1");
}

#[test]
fn set_resource_replaces_path_query_and_anchor() {
    let mut u = Uri::parse("http://gusiev.com/old?a=1#x").unwrap();
    u.set_resource("/new?b=2#y");
    assert_eq!(u.to_uri_string().unwrap(), "http://gusiev.com/new?b=2#y");

    u.set_resource("/plain");
    assert_eq!(u.to_uri_string().unwrap(), "http://gusiev.com/plain");
}

#[test]
fn web_protocol_predicates() {
    let u = Uri::parse("https://gusiev.com/").unwrap();
    assert!(u.is_web_protocol());
    assert!(u.is_default_web_port());
    assert!(u.is_home_page());
    assert!(u.ssl());

    let u = Uri::parse("ftp://gusiev.com/pub/file.txt").unwrap();
    assert!(!u.is_web_protocol());
    assert!(!u.is_default_web_port());
    assert!(!u.is_home_page());
    assert!(!u.ssl());

    let u = Uri::parse("http://gusiev.com/index.html").unwrap();
    assert!(u.is_home_page());
}
