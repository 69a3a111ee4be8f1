use muri::query::{QueryMap, QueryValue};
use muri::{Error, QueryShape, Uri, ValueError};

#[test]
fn tokens_keep_order_and_duplicates() {
    let tokens = muri::query_tokens("a=1&b=2&a=3");
    let pairs: Vec<(&str, Option<&str>)> =
        tokens.iter().map(|t| (t.name(), t.value())).collect();
    assert_eq!(
        pairs,
        [("a", Some("1")), ("b", Some("2")), ("a", Some("3"))]
    );
}

#[test]
fn tokens_accept_semicolon_separator_and_leading_question_mark() {
    let tokens = muri::query_tokens("?a=1;b=2");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].name(), "a");
    assert_eq!(tokens[1].name(), "b");
}

#[test]
fn absent_and_empty_values_are_distinct() {
    let tokens = muri::query_tokens("a&b=");
    assert_eq!(tokens[0].value(), None);
    assert_eq!(tokens[1].value(), Some(""));
    assert_eq!(tokens[0].to_string(), "a");
    assert_eq!(tokens[1].to_string(), "b=");
}

#[test]
fn decode_nested_mappings() {
    let tree = muri::parse_query("x[y][z]=1").unwrap();
    let QueryValue::Map(y) = tree.get("x").unwrap() else {
        panic!("expected mapping at `x'");
    };
    let QueryValue::Map(z) = y.get("y").unwrap() else {
        panic!("expected mapping at `y'");
    };
    assert_eq!(z.get("z").unwrap().as_scalar(), Some(Some("1")));
}

#[test]
fn decode_sequences() {
    let tree = muri::parse_query("a[]=1&a[]=2").unwrap();
    let QueryValue::Seq(items) = tree.get("a").unwrap() else {
        panic!("expected sequence at `a'");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_scalar(), Some(Some("1")));
    assert_eq!(items[1].as_scalar(), Some(Some("2")));
}

#[test]
fn decode_groups_sequence_mappings_until_a_subkey_repeats() {
    let tree = muri::parse_query("a[][b]=1&a[][c]=2&a[][b]=3").unwrap();
    let QueryValue::Seq(items) = tree.get("a").unwrap() else {
        panic!("expected sequence at `a'");
    };
    assert_eq!(items.len(), 2);
    let QueryValue::Map(first) = &items[0] else {
        panic!("expected mapping");
    };
    assert_eq!(first.get("b").unwrap().as_scalar(), Some(Some("1")));
    assert_eq!(first.get("c").unwrap().as_scalar(), Some(Some("2")));
    let QueryValue::Map(second) = &items[1] else {
        panic!("expected mapping");
    };
    assert_eq!(second.get("b").unwrap().as_scalar(), Some(Some("3")));
}

#[test]
fn decode_last_scalar_wins() {
    let tree = muri::parse_query("a=1&a=2").unwrap();
    assert_eq!(tree.get("a").unwrap().as_scalar(), Some(Some("2")));
}

#[test]
fn shape_conflicts_name_the_offending_key() {
    let err = muri::parse_query("x[y]=1&x[y][z]=2").unwrap_err();
    let Error::QueryType(err) = err else {
        panic!("expected a query type error");
    };
    assert_eq!(err.key(), "y");
    assert_eq!(err.expected(), QueryShape::Mapping);

    let err = muri::parse_query("x[y]=1&x[]=2").unwrap_err();
    let Error::QueryType(err) = err else {
        panic!("expected a query type error");
    };
    assert_eq!(err.key(), "x");
    assert_eq!(err.expected(), QueryShape::Sequence);
}

#[test]
fn decode_www_form_escapes() {
    let tree = muri::parse_query("q=cowboy+hat%3F").unwrap();
    assert_eq!(tree.get("q").unwrap().as_scalar(), Some(Some("cowboy hat?")));
}

#[test]
fn encode_www_form_escapes() {
    let out = muri::serialize_query(QueryMap::from([("q", "cowboy hat?")])).unwrap();
    assert_eq!(out, "q=cowboy+hat%3F");
}

#[test]
fn encode_escapes_brackets_in_emitted_names() {
    let out = muri::serialize_query(QueryMap::from([("a", QueryMap::from([("b", "c")]))])).unwrap();
    assert_eq!(out, "a%5Bb%5D=c");
}

#[test]
fn encode_deep_mix() {
    let out = muri::serialize_query(QueryMap::from([
        ("a", QueryValue::from("1")),
        (
            "b",
            QueryValue::Map(QueryMap::from([
                ("c", QueryValue::from("3")),
                ("d", QueryValue::from(vec!["4", "5"])),
            ])),
        ),
    ]))
    .unwrap();
    assert_eq!(out, "a=1&b%5Bc%5D=3&b%5Bd%5D%5B%5D=4&b%5Bd%5D%5B%5D=5");
}

#[test]
fn encode_omits_empty_containers() {
    let out = muri::serialize_query(QueryMap::from([
        ("a", QueryValue::from("1")),
        ("b", QueryValue::Seq(Vec::new())),
        ("c", QueryValue::Map(QueryMap::new())),
    ]))
    .unwrap();
    assert_eq!(out, "a=1");
}

#[test]
fn encode_rejects_keyless_and_nested_sequences() {
    let err = muri::serialize_query(vec!["1", "2"]).unwrap_err();
    assert_eq!(err, Error::Value(ValueError::SequenceWithoutKey));

    let err = muri::serialize_query(QueryMap::from([(
        "a",
        QueryValue::Seq(vec![QueryValue::from(vec!["1"])]),
    )]))
    .unwrap_err();
    assert_eq!(err, Error::Value(ValueError::NestedSequence("a".to_string())));
}

#[test]
fn uri_query_views_stay_in_sync() {
    let mut u = Uri::parse("//host?a=1&b=2").unwrap();
    let tree = u.query().unwrap();
    assert_eq!(tree.get("a").unwrap().as_scalar(), Some(Some("1")));

    u.query_mut().unwrap().insert("c", "3");
    assert_eq!(u.query_string().unwrap(), Some("a=1&b=2&c=3".to_string()));

    u.set_query_string("d=4");
    assert_eq!(u.query().unwrap().len(), 1);
    assert_eq!(u.query_string().unwrap(), Some("d=4".to_string()));
}

#[test]
fn empty_query_is_no_query() {
    let u = Uri::parse("//host").unwrap();
    assert_eq!(u.query_string().unwrap(), None);
    assert!(u.query().unwrap().is_empty());
    assert_eq!(muri::parse_query("").unwrap().len(), 0);
}
