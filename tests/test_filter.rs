use vscan_client::{Filter, FilterTerm, Relation, TermValue};

#[test]
fn test_round_trip_yields_equal_filter() {
    for input in [
        "name~foo",
        "name~foo first=1 rows=10 sort=name",
        "severity>6.9 and status=Done",
        "apply_overrides=1 min_qod=70 result_hosts_only=1",
        "free text and more",
        "   whitespace \t normalized   here ",
    ] {
        let parsed = Filter::from_string(input);
        let serialized = parsed.to_filter_string();
        assert!(
            Filter::from_string(&serialized).equals(&Filter::from_string(input)),
            "round trip broke for {:?} (serialized {:?})",
            input,
            serialized
        );
    }
}

#[test]
fn test_rows_is_an_integer() {
    let filter = Filter::from_string("rows=10");
    assert_eq!(filter.get("rows"), Some(&TermValue::Int(10)));
    assert_eq!(filter.get_int("rows"), Some(10));
}

#[test]
fn test_apply_overrides_is_a_flag() {
    assert_eq!(
        Filter::from_string("apply_overrides=0").get_int("apply_overrides"),
        Some(0)
    );
    assert_eq!(
        Filter::from_string("apply_overrides=5").get_int("apply_overrides"),
        Some(1)
    );
}

#[test]
fn test_sort_replaces_sort_reverse() {
    let mut filter = Filter::from_string("sort-reverse=severity");
    filter.set("sort", "name", Relation::Equals);
    assert!(!filter.has("sort-reverse"));
    assert_eq!(filter.get_text("sort"), Some("name"));
    assert_eq!(filter.len(), 1);
}

#[test]
fn test_next_advances_paging_cursor() {
    let filter = Filter::new();
    assert_eq!(filter.get_int("first"), None);

    let page1 = filter.next();
    assert_eq!(page1.get_int("first"), Some(1));

    let page2 = page1.next();
    assert_eq!(page2.get_int("first"), Some(11));
    assert_eq!(page2.get_int("rows"), Some(10));
}

#[test]
fn test_all_ignores_prior_paging() {
    let filter = Filter::from_string("first=31 rows=25 name~foo");
    let all = filter.all();
    assert_eq!(all.get_int("rows"), Some(-1));
    assert_eq!(all.get_int("first"), Some(1));
    assert_eq!(all.get_text("name"), Some("foo"));
}

#[test]
fn test_copy_is_equal_but_independent() {
    let filter = Filter::from_string("name~foo rows=10");
    let mut copy = filter.copy();
    assert!(filter.equals(&copy));

    copy.set("x", "y", Relation::Equals);
    assert!(!filter.equals(&copy));
    assert!(!filter.has("x"));
}

#[test]
fn test_merge_extra_keywords_adds_paging_state() {
    let base = Filter::from_string("name~foo");
    let extra = Filter::from_string("first=5 rows=20");
    let merged = base.merge_extra_keywords(&extra);

    assert_eq!(merged.get_int("first"), Some(5));
    assert_eq!(merged.get_int("rows"), Some(20));
    assert_eq!(merged.get_text("name"), Some("foo"));
    // the base filter itself is untouched
    assert_eq!(base.len(), 1);
    assert!(!base.has("first"));
}

#[test]
fn test_term_string_round_trip() {
    assert_eq!(FilterTerm::from_string("name=foo").to_string(), "name=foo");
}

#[test]
fn test_connectors_stay_bare_terms() {
    let filter = Filter::from_string("name~foo and severity>5");
    assert_eq!(filter.len(), 3);
    let and_term = &filter.terms()[1];
    assert!(and_term.keyword().is_none());
    assert_eq!(and_term.to_string(), "and");
}

#[test]
fn test_simple_signature_is_paging_independent() {
    let page1 = Filter::from_string("name~foo first=1 rows=10 sort=name");
    let page3 = Filter::from_string("name~foo first=21 rows=10 sort=name");
    assert!(page1.simple().equals(&page3.simple()));
}
