mod common;

use std::collections::HashSet;

use mapquery_lib::{normalize, Location, PrefixIndex};

use common::campus_names;

#[test]
fn soda_hall_prefix_scenario() {
    let mut index = PrefixIndex::new();
    index.insert(Location::new(1, "Soda Hall", 37.8756, -122.2588));

    assert_eq!(index.autocomplete("sod").collect::<Vec<_>>(), vec!["Soda Hall"]);
    assert!(index.autocomplete("xyz").next().is_none());
}

#[test]
fn empty_queries_return_nothing() {
    let index = campus_names();
    assert!(index.autocomplete("").next().is_none());
    assert!(index.autocomplete("!!").next().is_none());
    assert!(index.lookup_exact("").is_none());
}

#[test]
fn normalization_is_shared_by_insert_and_lookup() {
    let index = campus_names();

    let records = index
        .lookup_exact("PEET'S coffee & tea!")
        .expect("punctuation and case are ignored");
    assert_eq!(records.len(), 2, "two branches share the name");
    assert!(records.iter().any(|record| record.id == 13));
    assert!(records.iter().any(|record| record.id == 14));

    let suggestions: Vec<_> = index.autocomplete("pEeT'").collect();
    assert_eq!(suggestions, vec!["Peet's Coffee & Tea"]);
}

#[test]
fn every_inserted_name_is_found_exactly() {
    let index = campus_names();
    for name in ["Soda Hall", "Sather Gate", "Sather Tower", "Top Dog"] {
        let records = index.lookup_exact(name).expect("inserted names resolve");
        assert!(records.iter().any(|record| record.name == name));
    }
    assert!(index.lookup_exact("Sather").is_none(), "prefix is not a key");
}

#[test]
fn shorter_prefix_returns_superset() {
    let index = campus_names();
    for (prefix, longer) in [("s", "sa"), ("sa", "sat"), ("sather", "sather t"), ("t", "to")] {
        let wide: HashSet<_> = index.autocomplete(prefix).collect();
        let narrow: HashSet<_> = index.autocomplete(longer).collect();
        assert!(
            narrow.is_subset(&wide),
            "{longer:?} results should be within {prefix:?} results"
        );
        assert!(narrow
            .iter()
            .all(|name| normalize(name).starts_with(&normalize(longer))));
    }
}

#[test]
fn stored_prefix_names_are_reported_before_longer_names() {
    let mut index = PrefixIndex::new();
    for (id, name) in [(1, "Shattuck Avenue"), (2, "Shattuck"), (3, "Shasta Road")] {
        index.insert(Location::new(id, name, 0.0, 0.0));
    }

    let names: Vec<_> = index.autocomplete("sha").collect();
    assert_eq!(names, vec!["Shasta Road", "Shattuck", "Shattuck Avenue"]);
}

#[test]
fn autocomplete_can_restart() {
    let index = campus_names();
    let first: Vec<_> = index.autocomplete("sather").collect();
    let second: Vec<_> = index.autocomplete("sather").collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["Sather Gate", "Sather Tower"]);
}

#[test]
fn autocomplete_limit_truncates() {
    let index = campus_names();
    assert_eq!(index.autocomplete_limit("s", 1), vec!["Sather Gate".to_string()]);
    assert_eq!(index.len(), 6);
    assert_eq!(index.key_count(), 5);
}

#[test]
fn accented_names_are_keyed_without_their_accents() {
    let mut index = PrefixIndex::new();
    index.insert(Location::new(20, "Caffè Strada", 37.8692, -122.2548));

    assert_eq!(
        index.autocomplete("caff strada").collect::<Vec<_>>(),
        vec!["Caffè Strada"]
    );
    let records = index
        .lookup_exact("Caffè Strada")
        .expect("accented lookup uses the same key");
    assert_eq!(records[0].id, 20);
    assert!(index.lookup_exact("caffe strada").is_none());
}
