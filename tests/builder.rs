mod common;
use common::*;
use docsearch_query::*;
use serde_json::json;

#[test]
fn empty_input_builds_an_empty_filters_object() {
    let query = build("");
    assert_eq!(query, SearchQuery::default());
    assert_eq!(serde_json::to_value(&query).unwrap(), json!({"filters": {}}));
}

#[test]
fn value_coercion_table() {
    let cases = [
        ("true", json!(true)),
        ("FALSE", json!(false)),
        ("100", json!(100)),
        ("001", json!("001")),
        ("1e5", json!(100_000)),
        ("99.99", json!(99.99)),
        ("-100", json!(-100)),
        ("2024-01-01", json!("2024-01-01")),
    ];
    for (raw, expected) in cases {
        let query = build(&format!("total:{raw}"));
        let value = serde_json::to_value(&query.filters.custom_fields.unwrap()[0].value).unwrap();
        assert_eq!(value, expected, "coercing `{raw}`");
    }
}

#[test]
fn tag_groups_appear_in_fixed_order() {
    let query = build("tag_not:archived tag_any:blue,green tag:urgent");
    assert_eq!(
        query.filters.tags.unwrap(),
        [
            TagGroup::All {
                tags: vec!["urgent".into()]
            },
            TagGroup::Any {
                tags_any: vec!["blue".into(), "green".into()]
            },
            TagGroup::Not {
                tags_not: vec!["archived".into()]
            },
        ]
    );
}

#[test]
fn absent_tag_kinds_contribute_no_group() {
    let query = build("tag_any:blue");
    assert_eq!(
        query.filters.tags.unwrap(),
        [TagGroup::Any {
            tags_any: vec!["blue".into()]
        }]
    );
}

#[test]
fn repeated_categories_keep_duplicates() {
    let query = build("category:Invoice cat:Invoice,Contract");
    assert_eq!(
        query.filters.category.unwrap().values,
        ["Invoice", "Invoice", "Contract"]
    );
}

#[test]
fn range_style_constraints_stay_separate() {
    let query = build("total:>=10 total:<=20");
    let fields = query.filters.custom_fields.unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].operator, Operator::Gte);
    assert_eq!(fields[1].operator, Operator::Lte);
    assert_eq!(fields[0].field_name, fields[1].field_name);
}

#[test]
fn building_is_deterministic() {
    let input = r#"invoice tag:urgent category:A,B "Invoice Total":>1000"#;
    let first = build(input);
    let second = build(input);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn default_options_add_no_payload_fields() {
    let json = serde_json::to_value(build("invoice")).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["filters"]);
}

#[test]
fn options_are_copied_verbatim_when_set() {
    let options = QueryOptions {
        page_size: Some(25),
        page_number: Some(3),
        sort_by: Some("created_at".into()),
        sort_direction: Some(SortDirection::Asc),
        lang: Some("eng".into()),
        document_type_id: Some("c4ca4238".into()),
    };
    let query = build_search_query(&parse_ok("invoice"), options);
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["page_size"], 25);
    assert_eq!(json["page_number"], 3);
    assert_eq!(json["sort_by"], "created_at");
    assert_eq!(json["sort_direction"], "asc");
    assert_eq!(json["lang"], "eng");
    assert_eq!(json["document_type_id"], "c4ca4238");
}

#[test]
fn end_to_end_payload_matches_backend_schema() {
    let query = build(r#"invoice category:"Sales Invoice" tag:urgent "Invoice Total":>1000"#);
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "filters": {
                "fts": {"terms": ["invoice"]},
                "category": {"values": ["Sales Invoice"]},
                "tags": [{"tags": ["urgent"]}],
                "custom_fields": [
                    {"field_name": "Invoice Total", "operator": ">", "value": 1000}
                ],
            }
        })
    );
}
