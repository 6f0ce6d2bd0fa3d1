use pretty_assertions::assert_eq;
use sellerdesk_table::filters::{self, ColumnFilter};
use sellerdesk_table::{ColumnFilterSpec, FilterValue, SearchState, SearchValue};

fn specs() -> Vec<ColumnFilterSpec> {
    vec![
        ColumnFilterSpec::array("status", "status"),
        ColumnFilterSpec::array("warehouse", "wh"),
        ColumnFilterSpec::string("orderNo", "orderNo"),
    ]
}

// ── Read ─────────────────────────────────────────────────────────

#[test]
fn read_omits_empty_columns() {
    let search = SearchState::new()
        .with("status", vec!["active"])
        .with("wh", Vec::<String>::new())
        .with("orderNo", "");
    assert_eq!(
        filters::read(&search, &specs()),
        vec![ColumnFilter::new("status", vec!["active"])]
    );
}

#[test]
fn read_maps_search_key_to_column_id() {
    let search = SearchState::from_query("wh=sz,hk");
    assert_eq!(
        filters::read(&search, &specs()),
        vec![ColumnFilter::new("warehouse", vec!["sz", "hk"])]
    );
}

#[test]
fn read_follows_spec_order() {
    let search = SearchState::from_query("orderNo=SO-1&status=a");
    let ids: Vec<_> = filters::read(&search, &specs())
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, vec!["status", "orderNo"]);
}

#[test]
fn read_coerces_single_value_for_array_spec() {
    let search = SearchState::from_query("status=pending");
    assert_eq!(
        filters::read(&search, &specs()),
        vec![ColumnFilter::new("status", vec!["pending"])]
    );
}

#[test]
fn read_keeps_numeric_text_for_string_spec() {
    let search = SearchState::from_query("orderNo=1024");
    assert_eq!(
        filters::read(&search, &specs()),
        vec![ColumnFilter::new("orderNo", "1024")]
    );
}

// ── Write ────────────────────────────────────────────────────────

#[test]
fn patch_sets_and_clears_keys() {
    let prev = SearchState::from_query("status=a&orderNo=SO-1&tab=details");
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("warehouse", vec!["sz"])],
        &specs(),
    ));
    assert_eq!(next.to_query(), "tab=details&wh=sz");
}

#[test]
fn empty_array_removes_the_key() {
    let prev = SearchState::from_query("status=a&status=b");
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("status", Vec::<String>::new())],
        &specs(),
    ));
    assert!(!next.contains_key("status"));
    assert_eq!(next.to_query(), "");
}

#[test]
fn list_of_empty_items_counts_as_cleared() {
    let prev = SearchState::from_query("page=2&tab=details");
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("status", vec![""])],
        &specs(),
    ));
    assert_eq!(next.to_query(), "page=2&tab=details");

    let prev = SearchState::from_query("status=a&tab=details");
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("status", vec!["", ""])],
        &specs(),
    ));
    assert_eq!(next.to_query(), "tab=details");
}

#[test]
fn empty_items_are_dropped_from_a_list() {
    let prev = SearchState::new();
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("status", vec!["", "active", ""])],
        &specs(),
    ));
    assert_eq!(next.to_query(), "status=active");
    assert_eq!(
        filters::read(&next, &specs()),
        vec![ColumnFilter::new("status", vec!["active"])]
    );
}

#[test]
fn stale_empty_list_in_url_is_cleaned_up() {
    let prev = SearchState::new().with("status", Vec::<String>::new());
    let patch = filters::patch(&prev, &[], &specs());
    assert!(!prev.apply(&patch).contains_key("status"));
}

#[test]
fn unchanged_filters_produce_no_patch() {
    let prev = SearchState::from_query("status=a&orderNo=SO-1");
    let current = filters::read(&prev, &specs());
    assert!(filters::patch(&prev, &current, &specs()).is_empty());
}

#[test]
fn wrong_shape_is_coerced() {
    let prev = SearchState::new();
    let next = prev.apply(&filters::patch(
        &prev,
        &[
            ColumnFilter::new("status", "active"),
            ColumnFilter::new("orderNo", vec!["A", "B"]),
        ],
        &specs(),
    ));
    assert_eq!(next.get("status"), Some(&SearchValue::list(["active"])));
    assert_eq!(next.get("orderNo"), Some(&SearchValue::text("A,B")));
}

#[test]
fn undeclared_columns_are_ignored() {
    let prev = SearchState::from_query("other=1");
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("unknown", vec!["x"])],
        &specs(),
    ));
    assert_eq!(next, prev);
}

#[test]
fn duplicates_survive_a_write() {
    let prev = SearchState::new();
    let next = prev.apply(&filters::patch(
        &prev,
        &[ColumnFilter::new("status", vec!["a", "a", "b"])],
        &specs(),
    ));
    assert_eq!(next.get("status"), Some(&SearchValue::list(["a", "a", "b"])));
}

#[test]
fn patch_column_touches_one_key() {
    let prev = SearchState::from_query("status=a&wh=sz");
    let mut patch = sellerdesk_table::SearchPatch::new();
    filters::patch_column(
        &mut patch,
        &prev,
        &specs()[1],
        Some(&FilterValue::list(["hk"])),
    );
    assert_eq!(prev.apply(&patch).to_query(), "status=a&wh=hk");
}

#[test]
fn column_filter_serializes_like_the_grid() {
    let json = serde_json::to_value(ColumnFilter::new("status", vec!["a"])).unwrap();
    assert_eq!(json, serde_json::json!({"id": "status", "value": ["a"]}));
}
