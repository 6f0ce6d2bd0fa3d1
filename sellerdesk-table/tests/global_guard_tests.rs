use sellerdesk_table::guard;
use sellerdesk_table::{global, GlobalFilterConfig, PaginationState, SearchState, SearchValue};

// ── Global filter ────────────────────────────────────────────────

#[test]
fn global_read_and_missing() {
    let config = GlobalFilterConfig::default();
    assert_eq!(global::read(&SearchState::from_query("filter=shoe"), &config), "shoe");
    assert_eq!(global::read(&SearchState::new(), &config), "");
}

#[test]
fn global_disabled_is_inert() {
    let config = GlobalFilterConfig::disabled();
    let search = SearchState::from_query("filter=shoe");
    assert_eq!(global::read(&search, &config), "");
    assert!(global::patch(&search, "boots", &config).is_none());
}

#[test]
fn global_custom_key() {
    let config = GlobalFilterConfig::with_key("q");
    let search = SearchState::from_query("q=red&filter=blue");
    assert_eq!(global::read(&search, &config), "red");
}

#[test]
fn global_write_sets_text() {
    let config = GlobalFilterConfig::default();
    let prev = SearchState::from_query("tab=details");
    let next = prev.apply(&global::patch(&prev, "red shoe", &config).unwrap());
    assert_eq!(next.get("filter"), Some(&SearchValue::text("red shoe")));
    assert_eq!(next.get("tab"), Some(&SearchValue::text("details")));
}

#[test]
fn global_empty_write_deletes_key() {
    let config = GlobalFilterConfig::default();
    let prev = SearchState::from_query("filter=shoe&tab=details");
    let next = prev.apply(&global::patch(&prev, "", &config).unwrap());
    assert_eq!(next.to_query(), "tab=details");
}

#[test]
fn global_same_value_is_noop() {
    let config = GlobalFilterConfig::default();
    let prev = SearchState::from_query("filter=42");
    assert!(global::patch(&prev, "42", &config).unwrap().is_empty());
}

// ── Page-range guard ─────────────────────────────────────────────

#[test]
fn clamp_out_of_range_index() {
    assert_eq!(
        guard::clamp(PaginationState::new(5, 10), 3),
        Some(PaginationState::new(2, 10))
    );
}

#[test]
fn clamp_in_range_is_none() {
    assert_eq!(guard::clamp(PaginationState::new(5, 10), 10), None);
    assert_eq!(guard::clamp(PaginationState::new(2, 10), 3), None);
}

#[test]
fn clamp_zero_pages_is_none() {
    assert_eq!(guard::clamp(PaginationState::new(5, 10), 0), None);
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(guard::page_count(0, 10), 0);
    assert_eq!(guard::page_count(1, 10), 1);
    assert_eq!(guard::page_count(10, 10), 1);
    assert_eq!(guard::page_count(11, 10), 2);
    assert_eq!(guard::page_count(5, 0), 5);
}
