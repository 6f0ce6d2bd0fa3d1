use sellerdesk_table::{MemoryHistory, Navigate, NavigateOptions, SearchState};

fn set(key: &'static str, value: i64) -> impl FnOnce(&SearchState) -> SearchState {
    move |prev| prev.clone().with(key, value)
}

// ── MemoryHistory ────────────────────────────────────────────────

#[test]
fn starts_with_one_entry() {
    let history = MemoryHistory::new(SearchState::from_query("tab=a"));
    assert_eq!(history.len(), 1);
    assert_eq!(history.navigation_count(), 0);
    assert_eq!(history.current().to_query(), "tab=a");
}

#[test]
fn replace_does_not_add_entries() {
    let mut history = MemoryHistory::default();
    history.navigate(NavigateOptions::replace(set("page", 2)));
    history.navigate(NavigateOptions::replace(set("page", 3)));

    assert_eq!(history.len(), 1);
    assert_eq!(history.navigation_count(), 2);
    assert_eq!(history.current().to_query(), "page=3");
    assert!(!history.back());
}

#[test]
fn push_adds_back_stops() {
    let mut history = MemoryHistory::default();
    history.navigate(NavigateOptions::push(set("page", 2)));
    history.navigate(NavigateOptions::push(set("page", 3)));

    assert_eq!(history.len(), 3);
    assert!(history.back());
    assert_eq!(history.current().to_query(), "page=2");
    assert!(history.forward());
    assert_eq!(history.current().to_query(), "page=3");
    assert!(!history.forward());
}

#[test]
fn push_after_back_drops_forward_entries() {
    let mut history = MemoryHistory::default();
    history.navigate(NavigateOptions::push(set("page", 2)));
    history.navigate(NavigateOptions::push(set("page", 3)));
    history.back();
    history.navigate(NavigateOptions::push(set("page", 9)));

    assert_eq!(history.len(), 3);
    assert!(!history.forward());
    assert_eq!(history.current().to_query(), "page=9");
}

#[test]
fn updater_sees_the_current_entry() {
    let mut history = MemoryHistory::new(SearchState::from_query("tab=details"));
    history.navigate(NavigateOptions::replace(set("page", 2)));
    assert_eq!(history.current().to_query(), "tab=details&page=2");
}

#[test]
fn closures_are_navigators() {
    let mut seen = Vec::new();
    let mut navigator = |options: NavigateOptions<'_>| {
        seen.push(((options.search)(&SearchState::new()), options.replace));
    };
    navigator.navigate(NavigateOptions::replace(set("page", 4)));

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.to_query(), "page=4");
    assert!(seen[0].1);
}

#[test]
fn options_debug_hides_the_updater() {
    let options = NavigateOptions::push(set("page", 1));
    assert!(format!("{options:?}").contains("replace: false"));
}
