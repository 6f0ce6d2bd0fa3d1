//! Product category tree with tri-state checkbox selection.
//!
//! The category filter on product tables shows a tree where each node is
//! checked, unchecked or indeterminate. Only explicit selections are stored;
//! a parent's state is derived from its children on every read:
//!
//! - a node is **checked** when it is selected, or when it has children and
//!   every child is checked
//! - a node is **indeterminate** when it is not checked but at least one
//!   child is
//!
//! The selected set is what the table writes to its `category` filter.

mod tree;

pub use tree::{CategoryNode, Selection, SelectionState, checked_ids, find, state, toggle};
