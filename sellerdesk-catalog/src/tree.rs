use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Explicitly selected category ids.
pub type Selection = BTreeSet<String>;

/// A category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<CategoryNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the node is selected, or every one of its children is checked.
    #[must_use]
    pub fn is_checked(&self, selected: &Selection) -> bool {
        selected.contains(&self.id)
            || (!self.children.is_empty() && self.children.iter().all(|c| c.is_checked(selected)))
    }

    /// Derived checkbox state for this node.
    #[must_use]
    pub fn state(&self, selected: &Selection) -> SelectionState {
        if self.is_checked(selected) {
            return SelectionState::Checked;
        }
        if self.children.iter().any(|c| c.is_checked(selected)) {
            SelectionState::Indeterminate
        } else {
            SelectionState::Unchecked
        }
    }

    fn descendant_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for child in &self.children {
            child.descendant_ids(out);
        }
    }
}

/// Checkbox state shown for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    Checked,
    Unchecked,
    Indeterminate,
}

/// Finds a node anywhere in the forest.
#[must_use]
pub fn find<'a>(roots: &'a [CategoryNode], id: &str) -> Option<&'a CategoryNode> {
    path_to(roots, id).and_then(|path| path.last().copied())
}

/// State of the node with `id`, or `None` if no such node exists.
#[must_use]
pub fn state(roots: &[CategoryNode], selected: &Selection, id: &str) -> Option<SelectionState> {
    find(roots, id).map(|node| node.state(selected))
}

/// Flips the node with `id` and returns the new selection.
///
/// Checking a node selects it and all its descendants. Unchecking clears
/// the node, its descendants and every ancestor, so no explicit selection
/// higher up keeps it checked. Unknown ids leave the selection unchanged.
#[must_use]
pub fn toggle(roots: &[CategoryNode], selected: &Selection, id: &str) -> Selection {
    let Some(path) = path_to(roots, id) else {
        return selected.clone();
    };
    let Some((node, ancestors)) = path.split_last() else {
        return selected.clone();
    };

    let mut subtree = Vec::new();
    node.descendant_ids(&mut subtree);

    let mut next = selected.clone();
    if node.is_checked(selected) {
        for id in subtree {
            next.remove(id);
        }
        for ancestor in ancestors {
            next.remove(&ancestor.id);
        }
    } else {
        next.extend(subtree.into_iter().map(str::to_string));
    }
    next
}

/// Ids of every checked node, in depth-first order.
#[must_use]
pub fn checked_ids(roots: &[CategoryNode], selected: &Selection) -> Vec<String> {
    fn walk(node: &CategoryNode, selected: &Selection, out: &mut Vec<String>) {
        if node.is_checked(selected) {
            out.push(node.id.clone());
        }
        for child in &node.children {
            walk(child, selected, out);
        }
    }

    let mut out = Vec::new();
    for root in roots {
        walk(root, selected, &mut out);
    }
    out
}

/// Root-to-node path for `id`, inclusive.
fn path_to<'a>(roots: &'a [CategoryNode], id: &str) -> Option<Vec<&'a CategoryNode>> {
    for root in roots {
        if root.id == id {
            return Some(vec![root]);
        }
        if let Some(mut path) = path_to(&root.children, id) {
            path.insert(0, root);
            return Some(path);
        }
    }
    None
}
