//! Menu visibility and hierarchy resolution.
//!
//! Resolution is a pipeline of pure functions over a flat snapshot of
//! [`MenuItem`] records: three independent visibility filters (roles,
//! permissions, feature flags) followed by assembly into a weight-ordered
//! tree. [`cascade_visibility`] is an alternate entry point for callers that
//! computed per-item visibility elsewhere and need it propagated down parent
//! chains.
//!
//! Every function here is total: dangling parent references, unknown flag
//! keys, and empty inputs degrade gracefully, never panic.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use super::flags::FeatureFlag;
use crate::models::{MenuItem, ShopSettings};

/// Permission wildcard granting every permission check.
pub const WILDCARD_PERMISSION: &str = "*:*";

/// A resolved menu tree node: one menu item plus its visible children,
/// sorted by weight.
#[derive(Debug, Clone, Serialize)]
pub struct MenuNode {
    /// The underlying menu item.
    #[serde(flatten)]
    pub item: MenuItem,

    /// Child nodes, ascending by weight.
    pub children: Vec<MenuNode>,
}

/// Keep items the user's roles grant access to.
///
/// An item with no `required_roles` is unrestricted. Otherwise one shared
/// role is enough ("any-of"), in contrast to [`filter_by_permissions`],
/// which demands every listed permission.
pub fn filter_by_roles(items: Vec<MenuItem>, user_roles: &[String]) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| {
            item.required_roles.is_empty()
                || item
                    .required_roles
                    .iter()
                    .any(|required| user_roles.iter().any(|held| held == required))
        })
        .collect()
}

/// Keep items the user's permissions grant access to.
///
/// An item with no `required_permissions` is unrestricted. The wildcard
/// [`WILDCARD_PERMISSION`] passes everything. Otherwise the user must hold
/// **all** listed permissions ("all-of").
pub fn filter_by_permissions(items: Vec<MenuItem>, user_permissions: &[String]) -> Vec<MenuItem> {
    if user_permissions.iter().any(|p| p == WILDCARD_PERMISSION) {
        return items;
    }

    let held: HashSet<&str> = user_permissions.iter().map(String::as_str).collect();

    items
        .into_iter()
        .filter(|item| {
            item.required_permissions
                .iter()
                .all(|required| held.contains(required.as_str()))
        })
        .collect()
}

/// Keep items whose feature flag is enabled in the shop settings.
///
/// Items without a flag always pass. When no settings row exists yet,
/// every flagged item is dropped. Unknown flag keys pass; see
/// [`FeatureFlag`] for the asymmetry between the two cases.
pub fn filter_by_feature_flags(
    items: Vec<MenuItem>,
    settings: Option<&ShopSettings>,
) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| match (&item.feature_flag, settings) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(key), Some(settings)) => FeatureFlag::from_key(key).enabled(settings),
        })
        .collect()
}

/// Nest a flat item list into a tree of [`MenuNode`]s, returning the roots.
///
/// Each item lands under its parent when `parent_id` resolves to another
/// item in the input; otherwise it becomes a root. That covers items with
/// no parent, parents filtered out upstream, and dangling references alike.
/// An item naming itself as parent is routed to the root rather than nested
/// under itself.
///
/// Children and roots are sorted ascending by `weight`; the sort is stable,
/// so equal weights keep their input order.
pub fn build_hierarchy(items: Vec<MenuItem>) -> Vec<MenuNode> {
    let index: HashMap<Uuid, usize> = items
        .iter()
        .enumerate()
        .map(|(slot, item)| (item.id, slot))
        .collect();

    let mut arena: Vec<Option<MenuNode>> = items
        .into_iter()
        .map(|item| {
            Some(MenuNode {
                item,
                children: Vec::new(),
            })
        })
        .collect();

    // Route every node to its parent's slot or to the root list, by arena
    // index. Population order preserves input order within each slot.
    let mut child_slots: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    let mut root_slots: Vec<usize> = Vec::new();

    for slot in 0..arena.len() {
        let parent_slot = arena[slot]
            .as_ref()
            .and_then(|node| node.item.parent_id)
            .and_then(|parent_id| index.get(&parent_id).copied());

        match parent_slot {
            Some(parent) if parent != slot => child_slots[parent].push(slot),
            _ => root_slots.push(slot),
        }
    }

    let mut roots: Vec<MenuNode> = root_slots
        .into_iter()
        .filter_map(|slot| assemble(&mut arena, &child_slots, slot))
        .collect();

    sort_by_weight(&mut roots);
    roots
}

/// Move the node in `slot` out of the arena with its subtree attached.
///
/// Each slot is referenced either by exactly one parent or by the root
/// list, so the take never observes an empty slot on well-formed input.
/// Nodes on a malformed parent cycle are unreachable from the roots and
/// simply never assembled.
fn assemble(
    arena: &mut [Option<MenuNode>],
    child_slots: &[Vec<usize>],
    slot: usize,
) -> Option<MenuNode> {
    let mut node = arena[slot].take()?;
    for &child in &child_slots[slot] {
        if let Some(child_node) = assemble(arena, child_slots, child) {
            node.children.push(child_node);
        }
    }
    Some(node)
}

/// Recursively sort sibling lists ascending by weight (stable).
fn sort_by_weight(nodes: &mut [MenuNode]) {
    nodes.sort_by_key(|node| node.item.weight);
    for node in nodes.iter_mut() {
        sort_by_weight(&mut node.children);
    }
}

/// Propagate pre-computed visibility down parent chains.
///
/// An item survives only if its own id is in `visible_ids` and every
/// ancestor, walked via `parent_id` through the full unfiltered input, is
/// visible too: a hidden parent hides all of its descendants.
///
/// A `parent_id` that does not resolve within `items` ends the walk: only
/// an existing but invisible parent blocks a child. This is deliberately
/// different from [`build_hierarchy`], which routes dangling references to
/// the root list. The ancestor walk is bounded by the item count, so a
/// malformed parent cycle hides the item instead of looping forever.
pub fn cascade_visibility(items: Vec<MenuItem>, visible_ids: &HashSet<Uuid>) -> Vec<MenuItem> {
    let parents: HashMap<Uuid, Option<Uuid>> = items
        .iter()
        .map(|item| (item.id, item.parent_id))
        .collect();

    items
        .into_iter()
        .filter(|item| {
            if !visible_ids.contains(&item.id) {
                return false;
            }

            let mut current = item.parent_id;
            let mut hops = 0;
            while let Some(parent_id) = current {
                let Some(next) = parents.get(&parent_id) else {
                    break;
                };
                if !visible_ids.contains(&parent_id) {
                    return false;
                }
                hops += 1;
                if hops > parents.len() {
                    return false;
                }
                current = *next;
            }

            true
        })
        .collect()
}

/// Resolve the menu a principal may see.
///
/// Applies the three visibility filters in sequence (each only removes
/// items, so their order does not affect the result), then nests the
/// survivors into a weight-ordered tree.
pub fn resolve(
    items: Vec<MenuItem>,
    user_roles: &[String],
    user_permissions: &[String],
    settings: Option<&ShopSettings>,
) -> Vec<MenuNode> {
    let items = filter_by_roles(items, user_roles);
    let items = filter_by_permissions(items, user_permissions);
    let items = filter_by_feature_flags(items, settings);
    build_hierarchy(items)
}
