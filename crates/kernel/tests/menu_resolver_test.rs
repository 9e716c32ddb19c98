//! Menu resolution integration tests.
//!
//! Exercises the public resolution pipeline on a realistic admin menu:
//! visibility filtering per principal, feature gating from shop settings,
//! and tree assembly, without touching the database.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use mercato_kernel::menu::{self, MenuNode, WILDCARD_PERMISSION};
use mercato_kernel::models::{MenuItem, ShopSettings};

fn item(id: u128, label: &str, parent: Option<u128>, weight: i32) -> MenuItem {
    MenuItem {
        id: Uuid::from_u128(id),
        menu_name: "admin".to_string(),
        label: label.to_string(),
        route: format!("/admin/{}", label.to_lowercase()),
        icon: None,
        parent_id: parent.map(Uuid::from_u128),
        weight,
        required_roles: Vec::new(),
        required_permissions: Vec::new(),
        feature_flag: None,
        created: 0,
        changed: 0,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn settings(
    track_inventory: bool,
    shipping_enabled: bool,
    cod_enabled: bool,
    portal_enabled: bool,
) -> ShopSettings {
    ShopSettings {
        track_inventory,
        shipping_enabled,
        cod_enabled,
        portal_enabled,
        updated: Utc::now(),
    }
}

/// A typical admin menu: dashboard, catalog with inventory, orders with
/// shipping and cash on delivery, the customer portal, and a blog.
fn admin_menu() -> Vec<MenuItem> {
    let mut catalog = item(2, "Catalog", None, 2);
    catalog.required_permissions = strings(&["catalog:read"]);

    let mut products = item(3, "Products", Some(2), 1);
    products.required_permissions = strings(&["catalog:read"]);

    let mut inventory = item(4, "Inventory", Some(2), 2);
    inventory.required_permissions = strings(&["catalog:read", "inventory:read"]);
    inventory.feature_flag = Some("inventory_enabled".to_string());

    let mut orders = item(5, "Orders", None, 3);
    orders.required_permissions = strings(&["orders:read"]);
    orders.feature_flag = Some("ecommerce".to_string());

    let mut shipping = item(6, "Shipping", Some(5), 2);
    shipping.required_permissions = strings(&["orders:read"]);
    shipping.feature_flag = Some("shipping_enabled".to_string());

    let mut cod = item(7, "Cash on delivery", Some(5), 1);
    cod.required_permissions = strings(&["orders:read"]);
    cod.feature_flag = Some("cod_enabled".to_string());

    let mut portal = item(8, "Portal", None, 4);
    portal.required_roles = strings(&["Admin"]);
    portal.feature_flag = Some("portal_enabled".to_string());

    let mut blog = item(9, "Blog", None, 5);
    blog.feature_flag = Some("blog".to_string());

    vec![
        item(1, "Dashboard", None, 1),
        catalog,
        products,
        inventory,
        orders,
        shipping,
        cod,
        portal,
        blog,
    ]
}

fn labels(nodes: &[MenuNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.item.label.as_str()).collect()
}

#[test]
fn wildcard_admin_sees_everything_enabled() {
    let tree = menu::resolve(
        admin_menu(),
        &strings(&["Admin"]),
        &strings(&[WILDCARD_PERMISSION]),
        Some(&settings(true, true, true, true)),
    );

    assert_eq!(
        labels(&tree),
        vec!["Dashboard", "Catalog", "Orders", "Portal", "Blog"]
    );

    let catalog = &tree[1];
    assert_eq!(labels(&catalog.children), vec!["Products", "Inventory"]);

    // Children sort by weight: cash on delivery (1) before shipping (2)
    let orders = &tree[2];
    assert_eq!(labels(&orders.children), vec!["Cash on delivery", "Shipping"]);
}

#[test]
fn manager_sees_only_granted_sections() {
    let tree = menu::resolve(
        admin_menu(),
        &strings(&["Manager"]),
        &strings(&["catalog:read", "orders:read"]),
        Some(&settings(false, true, false, true)),
    );

    // No inventory permission and tracking is off; portal needs the Admin
    // role; cash on delivery is disabled.
    assert_eq!(labels(&tree), vec!["Dashboard", "Catalog", "Orders", "Blog"]);
    assert_eq!(labels(&tree[1].children), vec!["Products"]);
    assert_eq!(labels(&tree[2].children), vec!["Shipping"]);
}

#[test]
fn anonymous_sees_only_unrestricted_items() {
    let tree = menu::resolve(
        admin_menu(),
        &[],
        &[],
        Some(&settings(true, true, true, true)),
    );

    assert_eq!(labels(&tree), vec!["Dashboard", "Blog"]);
}

#[test]
fn missing_settings_hide_every_flagged_item() {
    let tree = menu::resolve(
        admin_menu(),
        &strings(&["Admin"]),
        &strings(&[WILDCARD_PERMISSION]),
        None,
    );

    assert_eq!(labels(&tree), vec!["Dashboard", "Catalog"]);
    assert_eq!(labels(&tree[1].children), vec!["Products"]);
}

#[test]
fn filtered_parent_promotes_orphaned_children() {
    // Without orders:read the Orders section disappears; its children are
    // gone with it (they carry the same permission), but an unrestricted
    // child of a filtered parent surfaces as a root.
    let mut items = admin_menu();
    items.push(item(10, "Returns", Some(5), 1));

    let tree = menu::resolve(
        items,
        &[],
        &strings(&["catalog:read"]),
        Some(&settings(true, true, true, true)),
    );

    assert_eq!(
        labels(&tree),
        vec!["Dashboard", "Returns", "Catalog", "Blog"]
    );
}

#[test]
fn cascade_visibility_dominates_child_visibility() {
    let items = admin_menu();
    // Everything individually visible except the Orders section itself.
    let visible: HashSet<Uuid> = items
        .iter()
        .map(|i| i.id)
        .filter(|id| *id != Uuid::from_u128(5))
        .collect();

    let survivors = menu::cascade_visibility(items, &visible);
    let names: Vec<&str> = survivors.iter().map(|i| i.label.as_str()).collect();

    // Shipping and cash on delivery are in the visible set but sit under
    // the hidden Orders item.
    assert!(!names.contains(&"Orders"));
    assert!(!names.contains(&"Shipping"));
    assert!(!names.contains(&"Cash on delivery"));
    assert!(names.contains(&"Dashboard"));
    assert!(names.contains(&"Inventory"));
}

#[test]
fn resolved_tree_serializes_flat_item_with_children() {
    let tree = menu::resolve(
        admin_menu(),
        &strings(&["Admin"]),
        &strings(&[WILDCARD_PERMISSION]),
        Some(&settings(true, true, true, true)),
    );

    let value = serde_json::to_value(&tree).unwrap();
    let catalog = &value[1];

    // Item fields are flattened into the node object.
    assert_eq!(catalog["label"], "Catalog");
    assert_eq!(catalog["route"], "/admin/catalog");
    assert_eq!(catalog["children"][0]["label"], "Products");
    assert_eq!(catalog["children"][1]["feature_flag"], "inventory_enabled");
}
