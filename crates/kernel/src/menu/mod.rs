//! Menu resolution: visibility filtering and hierarchy assembly.
//!
//! Menu items are flat records owned by the persistence layer. Resolution
//! turns a snapshot of them into the tree a request principal may see:
//! - Role filter: one shared role is enough (any-of)
//! - Permission filter: every listed permission is required (all-of),
//!   with `*:*` as the universal wildcard
//! - Feature-flag filter: items gated on shop settings toggles
//! - Hierarchy assembly: parent/child nesting, weight-ordered siblings
//!
//! All of it is pure and synchronous; callers pass the item snapshot and
//! principal context in and get a freshly built tree back.

mod flags;
mod resolver;

pub use flags::FeatureFlag;
pub use resolver::{
    MenuNode, WILDCARD_PERMISSION, build_hierarchy, cascade_visibility, filter_by_feature_flags,
    filter_by_permissions, filter_by_roles, resolve,
};
