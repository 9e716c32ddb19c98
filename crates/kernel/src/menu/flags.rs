//! Feature flag keys gating menu visibility.

use crate::models::ShopSettings;

/// A feature flag attached to a menu item.
///
/// Flags are stored as free-form strings and parsed into this closed
/// enumeration at resolution time, so the gate for every known key is an
/// explicit match arm. Unrecognized keys land in [`FeatureFlag::Other`] and
/// pass the filter, while a missing settings row drops every flagged item;
/// the two cases deliberately disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureFlag {
    /// Core ecommerce. Always enabled once a settings row exists.
    Ecommerce,
    /// Inventory tracking.
    Inventory,
    /// Shipping options.
    Shipping,
    /// Cash on delivery.
    CashOnDelivery,
    /// Customer portal.
    Portal,
    /// Blog. Has no toggle of its own, always enabled.
    Blog,
    /// Unrecognized flag key.
    Other(String),
}

impl FeatureFlag {
    /// Parse a stored flag key.
    pub fn from_key(key: &str) -> Self {
        match key {
            "ecommerce" | "ecommerce_enabled" => Self::Ecommerce,
            "inventory_enabled" => Self::Inventory,
            "shipping_enabled" => Self::Shipping,
            "cod_enabled" => Self::CashOnDelivery,
            "portal_enabled" => Self::Portal,
            "blog" => Self::Blog,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this flag is enabled under the given settings.
    pub fn enabled(&self, settings: &ShopSettings) -> bool {
        match self {
            Self::Ecommerce | Self::Blog => true,
            Self::Inventory => settings.track_inventory,
            Self::Shipping => settings.shipping_enabled,
            Self::CashOnDelivery => settings.cod_enabled,
            Self::Portal => settings.portal_enabled,
            // Unknown keys fail open.
            Self::Other(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            updated: chrono::Utc::now(),
        }
    }

    #[test]
    fn parses_known_keys() {
        assert_eq!(FeatureFlag::from_key("ecommerce"), FeatureFlag::Ecommerce);
        assert_eq!(
            FeatureFlag::from_key("ecommerce_enabled"),
            FeatureFlag::Ecommerce
        );
        assert_eq!(
            FeatureFlag::from_key("inventory_enabled"),
            FeatureFlag::Inventory
        );
        assert_eq!(
            FeatureFlag::from_key("shipping_enabled"),
            FeatureFlag::Shipping
        );
        assert_eq!(
            FeatureFlag::from_key("cod_enabled"),
            FeatureFlag::CashOnDelivery
        );
        assert_eq!(FeatureFlag::from_key("portal_enabled"), FeatureFlag::Portal);
        assert_eq!(FeatureFlag::from_key("blog"), FeatureFlag::Blog);
    }

    #[test]
    fn unknown_key_parses_to_other() {
        assert_eq!(
            FeatureFlag::from_key("loyalty_enabled"),
            FeatureFlag::Other("loyalty_enabled".to_string())
        );
    }

    #[test]
    fn ecommerce_and_blog_always_enabled() {
        let off = settings(false, false, false, false);
        assert!(FeatureFlag::Ecommerce.enabled(&off));
        assert!(FeatureFlag::Blog.enabled(&off));
    }

    #[test]
    fn toggles_follow_settings() {
        let off = settings(false, false, false, false);
        assert!(!FeatureFlag::Inventory.enabled(&off));
        assert!(!FeatureFlag::Shipping.enabled(&off));
        assert!(!FeatureFlag::CashOnDelivery.enabled(&off));
        assert!(!FeatureFlag::Portal.enabled(&off));

        assert!(FeatureFlag::Inventory.enabled(&settings(true, false, false, false)));
        assert!(FeatureFlag::Shipping.enabled(&settings(false, true, false, false)));
        assert!(FeatureFlag::CashOnDelivery.enabled(&settings(false, false, true, false)));
        assert!(FeatureFlag::Portal.enabled(&settings(false, false, false, true)));
    }

    #[test]
    fn unknown_flag_fails_open() {
        let off = settings(false, false, false, false);
        assert!(FeatureFlag::Other("loyalty_enabled".to_string()).enabled(&off));
    }
}
