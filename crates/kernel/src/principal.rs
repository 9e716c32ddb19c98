//! Request principal forwarded by the authenticating gateway.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! principal's roles and permissions as comma-separated headers. Requests
//! without the headers resolve to an anonymous principal with no roles and
//! no permissions.

use axum::http::HeaderMap;

use crate::menu::WILDCARD_PERMISSION;

/// Header carrying the principal's role names.
pub const ROLES_HEADER: &str = "x-auth-roles";

/// Header carrying the principal's permission strings.
pub const PERMISSIONS_HEADER: &str = "x-auth-permissions";

/// The roles and permissions of the requesting principal.
#[derive(Debug, Clone, Default)]
pub struct Principal {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl Principal {
    /// Parse the principal from gateway-forwarded request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            roles: split_header(headers, ROLES_HEADER),
            permissions: split_header(headers, PERMISSIONS_HEADER),
        }
    }

    /// Check a single permission, honoring the `*:*` wildcard.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|held| held == WILDCARD_PERMISSION || held == permission)
    }
}

/// Split a comma-separated header into trimmed, non-empty values.
fn split_header(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_headers_mean_anonymous() {
        let principal = Principal::from_headers(&HeaderMap::new());
        assert!(principal.roles.is_empty());
        assert!(principal.permissions.is_empty());
        assert!(!principal.has_permission("menus:manage"));
    }

    #[test]
    fn parses_comma_separated_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLES_HEADER, "Admin, Manager".parse().unwrap());
        headers.insert(PERMISSIONS_HEADER, "orders:read,orders:write, ,".parse().unwrap());

        let principal = Principal::from_headers(&headers);
        assert_eq!(principal.roles, vec!["Admin", "Manager"]);
        assert_eq!(principal.permissions, vec!["orders:read", "orders:write"]);
    }

    #[test]
    fn wildcard_grants_every_permission() {
        let mut headers = HeaderMap::new();
        headers.insert(PERMISSIONS_HEADER, "*:*".parse().unwrap());

        let principal = Principal::from_headers(&headers);
        assert!(principal.has_permission("menus:manage"));
        assert!(principal.has_permission("anything:at-all"));
    }
}
