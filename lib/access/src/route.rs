//! Route classification.
//!
//! The route table maps path prefixes ("areas") to the access they require.
//! It is validated once at startup and immutable afterwards.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::role::RoleLabel;

/// Access required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Anyone may view the route.
    Public,
    /// Only anonymous visitors may view the route (login, signup).
    GuestOnly,
    /// Only users holding the role may view the route.
    RoleScoped(RoleLabel),
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// Path prefix of the area, e.g. `/admin`.
    pub prefix: String,
    /// Access required anywhere under the prefix.
    pub access: Classification,
}

impl RouteSpec {
    /// Creates a route entry.
    #[must_use]
    pub fn new(prefix: impl Into<String>, access: Classification) -> Self {
        Self {
            prefix: prefix.into(),
            access,
        }
    }
}

/// Validated, immutable route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    /// Sorted longest prefix first.
    entries: Vec<RouteSpec>,
}

impl RouteTable {
    /// Validates a list of route entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a prefix is not absolute, or if two entries
    /// normalize to the same prefix (longest-prefix ties are never resolved
    /// silently). Prefixes are compared in canonical form, so `/Admin` and
    /// `/admin` are the same area.
    pub fn new(specs: Vec<RouteSpec>) -> Result<Self, Report<ConfigurationError>> {
        let mut entries: Vec<RouteSpec> = Vec::with_capacity(specs.len());

        for spec in specs {
            if !spec.prefix.starts_with('/') {
                return Err(ConfigurationError::InvalidPrefix {
                    prefix: spec.prefix,
                }
                .into());
            }

            let prefix = canonical_path(&spec.prefix);
            if entries.iter().any(|e| e.prefix == prefix) {
                return Err(ConfigurationError::AmbiguousRoute { prefix }.into());
            }
            entries.push(RouteSpec::new(prefix, spec.access));
        }

        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { entries })
    }

    /// Classifies a requested path.
    ///
    /// The query string and fragment are ignored. The rest is matched in
    /// canonical form: percent-decoded, ASCII-lowercased and with dot
    /// segments resolved, so `/staff/../admin`, `/%61dmin` and `/ADMIN` are
    /// all classified as `/admin`. Paths outside every area are `Public`.
    #[must_use]
    pub fn classify(&self, path: &str) -> Classification {
        let path = canonical_path(path);

        self.entries
            .iter()
            .find(|entry| prefix_matches(&entry.prefix, &path))
            .map_or(Classification::Public, |entry| entry.access)
    }

    /// Returns the normalized entries, longest prefix first.
    #[must_use]
    pub fn entries(&self) -> &[RouteSpec] {
        &self.entries
    }
}

impl Default for RouteTable {
    /// The console's areas: one per role, plus the guest-only auth pages.
    fn default() -> Self {
        let mut entries: Vec<RouteSpec> = RoleLabel::ALL
            .into_iter()
            .map(|role| RouteSpec::new(role.area(), Classification::RoleScoped(role)))
            .collect();
        entries.push(RouteSpec::new("/login", Classification::GuestOnly));
        entries.push(RouteSpec::new("/signup", Classification::GuestOnly));

        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { entries }
    }
}

/// Decoding rounds before a still-encoded path is matched as is.
const MAX_DECODE_ROUNDS: usize = 4;

/// Reduces a request path to the form route prefixes are stored in.
///
/// Percent-escapes are decoded until the path stops changing, so encoded
/// separators (`%2F`) and dots (`%2e`) take part in normalization. Invalid
/// UTF-8 after decoding is replaced rather than rejected. Backslashes count
/// as separators and ASCII letters are folded to lowercase.
fn canonical_path(path: &str) -> String {
    let mut path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_string();

    for _ in 0..MAX_DECODE_ROUNDS {
        let decoded = String::from_utf8_lossy(&urlencoding::decode_binary(path.as_bytes()))
            .into_owned();
        if decoded == path {
            break;
        }
        path = decoded;
    }

    normalize_path(&path.replace('\\', "/").to_ascii_lowercase())
}

/// Collapses empty and `.` segments and resolves `..` segments.
///
/// `..` above the root stays at the root.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Matches on segment boundaries only: `/admin` covers `/admin/x` but not
/// `/administrators`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::default()
    }

    #[test]
    fn role_areas_are_scoped() {
        let t = table();
        assert_eq!(
            t.classify("/admin/dashboard"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
        assert_eq!(
            t.classify("/staff/event"),
            Classification::RoleScoped(RoleLabel::Staff)
        );
        assert_eq!(
            t.classify("/alumni/profile/edit"),
            Classification::RoleScoped(RoleLabel::Alumni)
        );
        assert_eq!(t.classify("/admin"), Classification::RoleScoped(RoleLabel::Admin));
    }

    #[test]
    fn auth_pages_are_guest_only() {
        let t = table();
        assert_eq!(t.classify("/login"), Classification::GuestOnly);
        assert_eq!(t.classify("/signup"), Classification::GuestOnly);
    }

    #[test]
    fn unmatched_paths_are_public() {
        let t = table();
        for path in ["/", "", "/events", "/gallery/2024", "/administrators", "/staffroom"] {
            assert_eq!(t.classify(path), Classification::Public, "path {path:?}");
        }
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let t = table();
        assert_eq!(
            t.classify("/admin/dashboard?tab=posts"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
        assert_eq!(t.classify("/login#form"), Classification::GuestOnly);
        assert_eq!(t.classify("/events?next=/admin"), Classification::Public);
    }

    #[test]
    fn dot_segments_cannot_escape_an_area_check() {
        let t = table();
        assert_eq!(
            t.classify("/staff/../admin/dashboard"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
        assert_eq!(
            t.classify("/./admin//dashboard"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
        assert_eq!(
            t.classify("/../../admin"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
        assert_eq!(t.classify("/admin/.."), Classification::Public);
    }

    #[test]
    fn encoded_paths_cannot_escape_an_area_check() {
        let t = table();
        for path in [
            "/%61dmin/dashboard",
            "/admin%2Fdashboard",
            "/admin%2fdashboard",
            "/staff/%2e%2e/admin",
            "/staff%2F..%2Fadmin",
            "/%2561dmin/dashboard",
            "/admin%5Cdashboard",
            "/staff\\..\\admin",
        ] {
            assert_eq!(
                t.classify(path),
                Classification::RoleScoped(RoleLabel::Admin),
                "path {path:?}"
            );
        }
        assert_eq!(t.classify("/%6Cogin"), Classification::GuestOnly);
    }

    #[test]
    fn area_match_ignores_ascii_case() {
        let t = table();
        for path in ["/ADMIN/dashboard", "/Admin", "/aDmIn/users?x=1"] {
            assert_eq!(
                t.classify(path),
                Classification::RoleScoped(RoleLabel::Admin),
                "path {path:?}"
            );
        }
        assert_eq!(t.classify("/LOGIN"), Classification::GuestOnly);
        assert_eq!(t.classify("/ADMINISTRATORS"), Classification::Public);
    }

    #[test]
    fn invalid_utf8_escapes_do_not_match_an_area() {
        let t = table();
        assert_eq!(t.classify("/%ff%fe/dashboard"), Classification::Public);
        assert_eq!(
            t.classify("/admin/%ff"),
            Classification::RoleScoped(RoleLabel::Admin)
        );
    }

    #[test]
    fn longest_prefix_wins() {
        let t = RouteTable::new(vec![
            RouteSpec::new("/staff", Classification::RoleScoped(RoleLabel::Staff)),
            RouteSpec::new("/staff/public", Classification::Public),
        ])
        .expect("valid table");

        assert_eq!(t.classify("/staff/public/news"), Classification::Public);
        assert_eq!(
            t.classify("/staff/members"),
            Classification::RoleScoped(RoleLabel::Staff)
        );
    }

    #[test]
    fn root_prefix_matches_everything_else() {
        let t = RouteTable::new(vec![
            RouteSpec::new("/", Classification::RoleScoped(RoleLabel::Alumni)),
            RouteSpec::new("/login", Classification::GuestOnly),
        ])
        .expect("valid table");

        assert_eq!(t.classify("/login"), Classification::GuestOnly);
        assert_eq!(
            t.classify("/anything"),
            Classification::RoleScoped(RoleLabel::Alumni)
        );
    }

    #[test]
    fn duplicate_prefix_is_rejected() {
        let err = RouteTable::new(vec![
            RouteSpec::new("/admin", Classification::RoleScoped(RoleLabel::Admin)),
            RouteSpec::new("/admin/", Classification::RoleScoped(RoleLabel::Staff)),
        ])
        .expect_err("ambiguous");
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn prefixes_differing_only_in_case_are_ambiguous() {
        let err = RouteTable::new(vec![
            RouteSpec::new("/admin", Classification::RoleScoped(RoleLabel::Admin)),
            RouteSpec::new("/Admin", Classification::Public),
        ])
        .expect_err("ambiguous");
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let err = RouteTable::new(vec![RouteSpec::new(
            "admin",
            Classification::RoleScoped(RoleLabel::Admin),
        )])
        .expect_err("invalid");
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn default_table_is_valid() {
        let rebuilt = RouteTable::new(table().entries().to_vec()).expect("valid");
        assert_eq!(rebuilt, table());
    }

    #[test]
    fn route_spec_deserializes_from_config_shape() {
        let json = r#"[
            {"prefix": "/admin", "access": {"role_scoped": "Admin"}},
            {"prefix": "/login", "access": "guest_only"},
            {"prefix": "/news", "access": "public"}
        ]"#;
        let specs: Vec<RouteSpec> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(specs[0].access, Classification::RoleScoped(RoleLabel::Admin));
        assert_eq!(specs[1].access, Classification::GuestOnly);
        assert_eq!(specs[2].access, Classification::Public);
    }
}
