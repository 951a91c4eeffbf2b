//! Tenant/API catalog for the traffic simulation.
//!
//! Pure static data: three demo tenants with their tiers, baseline error
//! rates, baseline latencies, subscription counts, and the APIs each
//! exposes. Iteration order is declaration order, which fixes log and
//! exposition ordering. Label cardinality of every generated metric is
//! bounded by this catalog.

/// Subscription tier for a tenant. Display and log use only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Enterprise,
    Business,
    Starter,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Enterprise => "enterprise",
            Tier::Business => "business",
            Tier::Starter => "starter",
        }
    }
}

/// One API a tenant exposes, with its ordered endpoint paths.
#[derive(Debug, Clone, Copy)]
pub struct ApiDescriptor {
    pub id: &'static str,
    pub endpoints: &'static [&'static str],
}

/// A tenant account and its traffic-shape parameters.
///
/// Immutable, loaded once at startup. `error_rate` is the probability in
/// [0, 1] that a synthetic request is classified as an error. `base_latency`
/// is the median of the simulated request duration distribution, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct TenantProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub tier: Tier,
    pub error_rate: f64,
    pub base_latency: f64,
    pub subscriptions: i64,
    /// Marks the demo tenant that always hovers near its rate limit,
    /// which drives the alerting demo.
    pub near_rate_limit: bool,
    pub apis: &'static [ApiDescriptor],
}

/// The demo tenant catalog (OASIS-themed).
pub static TENANTS: &[TenantProfile] = &[
    TenantProfile {
        id: "ioi-corp",
        display_name: "IOI Corporation",
        tier: Tier::Enterprise,
        // The baddies have issues: slow legacy systems, high error rate.
        error_rate: 0.08,
        base_latency: 0.15,
        subscriptions: 45,
        near_rate_limit: true,
        apis: &[
            ApiDescriptor {
                id: "debt-collector-api",
                endpoints: &["/debts", "/servants", "/loyalty-centers"],
            },
            ApiDescriptor {
                id: "surveillance-api",
                endpoints: &["/avatars/track", "/sixers/locate", "/oasis/monitor"],
            },
        ],
    },
    TenantProfile {
        id: "gregarious-games",
        display_name: "Gregarious Games",
        tier: Tier::Business,
        // Well maintained, fast modern APIs.
        error_rate: 0.01,
        base_latency: 0.03,
        subscriptions: 128,
        near_rate_limit: false,
        apis: &[
            ApiDescriptor {
                id: "oasis-auth-api",
                endpoints: &["/login", "/logout", "/sessions", "/tokens"],
            },
            ApiDescriptor {
                id: "avatar-api",
                endpoints: &["/avatars", "/customization", "/inventory"],
            },
            ApiDescriptor {
                id: "inventory-api",
                endpoints: &["/items", "/artifacts", "/coins", "/trade"],
            },
            ApiDescriptor {
                id: "world-builder-api",
                endpoints: &["/worlds", "/sectors", "/teleport"],
            },
        ],
    },
    TenantProfile {
        id: "gunters-guild",
        display_name: "Gunters Guild",
        tier: Tier::Starter,
        // Community maintained.
        error_rate: 0.02,
        base_latency: 0.05,
        subscriptions: 23,
        near_rate_limit: false,
        apis: &[
            ApiDescriptor {
                id: "almanac-api",
                endpoints: &["/clues", "/halliday", "/easter-eggs", "/journals"],
            },
            ApiDescriptor {
                id: "leaderboard-api",
                endpoints: &["/rankings", "/high-five", "/scores"],
            },
        ],
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        let ids: Vec<&str> = TENANTS.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["ioi-corp", "gregarious-games", "gunters-guild"]);
    }

    #[test]
    fn test_traffic_parameters_are_sane() {
        for tenant in TENANTS {
            assert!(
                (0.0..=1.0).contains(&tenant.error_rate),
                "{} error_rate out of range",
                tenant.id
            );
            assert!(
                tenant.base_latency > 0.0,
                "{} base_latency must be positive",
                tenant.id
            );
            assert!(tenant.subscriptions > 0, "{} has no subscriptions", tenant.id);
            assert!(!tenant.apis.is_empty(), "{} has no APIs", tenant.id);
            for api in tenant.apis {
                assert!(!api.endpoints.is_empty(), "{} has no endpoints", api.id);
            }
        }
    }

    #[test]
    fn test_only_ioi_is_near_rate_limit() {
        let flagged: Vec<&str> = TENANTS
            .iter()
            .filter(|t| t.near_rate_limit)
            .map(|t| t.id)
            .collect();
        assert_eq!(flagged, vec!["ioi-corp"]);
    }

    #[test]
    fn test_tier_display_names() {
        assert_eq!(Tier::Enterprise.as_str(), "enterprise");
        assert_eq!(Tier::Business.as_str(), "business");
        assert_eq!(Tier::Starter.as_str(), "starter");
    }

    #[test]
    fn test_gunters_guild_almanac_endpoints() {
        let guild = TENANTS
            .iter()
            .find(|t| t.id == "gunters-guild")
            .expect("gunters-guild missing");
        let almanac = guild
            .apis
            .iter()
            .find(|a| a.id == "almanac-api")
            .expect("almanac-api missing");
        assert!(almanac.endpoints.contains(&"/clues"));
    }
}
