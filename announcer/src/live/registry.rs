//! Memory of recently announced services.
//!
//! Darwin service IDs stay on the board for a couple of minutes after
//! departure, so a poller would otherwise announce the same train on every
//! pass. Entries expire after the configured TTL.

use moka::future::Cache as MokaCache;

use crate::config::AnnouncerConfig;

/// TTL set of announced Darwin service IDs.
#[derive(Clone)]
pub struct AnnouncedRegistry {
    services: MokaCache<String, ()>,
}

impl AnnouncedRegistry {
    /// Create a registry with the TTL and capacity from `config`.
    pub fn new(config: &AnnouncerConfig) -> Self {
        let services = MokaCache::builder()
            .time_to_live(config.announced_ttl())
            .max_capacity(config.announced_capacity)
            .build();

        Self { services }
    }

    /// Whether `service_id` was announced within the TTL.
    pub fn contains(&self, service_id: &str) -> bool {
        self.services.contains_key(service_id)
    }

    /// Records `service_id` as announced.
    ///
    /// Returns `false` if it was already present, in which case the caller
    /// lost the race to another poller and must not announce it.
    pub async fn claim(&self, service_id: &str) -> bool {
        self.services
            .entry_by_ref(service_id)
            .or_insert(())
            .await
            .is_fresh()
    }

    /// Forgets every announced service.
    pub fn clear(&self) {
        self.services.invalidate_all();
    }

    /// Approximate number of remembered services (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.services.entry_count()
    }
}

impl std::fmt::Debug for AnnouncedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnouncedRegistry")
            .field("entries", &self.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn claim_once() {
        let registry = AnnouncedRegistry::new(&AnnouncerConfig::default());

        assert!(!registry.contains("svc1"));
        assert!(registry.claim("svc1").await);
        assert!(registry.contains("svc1"));
        assert!(!registry.claim("svc1").await);
        assert!(!registry.contains("svc2"));
    }

    #[tokio::test]
    async fn concurrent_claims_have_one_winner() {
        let registry = AnnouncedRegistry::new(&AnnouncerConfig::default());

        let (a, b) = tokio::join!(registry.claim("svc1"), registry.claim("svc1"));
        assert!(a ^ b);
    }

    #[tokio::test]
    async fn entries_expire() {
        let config = AnnouncerConfig {
            announced_ttl_secs: 1,
            ..AnnouncerConfig::default()
        };
        let registry = AnnouncedRegistry::new(&config);

        assert!(registry.claim("svc1").await);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!registry.contains("svc1"));
        assert!(registry.claim("svc1").await);
    }

    #[tokio::test]
    async fn clear_forgets() {
        let registry = AnnouncedRegistry::new(&AnnouncerConfig::default());
        registry.claim("svc1").await;
        registry.clear();
        assert!(!registry.contains("svc1"));
    }
}
