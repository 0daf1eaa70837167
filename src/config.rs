use std::fmt;
use std::sync::Arc;

/// How warning-level alerts are treated before TLS 1.3.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AlertBehavior {
    /// Every alert other than close_notify ends the connection.
    FailOnWarnings,
    /// Warning-level alerts are dropped.
    IgnoreWarnings,
}

impl Default for AlertBehavior {
    fn default() -> Self {
        AlertBehavior::FailOnWarnings
    }
}

/// Removes a session from the application's session cache.
///
/// Called when a cached session must not be resumed any more, e.g. after
/// the peer sent a fatal alert (RFC 5077 5.1). Any cache key material the
/// hook needs should be captured by the implementor.
pub trait SessionCacheDelete: Send + Sync {
    fn delete(&self, session_id: &[u8]);
}

impl<F> SessionCacheDelete for F
where
    F: Fn(&[u8]) + Send + Sync,
{
    fn delete(&self, session_id: &[u8]) {
        self(session_id)
    }
}

/// Settings shared by every connection created from them.
#[derive(Clone, Default)]
pub struct Config {
    alert_behavior: AlertBehavior,
    session_cache: bool,
    cache_delete: Option<Arc<dyn SessionCacheDelete>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_alert_behavior(&mut self, behavior: AlertBehavior) -> &mut Self {
        self.alert_behavior = behavior;
        self
    }

    pub fn alert_behavior(&self) -> AlertBehavior {
        self.alert_behavior
    }

    /// Installs the cache delete hook and enables session caching.
    pub fn set_session_cache<D: SessionCacheDelete + 'static>(&mut self, delete: D) -> &mut Self {
        self.cache_delete = Some(Arc::new(delete));
        self.session_cache = true;
        self
    }

    pub fn disable_session_cache(&mut self) -> &mut Self {
        self.session_cache = false;
        self
    }

    pub fn session_cache_enabled(&self) -> bool {
        self.session_cache && self.cache_delete.is_some()
    }

    pub(crate) fn cache_delete(&self) -> Option<&dyn SessionCacheDelete> {
        self.cache_delete.as_deref()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("alert_behavior", &self.alert_behavior)
            .field("session_cache", &self.session_cache)
            .field("cache_delete", &self.cache_delete.is_some())
            .finish()
    }
}
