//! Server settings read from the environment.
//!
//! Rocket's own settings (`ROCKET_PORT`, `ROCKET_ADDRESS`, ...) are handled
//! by Rocket; these cover the match service only.

pub const DEFAULT_LOG_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Seed for the generator that hands out per-match seeds. `None` seeds
    /// from the clock.
    pub match_seed: Option<u64>,
    pub log_page_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            match_seed: None,
            log_page_limit: DEFAULT_LOG_PAGE_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let match_seed = lookup("MATCH_SEED").and_then(|v| match v.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("ignoring MATCH_SEED={v:?}: {e}");
                None
            }
        });
        let log_page_limit = lookup("MATCH_LOG_PAGE_LIMIT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.log_page_limit);
        ServerConfig {
            match_seed,
            log_page_limit,
        }
    }

    /// The seed actually used for the match-seed generator.
    pub fn resolved_seed(&self) -> u64 {
        self.match_seed.unwrap_or_else(|| {
            match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
                Ok(dur) => dur.as_nanos() as u64,
                Err(_) => 0,
            }
        })
    }
}
