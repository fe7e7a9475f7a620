//! Watch-list settings loaded via OrthoConfig.
//!
//! Values come from command-line arguments, `WATCHLIST_*` environment
//! variables, or a configuration file, in OrthoConfig's usual precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ListMembershipConfig;

/// Configuration values controlling the watch-list services.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WATCHLIST")]
pub struct WatchlistSettings {
    /// Save attempts per watch-list mutation before reporting a conflict.
    ///
    /// Matches [`ListMembershipConfig::DEFAULT_MAX_WRITE_ATTEMPTS`] when unset.
    #[ortho_config(default = 3)]
    pub max_write_attempts: u32,
}

impl WatchlistSettings {
    /// Service configuration derived from these settings.
    pub fn list_membership_config(&self) -> ListMembershipConfig {
        ListMembershipConfig::with_max_write_attempts(self.max_write_attempts)
    }
}
