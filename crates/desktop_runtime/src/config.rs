//! Runtime shell configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{apps, launcher::DEFAULT_SELF_CLOSE_DELAY_MS, model::WindowId};

/// Upper bound on how long a transient window may stay open.
pub const MAX_SELF_CLOSE_DELAY_MS: u32 = 1_000;
/// Default lifetime of a shell notice before it is dismissed automatically.
pub const DEFAULT_NOTICE_DISMISS_MS: u32 = 6_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shell config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("self-close delay of {0} ms exceeds the 1000 ms limit")]
    SelfCloseDelayTooLong(u32),
    #[error("`{0}` is not a transient link window")]
    NotTransient(WindowId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub self_close_delay_ms: u32,
    /// `0` keeps notices until they are dismissed explicitly.
    pub notice_dismiss_ms: u32,
    pub popup_blocked_title: String,
    /// Replaces the catalog URL of individual transient link windows.
    pub launcher_urls: BTreeMap<WindowId, String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            self_close_delay_ms: DEFAULT_SELF_CLOSE_DELAY_MS,
            notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
            popup_blocked_title: "Pop-up blocked".to_string(),
            launcher_urls: BTreeMap::new(),
        }
    }
}

impl ShellConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, a self-close delay above
    /// [`MAX_SELF_CLOSE_DELAY_MS`], or a URL override for a window that is not a transient link.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// See [`ShellConfig::from_json`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.self_close_delay_ms > MAX_SELF_CLOSE_DELAY_MS {
            return Err(ConfigError::SelfCloseDelayTooLong(self.self_close_delay_ms));
        }
        if let Some(window_id) = self
            .launcher_urls
            .keys()
            .find(|window_id| !apps::is_transient_launcher(**window_id))
        {
            return Err(ConfigError::NotTransient(*window_id));
        }
        Ok(())
    }

    /// Effective launch URL for a transient link window.
    pub fn launcher_url(&self, window_id: WindowId) -> Option<String> {
        self.launcher_urls
            .get(&window_id)
            .cloned()
            .or_else(|| apps::transient_link_url(window_id).map(str::to_string))
    }
}
