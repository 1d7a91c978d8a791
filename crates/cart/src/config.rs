//! Cart store configuration.

use std::str::FromStr;

use thiserror::Error;

/// Storage key holding the serialized cart.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// When `remove_product` emits its failure notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveNotice {
    /// Notify on every call, including a successful removal.
    ///
    /// Matches what the storefront has always done. This is very likely a
    /// bug: the UI shows "Erro na remoção do produto" after the product is
    /// already gone. Switch to `OnMiss` once the UI no longer depends on it.
    #[default]
    Always,

    /// Notify only when no entry matched.
    OnMiss,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown remove notice policy '{0}' (expected 'always' or 'on-miss')")]
pub struct ParseRemoveNoticeError(String);

impl FromStr for RemoveNotice {
    type Err = ParseRemoveNoticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(RemoveNotice::Always),
            "on-miss" | "on_miss" => Ok(RemoveNotice::OnMiss),
            _ => Err(ParseRemoveNoticeError(s.to_string())),
        }
    }
}

/// Configuration for [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key under which the snapshot is stored.
    pub storage_key: String,

    pub remove_notice: RemoveNotice,

    /// Buffered change events per subscriber before slow ones start lagging.
    pub change_capacity: usize,
}

impl CartConfig {
    pub fn with_remove_notice(mut self, remove_notice: RemoveNotice) -> Self {
        self.remove_notice = remove_notice;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            remove_notice: RemoveNotice::default(),
            change_capacity: 64,
        }
    }
}
