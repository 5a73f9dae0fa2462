//! Engine configuration and per-item options.

use grip_core::{ItemId, SizeLimits};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("drag threshold must be finite and non-negative, got {0}")]
    Threshold(f64),
    #[error("handle zone must be finite and positive, got {0}")]
    HandleZone(f64),
    #[error("invalid size limits for {scope}: {limits:?}")]
    Limits { scope: String, limits: SizeLimits },
}

/// Canvas-wide interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GripConfig {
    /// Screen pixels the pointer must travel on either axis, strictly,
    /// before a pointer-down becomes a drag.
    pub drag_threshold: f64,
    /// Minimum size for items with no kind or item override.
    pub default_limits: SizeLimits,
    /// Minimum size per item kind (`Item::kind`).
    pub kind_limits: HashMap<String, SizeLimits>,
    /// Side of the square corner hot-zones, in screen pixels.
    pub handle_zone: f64,
    /// Escape reverts the active session.
    pub cancel_on_escape: bool,
}

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            default_limits: SizeLimits::DEFAULT,
            kind_limits: HashMap::new(),
            handle_zone: 8.0,
            cancel_on_escape: true,
        }
    }
}

impl GripConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::Threshold(self.drag_threshold));
        }
        if !self.handle_zone.is_finite() || self.handle_zone <= 0.0 {
            return Err(ConfigError::HandleZone(self.handle_zone));
        }
        if !self.default_limits.is_valid() {
            return Err(ConfigError::Limits {
                scope: "default".into(),
                limits: self.default_limits,
            });
        }
        for (kind, limits) in &self.kind_limits {
            if !limits.is_valid() {
                return Err(ConfigError::Limits {
                    scope: format!("kind {kind:?}"),
                    limits: *limits,
                });
            }
        }
        Ok(())
    }

    /// Limits for an item kind, before any per-item override.
    pub fn limits_for_kind(&self, kind: &str) -> SizeLimits {
        self.kind_limits
            .get(kind)
            .copied()
            .unwrap_or(self.default_limits)
    }
}

/// Options a host attaches to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemProps {
    /// Resize handles are active.
    pub resizable: bool,
    /// Overrides kind and default limits.
    pub limits: Option<SizeLimits>,
}

impl Default for ItemProps {
    fn default() -> Self {
        Self {
            resizable: true,
            limits: None,
        }
    }
}

/// Per-item options keyed by id. Items without an entry use defaults.
#[derive(Debug, Clone, Default)]
pub struct PropsTable {
    props: HashMap<ItemId, ItemProps>,
}

impl PropsTable {
    pub fn set(&mut self, item: ItemId, props: ItemProps) -> Result<(), ConfigError> {
        if let Some(limits) = props.limits
            && !limits.is_valid()
        {
            return Err(ConfigError::Limits {
                scope: format!("item {item}"),
                limits,
            });
        }
        self.props.insert(item, props);
        Ok(())
    }

    pub fn remove(&mut self, item: ItemId) {
        self.props.remove(&item);
    }

    pub fn get(&self, item: ItemId) -> ItemProps {
        self.props.get(&item).copied().unwrap_or_default()
    }
}
