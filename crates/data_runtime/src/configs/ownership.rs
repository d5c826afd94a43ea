//! Ownership engine configuration loaded from data/config/ownership.toml
//! with env overrides and bounds validation.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::data_root;

/// Upper bound for either radius; larger values would load an unreasonable
/// number of zones per reference point.
pub const MAX_RADIUS: u32 = 32;

/// What kind of process this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostRole {
    /// Authoritative server without an embodied actor.
    #[default]
    Dedicated,
    /// Authoritative server that also hosts a local embodied player.
    Listen,
    /// Non-authoritative peer.
    Client,
}

impl HostRole {
    #[inline]
    pub fn is_server(self) -> bool {
        matches!(self, HostRole::Dedicated | HostRole::Listen)
    }

    #[inline]
    pub fn is_headless(self) -> bool {
        matches!(self, HostRole::Dedicated)
    }
}

impl std::str::FromStr for HostRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dedicated" => Ok(HostRole::Dedicated),
            "listen" => Ok(HostRole::Listen),
            "client" => Ok(HostRole::Client),
            other => bail!("unknown host role '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipCfg {
    pub role: HostRole,
    /// Zones around each reference point that are fully simulated.
    pub near_radius: u32,
    /// Extra zones past `near_radius` that are loaded but dormant.
    pub distant_radius: u32,
    pub zone_size_m: f32,
    /// Seconds between population evaluations.
    pub spawn_interval_s: f32,
    /// When on, only admins may change this config at runtime.
    pub lock_configuration: bool,
}

impl Default for OwnershipCfg {
    fn default() -> Self {
        Self {
            role: HostRole::Dedicated,
            near_radius: 2,
            distant_radius: 2,
            zone_size_m: 64.0,
            spawn_interval_s: 4.0,
            lock_configuration: true,
        }
    }
}

impl OwnershipCfg {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.near_radius > MAX_RADIUS {
            bail!("near_radius {} exceeds max {}", self.near_radius, MAX_RADIUS);
        }
        if self.distant_radius > MAX_RADIUS {
            bail!("distant_radius {} exceeds max {}", self.distant_radius, MAX_RADIUS);
        }
        if !(self.zone_size_m.is_finite() && self.zone_size_m > 0.0) {
            bail!("zone_size_m must be positive, got {}", self.zone_size_m);
        }
        if !(self.spawn_interval_s.is_finite() && self.spawn_interval_s >= 0.0) {
            bail!("spawn_interval_s must be non-negative, got {}", self.spawn_interval_s);
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("NEAR_RADIUS") {
            self.near_radius = v.trim().parse().with_context(|| format!("NEAR_RADIUS={v}"))?;
        }
        if let Ok(v) = std::env::var("DISTANT_RADIUS") {
            self.distant_radius = v.trim().parse().with_context(|| format!("DISTANT_RADIUS={v}"))?;
        }
        if let Ok(v) = std::env::var("ZONE_SIZE_M") {
            self.zone_size_m = v.trim().parse().with_context(|| format!("ZONE_SIZE_M={v}"))?;
        }
        if let Ok(v) = std::env::var("HOST_ROLE") {
            self.role = v.parse()?;
        }
        Ok(())
    }
}

/// Parse a config file (no env overrides), validating bounds.
pub fn load_from(path: &Path) -> Result<OwnershipCfg> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OwnershipCfg = toml::from_str(&txt).context("parse ownership TOML")?;
    cfg.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Load from the default location (defaults if missing), then env overrides.
pub fn load_default() -> Result<OwnershipCfg> {
    let path = data_root().join("config/ownership.toml");
    let mut cfg = if path.is_file() { load_from(&path)? } else { OwnershipCfg::default() };
    cfg.apply_env_overrides()?;
    cfg.validate()?;
    Ok(cfg)
}
