//! Ownership engine: the single per-tick entry point plus the owner-policy
//! and area-membership capabilities answered against the current tick.
//!
//! Tick order: collect reference points -> plan rings -> arbitrate near
//! sectors -> load leftover distant sectors. Clients never arbitrate; they
//! only refresh their own near set so membership queries can be answered
//! locally.

use data_runtime::configs::ownership::{HostRole, OwnershipCfg};
use glam::Vec3;
use zone_core::{ObjectId, SessionId, sector_rings, zone_of};

use crate::area::{ActiveAreas, AreaMembership, ClientAreaMembership, HostAreaMembership};
use crate::arbiter::{RingParams, arbitrate, plan_areas};
use crate::collector::{HostPosition, collect_reference_points};
use crate::distant::load_distant;
use crate::error::EngineError;
use crate::external::{EntityStore, PeerRegistry};
use crate::ownership::{HostOwnerDefaulting, OwnerPolicy, PassThroughOwner};

/// Result of one arbitration tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub reference_points: usize,
    pub near_sectors: usize,
    pub distant_sectors: usize,
    pub assigned: usize,
    pub near_objects: Vec<ObjectId>,
    pub dormant_objects: Vec<ObjectId>,
}

pub struct OwnershipEngine {
    cfg: OwnershipCfg,
    host: Option<SessionId>,
    owner_policy: Box<dyn OwnerPolicy>,
    areas: ActiveAreas,
    tick: u64,
}

impl OwnershipEngine {
    pub fn new(cfg: OwnershipCfg) -> Result<Self, EngineError> {
        cfg.validate().map_err(|e| EngineError::InvalidConfig(format!("{e:#}")))?;
        Ok(Self {
            cfg,
            host: None,
            owner_policy: Box::new(PassThroughOwner),
            areas: ActiveAreas::default(),
            tick: 0,
        })
    }

    /// Fix the host session for the process lifetime. On a client this is
    /// the server's session.
    pub fn init_host_session(&mut self, host: SessionId) -> Result<(), EngineError> {
        if host.is_none() {
            return Err(EngineError::InvalidHostSession);
        }
        if let Some(existing) = self.host {
            if existing == host {
                return Ok(());
            }
            return Err(EngineError::HostSessionAlreadySet(existing));
        }
        self.host = Some(host);
        if self.cfg.role.is_server() {
            self.owner_policy = Box::new(HostOwnerDefaulting { host });
        }
        self.areas = ActiveAreas::new(self.tick, host);
        tracing::info!(
            target: "ownership",
            host = %host,
            role = ?self.cfg.role,
            "host session initialized"
        );
        Ok(())
    }

    /// Replace the owner policy (e.g. a custom defaulting rule). Call after
    /// `init_host_session`, which installs the role default.
    pub fn set_owner_policy(&mut self, policy: Box<dyn OwnerPolicy>) {
        self.owner_policy = policy;
    }

    #[inline]
    pub fn host_session(&self) -> Option<SessionId> {
        self.host
    }
    #[inline]
    pub fn role(&self) -> HostRole {
        self.cfg.role
    }
    #[inline]
    pub fn config(&self) -> &OwnershipCfg {
        &self.cfg
    }
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }
    #[inline]
    pub fn active_areas(&self) -> &ActiveAreas {
        &self.areas
    }

    pub fn owner_policy(&self) -> &dyn OwnerPolicy {
        self.owner_policy.as_ref()
    }

    /// Membership answered from this tick's cached areas. On a client the
    /// authority is the server session set by `init_host_session`.
    pub fn area_membership(&self) -> Box<dyn AreaMembership + '_> {
        if self.cfg.role.is_server() {
            Box::new(HostAreaMembership { areas: &self.areas })
        } else {
            Box::new(ClientAreaMembership { areas: &self.areas })
        }
    }

    /// Runtime config change. Locked configs only accept admin changes; the
    /// role is fixed for the process lifetime.
    pub fn apply_config(
        &mut self,
        mut next: OwnershipCfg,
        by_admin: bool,
    ) -> Result<(), EngineError> {
        if self.cfg.lock_configuration && !by_admin {
            return Err(EngineError::ConfigLocked);
        }
        next.validate().map_err(|e| EngineError::InvalidConfig(format!("{e:#}")))?;
        if next.role != self.cfg.role {
            tracing::warn!(
                target: "ownership",
                current = ?self.cfg.role,
                requested = ?next.role,
                "role change ignored"
            );
            next.role = self.cfg.role;
        }
        tracing::info!(
            target: "ownership",
            near_radius = next.near_radius,
            distant_radius = next.distant_radius,
            locked = next.lock_configuration,
            "config applied"
        );
        self.cfg = next;
        Ok(())
    }

    /// Client-side area refresh: rebuild the local session's near set around
    /// `pos`. Must run once per tick on a client before membership queries.
    /// Returns the number of near sectors.
    pub fn update_local_area(&mut self, local: SessionId, pos: Vec3) -> Result<usize, EngineError> {
        let server = self.host.ok_or(EngineError::HostSessionUninitialized)?;
        if self.cfg.role.is_server() {
            return Err(EngineError::ClientOnly(self.cfg.role));
        }
        self.tick += 1;
        let center = zone_of(pos, self.cfg.zone_size_m).clamp_reach(self.cfg.near_radius);
        let near = sector_rings(center, self.cfg.near_radius, 0).near;
        let count = near.len();
        let mut areas = ActiveAreas::new(self.tick, server);
        areas.add_session_near(local, near);
        self.areas = areas;
        Ok(count)
    }

    /// One arbitration pass. Must run once per simulation tick on the host.
    pub fn run_tick<S: EntityStore + ?Sized>(
        &mut self,
        peers: &dyn PeerRegistry,
        host_pos: HostPosition,
        store: &mut S,
    ) -> Result<TickReport, EngineError> {
        let host = self.host.ok_or(EngineError::HostSessionUninitialized)?;
        if !self.cfg.role.is_server() {
            return Err(EngineError::NotAuthoritative(self.cfg.role));
        }
        self.tick += 1;
        let _span = tracing::debug_span!("ownership_tick", tick = self.tick).entered();
        store.begin_tick();

        let points = collect_reference_points(self.cfg.role, peers, host, host_pos);
        let params = RingParams {
            near_radius: self.cfg.near_radius,
            distant_radius: self.cfg.distant_radius,
            zone_size_m: self.cfg.zone_size_m,
        };
        let plan = plan_areas(self.tick, host, &points, params);
        self.areas = plan.areas;

        let membership = HostAreaMembership { areas: &self.areas };
        let policy = self.owner_policy.as_ref();
        let near = arbitrate(&plan.covered, host, &self.areas, &membership, policy, store);
        let mut dormant = Vec::new();
        let distant_sectors = load_distant(&plan.distant, store, &mut dormant);

        metrics::counter!("ownership.assigned_total").increment(near.assigned as u64);
        metrics::gauge!("ownership.near_sectors").set(near.sectors as f64);
        metrics::gauge!("ownership.distant_sectors").set(distant_sectors as f64);
        tracing::debug!(
            target: "ownership",
            points = points.len(),
            near = near.sectors,
            distant = distant_sectors,
            assigned = near.assigned,
            "tick arbitrated"
        );

        Ok(TickReport {
            tick: self.tick,
            reference_points: points.len(),
            near_sectors: near.sectors,
            distant_sectors,
            assigned: near.assigned,
            near_objects: near.near_objects,
            dormant_objects: dormant,
        })
    }
}
