//! Per-tick active areas and the area-membership capability.
//!
//! `ActiveAreas` is rebuilt once per tick by the arbiter and answers every
//! membership query until the next tick replaces it. On the host the
//! authority session's area is the union of all near sectors. On a client
//! the authority is the server session, which counts as active everywhere.
//! Both refuse to release objects the authority owns.

use std::collections::{HashMap, HashSet};

use zone_core::{SessionId, WorldObjectRecord, ZoneCoord};

use crate::ownership::OwnerPolicy;

#[derive(Debug, Default, Clone)]
pub struct ActiveAreas {
    tick: u64,
    authority: SessionId,
    authority_near: HashSet<ZoneCoord>,
    by_session: HashMap<SessionId, HashSet<ZoneCoord>>,
}

impl ActiveAreas {
    pub fn new(tick: u64, authority: SessionId) -> Self {
        Self { tick, authority, ..Default::default() }
    }

    /// Record a session's own near sectors (merged if it has several points).
    pub fn add_session_near(
        &mut self,
        session: SessionId,
        near: impl IntoIterator<Item = ZoneCoord>,
    ) {
        self.by_session.entry(session).or_default().extend(near);
    }

    pub fn set_authority_near(&mut self, near: impl IntoIterator<Item = ZoneCoord>) {
        self.authority_near = near.into_iter().collect();
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }
    #[inline]
    pub fn authority(&self) -> SessionId {
        self.authority
    }
    #[inline]
    pub fn authority_near(&self) -> &HashSet<ZoneCoord> {
        &self.authority_near
    }

    #[inline]
    pub fn session_near(&self, session: SessionId) -> Option<&HashSet<ZoneCoord>> {
        self.by_session.get(&session)
    }

    /// Live = the authority itself or a session that contributed a point this tick.
    #[inline]
    pub fn is_live(&self, session: SessionId) -> bool {
        (session.is_some() && session == self.authority) || self.by_session.contains_key(&session)
    }
}

pub trait AreaMembership {
    fn is_in_active_area(&self, zone: ZoneCoord, session: SessionId) -> bool;

    /// Whether an object owned by `owner` may be released by the area path.
    fn may_release(&self, _owner: SessionId) -> bool {
        true
    }

    /// Release records held by `session` whose zone left its active area.
    /// The release is an owner write of 0 through `policy`, so on the host
    /// it lands on the host session. Returns the number released.
    fn release_stale(
        &self,
        session: SessionId,
        records: &mut [WorldObjectRecord],
        policy: &dyn OwnerPolicy,
    ) -> usize {
        let mut released = 0usize;
        for rec in records.iter_mut() {
            if rec.owner() != session || !self.may_release(rec.owner()) {
                continue;
            }
            if !self.is_in_active_area(rec.zone, session) {
                policy.set_owner(rec, SessionId::NONE);
                released += 1;
            }
        }
        released
    }
}

/// Membership as seen by the authoritative host.
#[derive(Copy, Clone, Debug)]
pub struct HostAreaMembership<'a> {
    pub areas: &'a ActiveAreas,
}

impl AreaMembership for HostAreaMembership<'_> {
    #[inline]
    fn is_in_active_area(&self, zone: ZoneCoord, session: SessionId) -> bool {
        if session.is_some() && session == self.areas.authority {
            return self.areas.authority_near.contains(&zone);
        }
        self.areas.session_near(session).is_some_and(|s| s.contains(&zone))
    }

    #[inline]
    fn may_release(&self, owner: SessionId) -> bool {
        owner != self.areas.authority
    }
}

/// Membership as seen by a client: the server session is treated as active
/// in every zone, other sessions answer from their own near sets.
#[derive(Copy, Clone, Debug)]
pub struct ClientAreaMembership<'a> {
    pub areas: &'a ActiveAreas,
}

impl AreaMembership for ClientAreaMembership<'_> {
    #[inline]
    fn is_in_active_area(&self, zone: ZoneCoord, session: SessionId) -> bool {
        if session.is_some() && session == self.areas.authority {
            return true;
        }
        self.areas.session_near(session).is_some_and(|s| s.contains(&zone))
    }

    #[inline]
    fn may_release(&self, owner: SessionId) -> bool {
        owner != self.areas.authority
    }
}
