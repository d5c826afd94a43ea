//! World object record: the slice of a replicated object the ownership
//! engine is allowed to see (zone + owner). Everything else about the
//! object belongs to persistence and simulation.

use serde::{Deserialize, Serialize};

use crate::ids::{ObjectId, SessionId};
use crate::zone::ZoneCoord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldObjectRecord {
    pub id: ObjectId,
    pub zone: ZoneCoord,
    owner: SessionId,
}

impl WorldObjectRecord {
    pub fn new(id: ObjectId, zone: ZoneCoord) -> Self {
        Self { id, zone, owner: SessionId::NONE }
    }

    #[inline]
    pub fn owner(&self) -> SessionId {
        self.owner
    }

    /// Raw owner write. Callers that must honor owner defaulting go through
    /// `server_core::ownership::OwnerPolicy` instead.
    #[inline]
    pub fn set_owner_internal(&mut self, owner: SessionId) {
        self.owner = owner;
    }

    /// Owned = non-zero owner that is still a live session.
    #[inline]
    pub fn is_owned(&self, is_live: impl Fn(SessionId) -> bool) -> bool {
        self.owner.is_some() && is_live(self.owner)
    }

    /// Build a record from its stored form without any owner substitution.
    pub fn from_persisted_raw(p: &PersistedObject) -> Self {
        Self {
            id: ObjectId(p.id),
            zone: ZoneCoord::from(p.zone),
            owner: SessionId(p.owner),
        }
    }

    pub fn to_persisted(&self) -> PersistedObject {
        PersistedObject {
            id: self.id.0,
            zone: self.zone.into(),
            owner: self.owner.0,
        }
    }
}

/// Stored form of a record as written by persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedObject {
    pub id: u64,
    pub zone: [i32; 2],
    #[serde(default)]
    pub owner: u64,
}
