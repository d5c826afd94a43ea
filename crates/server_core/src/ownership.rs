//! Owner defaulting: the unset owner (0) resolves to the host session on an
//! authoritative host, both for explicit assignment and for records coming
//! back from persistence.

use zone_core::{PersistedObject, SessionId, WorldObjectRecord};

pub trait OwnerPolicy {
    /// Owner that should actually be written for a `requested` owner.
    fn resolve_owner(&self, requested: SessionId) -> SessionId;

    /// Explicit owner assignment.
    fn set_owner(&self, rec: &mut WorldObjectRecord, requested: SessionId) {
        rec.set_owner_internal(self.resolve_owner(requested));
    }

    /// Owner resolution on load. The returned record carries the substituted
    /// owner, so writing it back persists the host id.
    fn load_record(&self, stored: &PersistedObject) -> WorldObjectRecord {
        let mut rec = WorldObjectRecord::from_persisted_raw(stored);
        let owner = self.resolve_owner(rec.owner());
        rec.set_owner_internal(owner);
        rec
    }
}

/// Authoritative host: unset owner becomes the host session.
#[derive(Copy, Clone, Debug)]
pub struct HostOwnerDefaulting {
    pub host: SessionId,
}

impl OwnerPolicy for HostOwnerDefaulting {
    #[inline]
    fn resolve_owner(&self, requested: SessionId) -> SessionId {
        if requested.is_none() {
            self.host
        } else {
            requested
        }
    }
}

/// Non-authoritative processes store exactly what they are given.
#[derive(Copy, Clone, Debug, Default)]
pub struct PassThroughOwner;

impl OwnerPolicy for PassThroughOwner {
    #[inline]
    fn resolve_owner(&self, requested: SessionId) -> SessionId {
        requested
    }
}
