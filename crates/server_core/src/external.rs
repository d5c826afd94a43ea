//! Seams to collaborators the engine does not own: the peer registry
//! (transport/peer lifecycle) and the entity store (persistence + zone
//! activity). In-memory implementations live in `peers` and `store`.

use glam::Vec3;
use zone_core::{ObjectId, SessionId, WorldObjectRecord, ZoneCoord};

/// A connected peer and the position its active area is computed around.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Peer {
    pub session: SessionId,
    pub ref_pos: Vec3,
}

pub trait PeerRegistry {
    /// Currently connected peers, in registry order.
    fn peers(&self) -> &[Peer];
}

pub trait EntityStore {
    /// Called once at the start of every arbitration tick, before any zone
    /// is marked active.
    fn begin_tick(&mut self) {}

    /// Keep the zone loaded for this tick.
    fn mark_zone_active(&mut self, zone: ZoneCoord);

    /// Load (if needed) and return the records stored in `zone`.
    fn objects_in_zone_mut(&mut self, zone: ZoneCoord) -> &mut [WorldObjectRecord];

    /// Load `zone` for presence only, appending its object ids to `out`.
    fn collect_distant(&mut self, zone: ZoneCoord, out: &mut Vec<ObjectId>);
}
