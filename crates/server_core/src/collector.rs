//! Reference points for the tick: one per connected peer, plus the host's own
//! position when the host is embodied.

use data_runtime::configs::ownership::HostRole;
use glam::Vec3;
use zone_core::SessionId;

use crate::external::PeerRegistry;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReferencePoint {
    pub session: SessionId,
    pub pos: Vec3,
}

/// Where the host itself stands this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HostPosition {
    /// Local embodied actor, if one exists right now.
    pub embodied: Option<Vec3>,
    /// Host reference position used when no actor is present.
    pub fallback: Vec3,
}

impl HostPosition {
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn embodied(pos: Vec3) -> Self {
        Self { embodied: Some(pos), fallback: pos }
    }

    #[inline]
    pub fn resolve(&self) -> Vec3 {
        self.embodied.unwrap_or(self.fallback)
    }
}

pub fn collect_reference_points(
    role: HostRole,
    peers: &dyn PeerRegistry,
    host: SessionId,
    host_pos: HostPosition,
) -> Vec<ReferencePoint> {
    let peers = peers.peers();
    let mut out = Vec::with_capacity(peers.len() + 1);
    out.extend(peers.iter().map(|p| ReferencePoint { session: p.session, pos: p.ref_pos }));
    if !role.is_headless() {
        out.push(ReferencePoint { session: host, pos: host_pos.resolve() });
    }
    out
}
