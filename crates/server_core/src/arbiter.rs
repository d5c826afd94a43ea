//! Ownership arbitration over the union of near sectors.
//!
//! Plan: build rings around every reference point, record each session's own
//! near set, union the near sets into the covered set and drop covered
//! sectors from the distant pool. Arbitrate: visit each covered sector once,
//! and hand every unowned or stale object to the host.

use zone_core::{ObjectId, SectorSet, SessionId, sector_rings, zone_of};

use crate::area::{ActiveAreas, AreaMembership};
use crate::collector::ReferencePoint;
use crate::external::EntityStore;
use crate::ownership::OwnerPolicy;

/// Radii and zone size for one pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RingParams {
    pub near_radius: u32,
    pub distant_radius: u32,
    pub zone_size_m: f32,
}

#[derive(Debug, Default)]
pub struct AreaPlan {
    pub areas: ActiveAreas,
    /// Union of near sets.
    pub covered: SectorSet,
    /// Distant sectors not covered by any point's near set.
    pub distant: SectorSet,
}

/// Centers are clamped so the full near + distant reach stays on the grid;
/// a point reported far past the edge plans around the edge zone.
pub fn plan_areas(
    tick: u64,
    authority: SessionId,
    points: &[ReferencePoint],
    params: RingParams,
) -> AreaPlan {
    let reach = params.near_radius.saturating_add(params.distant_radius);
    let mut areas = ActiveAreas::new(tick, authority);
    let mut covered = SectorSet::new();
    let mut distant = SectorSet::new();
    for p in points {
        let center = zone_of(p.pos, params.zone_size_m).clamp_reach(reach);
        let rings = sector_rings(center, params.near_radius, params.distant_radius);
        areas.add_session_near(p.session, rings.near.iter().copied());
        covered.extend(rings.near);
        distant.extend(rings.distant);
    }
    distant.retain(|z| !covered.contains(z));
    areas.set_authority_near(covered.iter().copied());
    AreaPlan { areas, covered, distant }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArbiterOutcome {
    pub sectors: usize,
    pub assigned: usize,
    /// Ids of every object found in covered sectors, in visit order.
    pub near_objects: Vec<ObjectId>,
}

/// Visit each covered sector once and claim unowned/stale objects for `host`.
pub fn arbitrate<S: EntityStore + ?Sized>(
    covered: &SectorSet,
    host: SessionId,
    areas: &ActiveAreas,
    membership: &dyn AreaMembership,
    policy: &dyn OwnerPolicy,
    store: &mut S,
) -> ArbiterOutcome {
    let mut out = ArbiterOutcome::default();
    for &zone in covered {
        store.mark_zone_active(zone);
        for rec in store.objects_in_zone_mut(zone).iter_mut() {
            out.near_objects.push(rec.id);
            let owner = rec.owner();
            let owned = rec.is_owned(|s| areas.is_live(s));
            if owned && membership.is_in_active_area(zone, owner) {
                continue;
            }
            policy.set_owner(rec, host);
            if rec.owner() != owner {
                out.assigned += 1;
                tracing::trace!(
                    target: "ownership",
                    object = rec.id.0,
                    zone = ?zone,
                    from = %owner,
                    to = %rec.owner(),
                    "claimed"
                );
            }
        }
        out.sectors += 1;
    }
    out
}
