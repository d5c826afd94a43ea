//! Sector ring geometry around a center zone.
//!
//! Near = filled Chebyshev ball of radius `near`.
//! Distant = hollow shell with Chebyshev distance in `(near, near + distant]`.
//! Both are assembled ring by ring from radius 1 upward; each ring adds only
//! its own boundary cells so nothing is inserted twice.

use std::collections::BTreeSet;

use crate::zone::ZoneCoord;

/// Ordered zone set; iteration order is stable across runs.
pub type SectorSet = BTreeSet<ZoneCoord>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectorRings {
    pub near: SectorSet,
    pub distant: SectorSet,
}

/// Boundary cells of the ring at Chebyshev radius `r` (8r cells, or the
/// center alone for r = 0). Cells past the edge of the `i32` grid are
/// dropped, so a ring around an extreme center may come back short.
pub fn ring(center: ZoneCoord, r: u32) -> Vec<ZoneCoord> {
    if r == 0 {
        return vec![center];
    }
    let (cx, cy, r) = (i64::from(center.x), i64::from(center.y), i64::from(r));
    let mut out = Vec::with_capacity((8 * r) as usize);
    let mut push = |x: i64, y: i64| {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            out.push(ZoneCoord::new(x, y));
        }
    };
    // top and bottom rows, corners included
    for x in cx - r..=cx + r {
        push(x, cy - r);
        push(x, cy + r);
    }
    // left and right columns, corners excluded
    for y in cy - r + 1..=cy + r - 1 {
        push(cx - r, y);
        push(cx + r, y);
    }
    out
}

/// Build the near and distant sector sets for one reference zone.
pub fn sector_rings(center: ZoneCoord, near: u32, distant: u32) -> SectorRings {
    let mut rings = SectorRings::default();
    rings.near.insert(center);
    for r in 1..=near {
        rings.near.extend(ring(center, r));
    }
    for r in near.saturating_add(1)..=near.saturating_add(distant) {
        rings.distant.extend(ring(center, r));
    }
    rings
}
