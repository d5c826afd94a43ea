//! Zone grid: fixed-size square cells over the world XZ plane.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default zone edge length in meters.
pub const DEFAULT_ZONE_SIZE_M: f32 = 64.0;

/// Integer zone coordinate. `y` indexes the world Z axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneCoord {
    pub x: i32,
    pub y: i32,
}

impl ZoneCoord {
    pub const ZERO: ZoneCoord = ZoneCoord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance in zones.
    #[inline]
    pub fn chebyshev(self, other: ZoneCoord) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy) as u32
    }

    /// Pull the coordinate toward the origin until every cell within
    /// `reach` of it is still a valid `i32` coordinate.
    #[inline]
    pub fn clamp_reach(self, reach: u32) -> Self {
        let reach = reach.min(i32::MAX as u32) as i32;
        let (lo, hi) = (i32::MIN + reach, i32::MAX - reach);
        Self { x: self.x.clamp(lo, hi), y: self.y.clamp(lo, hi) }
    }
}

impl From<[i32; 2]> for ZoneCoord {
    fn from(v: [i32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<ZoneCoord> for [i32; 2] {
    fn from(z: ZoneCoord) -> Self {
        [z.x, z.y]
    }
}

/// Map a world position to its zone. Zones are centered on multiples of
/// `zone_size_m`, so the origin zone spans [-size/2, size/2).
#[inline]
pub fn zone_of(pos: Vec3, zone_size_m: f32) -> ZoneCoord {
    let half = zone_size_m * 0.5;
    ZoneCoord {
        x: ((pos.x + half) / zone_size_m).floor() as i32,
        y: ((pos.z + half) / zone_size_m).floor() as i32,
    }
}

/// World-space center of a zone (height 0).
#[inline]
pub fn zone_center(zone: ZoneCoord, zone_size_m: f32) -> Vec3 {
    Vec3::new(zone.x as f32 * zone_size_m, 0.0, zone.y as f32 * zone_size_m)
}
