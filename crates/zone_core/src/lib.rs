//! `zone_core`: shared zone-grid vocabulary for the headless host.
//!
//! Scope
//! - Session/object identifiers and the zone coordinate type
//! - Position -> zone mapping (`zone_of`)
//! - Sector ring geometry (filled near ring + hollow distant ring)
//! - The minimal world object record the ownership engine mutates
//!
//! Everything here is pure data and math; the arbitration logic that
//! mutates records lives in `server_core`.

#![forbid(unsafe_code)]

pub mod ids;
pub mod record;
pub mod rings;
pub mod zone;

pub use ids::{ObjectId, SessionId};
pub use record::{PersistedObject, WorldObjectRecord};
pub use rings::{SectorRings, SectorSet, ring, sector_rings};
pub use zone::{DEFAULT_ZONE_SIZE_M, ZoneCoord, zone_center, zone_of};
