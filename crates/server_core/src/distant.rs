//! Distant ring loading: keep the zones warm, collect object presence, never
//! touch ownership.

use zone_core::{ObjectId, SectorSet};

use crate::external::EntityStore;

/// Mark every distant sector active and append its object ids to `dormant`.
/// Returns the number of sectors loaded.
pub fn load_distant<S: EntityStore + ?Sized>(
    distant: &SectorSet,
    store: &mut S,
    dormant: &mut Vec<ObjectId>,
) -> usize {
    for &zone in distant {
        store.mark_zone_active(zone);
        store.collect_distant(zone, dormant);
    }
    distant.len()
}
