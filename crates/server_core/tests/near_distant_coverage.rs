use std::collections::BTreeSet;

use data_runtime::configs::ownership::{HostRole, OwnershipCfg};
use glam::Vec3;
use server_core::collector::HostPosition;
use server_core::external::EntityStore;
use server_core::peers::PeerTable;
use server_core::{OwnershipEngine, ReferencePoint};
use zone_core::{ObjectId, SessionId, WorldObjectRecord, ZoneCoord, sector_rings, zone_of};

const HOST: SessionId = SessionId(77);

/// Store wrapper that records which zones were handed out for mutation.
#[derive(Default)]
struct Recording {
    inner: server_core::store::MemoryEntityStore,
    mutable_zones: Vec<ZoneCoord>,
    distant_zones: Vec<ZoneCoord>,
}

impl EntityStore for Recording {
    fn begin_tick(&mut self) {
        self.inner.begin_tick();
    }
    fn mark_zone_active(&mut self, zone: ZoneCoord) {
        self.inner.mark_zone_active(zone);
    }
    fn objects_in_zone_mut(&mut self, zone: ZoneCoord) -> &mut [WorldObjectRecord] {
        self.mutable_zones.push(zone);
        self.inner.objects_in_zone_mut(zone)
    }
    fn collect_distant(&mut self, zone: ZoneCoord, out: &mut Vec<ObjectId>) {
        self.distant_zones.push(zone);
        self.inner.collect_distant(zone, out);
    }
}

fn engine(n: u32, d: u32) -> OwnershipEngine {
    let cfg = OwnershipCfg {
        role: HostRole::Dedicated,
        near_radius: n,
        distant_radius: d,
        ..Default::default()
    };
    let mut e = OwnershipEngine::new(cfg).expect("engine");
    e.init_host_session(HOST).expect("init");
    e
}

#[test]
fn arbiter_touches_exactly_the_union_of_near_sets() {
    let mut peers = PeerTable::new();
    let positions = [Vec3::ZERO, Vec3::new(128.0, 0.0, 64.0), Vec3::new(-640.0, 0.0, 0.0)];
    for (i, p) in positions.iter().enumerate() {
        peers.connect(SessionId(i as u64 + 1), *p);
    }
    let mut e = engine(1, 2);
    let mut store = Recording::default();
    let rep = e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");

    let mut near = BTreeSet::new();
    let mut distant = BTreeSet::new();
    for p in positions {
        let r = sector_rings(zone_of(p, 64.0), 1, 2);
        near.extend(r.near);
        distant.extend(r.distant);
    }
    let distant: BTreeSet<ZoneCoord> = distant.difference(&near).copied().collect();

    let touched: BTreeSet<ZoneCoord> = store.mutable_zones.iter().copied().collect();
    assert_eq!(touched.len(), store.mutable_zones.len(), "a sector was processed twice");
    assert_eq!(touched, near);
    let loaded: BTreeSet<ZoneCoord> = store.distant_zones.iter().copied().collect();
    assert_eq!(loaded, distant);
    assert!(touched.is_disjoint(&loaded));
    assert_eq!(rep.near_sectors, near.len());
    assert_eq!(rep.distant_sectors, distant.len());
    assert_eq!(store.inner.active_zone_count(), near.len() + distant.len());
}

#[test]
fn distant_objects_keep_their_owner() {
    let mut peers = PeerTable::new();
    peers.connect(SessionId(1), Vec3::ZERO);
    let mut e = engine(1, 1);
    let mut store = server_core::store::MemoryEntityStore::new();
    // unset and stale owners in the distant ring stay untouched
    store.insert(WorldObjectRecord::new(ObjectId(1), ZoneCoord::new(2, 2)));
    let mut stale = WorldObjectRecord::new(ObjectId(2), ZoneCoord::new(-2, 0));
    stale.set_owner_internal(SessionId(404));
    store.insert(stale);
    // and one near object for contrast
    store.insert(WorldObjectRecord::new(ObjectId(3), ZoneCoord::new(0, 1)));

    let rep = e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");
    assert_eq!(rep.assigned, 1);
    assert_eq!(rep.near_objects, vec![ObjectId(3)]);
    let mut dormant = rep.dormant_objects.clone();
    dormant.sort();
    assert_eq!(dormant, vec![ObjectId(1), ObjectId(2)]);
    assert_eq!(store.get(ObjectId(1)).map(|r| r.owner()), Some(SessionId::NONE));
    assert_eq!(store.get(ObjectId(2)).map(|r| r.owner()), Some(SessionId(404)));
    assert_eq!(store.get(ObjectId(3)).map(|r| r.owner()), Some(HOST));
}

#[test]
fn active_zones_reset_between_direct_ticks() {
    let mut peers = PeerTable::new();
    peers.connect(SessionId(1), Vec3::ZERO);
    let mut e = engine(1, 1);
    let mut store = server_core::store::MemoryEntityStore::new();
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick 1");
    assert_eq!(store.active_zone_count(), 25);

    peers.set_ref_pos(SessionId(1), Vec3::new(6400.0, 0.0, 0.0));
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick 2");
    assert_eq!(store.active_zone_count(), 25);
    assert!(!store.is_zone_active(ZoneCoord::ZERO));
    assert!(store.is_zone_active(ZoneCoord::new(100, 0)));
}

#[test]
fn reference_point_type_is_public() {
    let p = ReferencePoint { session: SessionId(1), pos: Vec3::ZERO };
    assert_eq!(zone_of(p.pos, 64.0), ZoneCoord::ZERO);
}
