use data_runtime::configs::ownership::{HostRole, OwnershipCfg};
use glam::Vec3;
use server_core::OwnershipEngine;
use server_core::collector::HostPosition;
use server_core::peers::PeerTable;
use server_core::store::MemoryEntityStore;
use zone_core::{ObjectId, SessionId, WorldObjectRecord, ZoneCoord};

const HOST: SessionId = SessionId(31337);
const PEER: SessionId = SessionId(8);

fn engine() -> OwnershipEngine {
    let cfg = OwnershipCfg {
        role: HostRole::Dedicated,
        near_radius: 1,
        distant_radius: 1,
        ..Default::default()
    };
    let mut e = OwnershipEngine::new(cfg).expect("engine");
    e.init_host_session(HOST).expect("init");
    e
}

#[test]
fn membership_matches_the_tick_near_set() {
    let mut e = engine();
    let mut peers = PeerTable::new();
    peers.connect(PEER, Vec3::new(0.0, 0.0, 0.0));
    let mut store = MemoryEntityStore::new();
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");

    let m = e.area_membership();
    assert!(m.is_in_active_area(ZoneCoord::new(1, 1), HOST));
    assert!(!m.is_in_active_area(ZoneCoord::new(2, 0), HOST), "distant ring is not active area");
    assert!(m.is_in_active_area(ZoneCoord::new(-1, 0), PEER));
    assert!(!m.is_in_active_area(ZoneCoord::new(0, 0), SessionId(9)));
    drop(m);

    // area follows the peer on the next tick
    peers.set_ref_pos(PEER, Vec3::new(640.0, 0.0, 0.0));
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");
    let m = e.area_membership();
    assert!(!m.is_in_active_area(ZoneCoord::new(0, 0), HOST));
    assert!(m.is_in_active_area(ZoneCoord::new(10, 0), HOST));
}

#[test]
fn release_path_never_drops_host_ownership() {
    let mut e = engine();
    let peers = PeerTable::new();
    let mut store = MemoryEntityStore::new();
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");

    let mut recs = vec![WorldObjectRecord::new(ObjectId(1), ZoneCoord::new(50, 50))];
    e.owner_policy().set_owner(&mut recs[0], SessionId::NONE);
    assert_eq!(recs[0].owner(), HOST, "unset owner defaults to host");
    let released = e.area_membership().release_stale(HOST, &mut recs, e.owner_policy());
    assert_eq!(released, 0);
    assert_eq!(recs[0].owner(), HOST);
}

#[test]
fn peer_release_on_host_resolves_to_host() {
    let mut e = engine();
    let mut peers = PeerTable::new();
    peers.connect(PEER, Vec3::ZERO);
    let mut store = MemoryEntityStore::new();
    e.run_tick(&peers, HostPosition::headless(), &mut store).expect("tick");

    let mut recs = vec![
        WorldObjectRecord::new(ObjectId(1), ZoneCoord::new(1, 0)),
        WorldObjectRecord::new(ObjectId(2), ZoneCoord::new(12, 0)),
    ];
    for r in recs.iter_mut() {
        r.set_owner_internal(PEER);
    }
    let released = e.area_membership().release_stale(PEER, &mut recs, e.owner_policy());
    assert_eq!(released, 1);
    assert_eq!(recs[0].owner(), PEER);
    assert_eq!(recs[1].owner(), HOST, "no unset owner is left behind on the host");
}
