use data_runtime::configs::ownership::{HostRole, OwnershipCfg};
use glam::Vec3;
use server_core::collector::HostPosition;
use server_core::peers::PeerTable;
use server_core::store::MemoryEntityStore;
use server_core::{EngineError, OwnershipEngine};
use zone_core::{ObjectId, SessionId, WorldObjectRecord, ZoneCoord};

const SERVER: SessionId = SessionId(0x5E);
const ME: SessionId = SessionId(0xC1);

fn client() -> OwnershipEngine {
    let cfg = OwnershipCfg {
        role: HostRole::Client,
        near_radius: 1,
        distant_radius: 1,
        ..Default::default()
    };
    let mut e = OwnershipEngine::new(cfg).expect("engine");
    e.init_host_session(SERVER).expect("init");
    e
}

#[test]
fn server_session_is_active_in_every_zone_on_a_client() {
    let mut e = client();
    e.update_local_area(ME, Vec3::ZERO).expect("local area");
    let m = e.area_membership();
    for zone in [ZoneCoord::ZERO, ZoneCoord::new(400, -400), ZoneCoord::new(-3, 9)] {
        assert!(m.is_in_active_area(zone, SERVER), "server inactive at {zone:?}");
    }
    assert!(m.is_in_active_area(ZoneCoord::new(1, -1), ME));
    assert!(!m.is_in_active_area(ZoneCoord::new(2, 0), ME));
}

#[test]
fn client_release_keeps_server_objects_and_clears_own_stale_ones() {
    let mut e = client();
    e.update_local_area(ME, Vec3::ZERO).expect("local area");

    let mut recs = vec![
        WorldObjectRecord::new(ObjectId(1), ZoneCoord::new(0, 1)),
        WorldObjectRecord::new(ObjectId(2), ZoneCoord::new(8, 8)),
        WorldObjectRecord::new(ObjectId(3), ZoneCoord::new(8, 8)),
    ];
    recs[0].set_owner_internal(ME);
    recs[1].set_owner_internal(ME);
    recs[2].set_owner_internal(SERVER);
    let m = e.area_membership();
    assert_eq!(m.release_stale(ME, &mut recs, e.owner_policy()), 1);
    assert_eq!(m.release_stale(SERVER, &mut recs, e.owner_policy()), 0);
    assert_eq!(recs[0].owner(), ME);
    assert_eq!(recs[1].owner(), SessionId::NONE, "clients store the raw unset owner");
    assert_eq!(recs[2].owner(), SERVER);
}

#[test]
fn client_still_refuses_to_arbitrate() {
    let mut e = client();
    let peers = PeerTable::new();
    let mut store = MemoryEntityStore::new();
    let err = e.run_tick(&peers, HostPosition::headless(), &mut store).unwrap_err();
    assert_eq!(err, EngineError::NotAuthoritative(HostRole::Client));
}
