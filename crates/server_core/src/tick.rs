//! Fixed-order host tick: ownership arbitration -> population evaluation.

use glam::Vec3;

use crate::collector::HostPosition;
use crate::engine::{OwnershipEngine, TickReport};
use crate::error::EngineError;
use crate::external::{EntityStore, PeerRegistry};
use crate::population::{PopulationDriver, SpawnEvaluator};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostTickReport {
    pub ownership: TickReport,
    /// Zones handed to the spawn evaluator this tick (0 when not due).
    pub zones_evaluated: usize,
}

/// Run one host tick:
/// - Arbitrate ownership around every reference point
/// - Drive population evaluation over the resulting near sectors
///
/// Arbitration errors abort the tick before population runs.
pub fn tick_host<S: EntityStore + ?Sized>(
    engine: &mut OwnershipEngine,
    population: &mut PopulationDriver,
    peers: &dyn PeerRegistry,
    store: &mut S,
    evaluator: &mut dyn SpawnEvaluator,
    host_pos: HostPosition,
    dt: f32,
) -> Result<HostTickReport, EngineError> {
    let ownership = engine.run_tick(peers, host_pos, store)?;
    let embodied: Option<Vec3> = host_pos.embodied;
    let zones_evaluated = population.update(dt, embodied, engine.active_areas(), evaluator);
    Ok(HostTickReport { ownership, zones_evaluated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peers::PeerTable;
    use crate::store::MemoryEntityStore;
    use data_runtime::configs::ownership::{HostRole, OwnershipCfg};
    use zone_core::{SessionId, ZoneCoord};

    #[derive(Default)]
    struct Count(usize);
    impl SpawnEvaluator for Count {
        fn evaluate_zone(&mut self, _zone: ZoneCoord) {
            self.0 += 1;
        }
    }

    #[test]
    fn headless_tick_runs_population_over_peer_areas() {
        let cfg = OwnershipCfg {
            role: HostRole::Dedicated,
            near_radius: 1,
            distant_radius: 1,
            ..Default::default()
        };
        let mut engine = OwnershipEngine::new(cfg).expect("engine");
        engine.init_host_session(SessionId(42)).expect("init");
        let mut pop = PopulationDriver::for_role(HostRole::Dedicated, 0.0);
        let mut peers = PeerTable::new();
        peers.connect(SessionId(1), Vec3::ZERO);
        let mut store = MemoryEntityStore::new();
        let mut eval = Count::default();
        let host_pos = HostPosition::headless();
        let rep = tick_host(&mut engine, &mut pop, &peers, &mut store, &mut eval, host_pos, 0.05)
            .expect("tick");
        assert_eq!(rep.ownership.near_sectors, 9);
        assert_eq!(rep.zones_evaluated, 9);
        assert_eq!(eval.0, 9);
    }

    #[test]
    fn uninitialized_host_skips_population() {
        let mut engine = OwnershipEngine::new(OwnershipCfg::default()).expect("engine");
        let mut pop = PopulationDriver::for_role(HostRole::Dedicated, 0.0);
        let peers = PeerTable::new();
        let mut store = MemoryEntityStore::new();
        let mut eval = Count::default();
        let host_pos = HostPosition::headless();
        let res = tick_host(&mut engine, &mut pop, &peers, &mut store, &mut eval, host_pos, 0.05);
        assert_eq!(res.unwrap_err(), EngineError::HostSessionUninitialized);
        assert_eq!(pop.passes, 0);
    }
}
