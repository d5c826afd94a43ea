//! Headless host ownership engine.
//!
//! Each tick the host partitions the world into near (owned, simulated) and
//! distant (loaded, dormant) zones around every connected peer, claims
//! unowned or stale objects in near zones, and lets population evaluation
//! run without an embodied local actor.
//!
//! Modules
//! - `collector`: reference points per tick
//! - `arbiter` / `distant`: near-sector ownership pass and distant loading
//! - `ownership`: owner defaulting policy
//! - `area`: per-tick active areas and membership/release capability
//! - `population`: spawn gate + population driver
//! - `engine` / `tick`: per-tick entry points
//! - `peers` / `store`: in-process collaborators behind `external` traits

#![forbid(unsafe_code)]

pub mod arbiter;
pub mod area;
pub mod collector;
pub mod distant;
pub mod engine;
pub mod error;
pub mod external;
pub mod ownership;
pub mod peers;
pub mod population;
pub mod store;
pub mod telemetry;
pub mod tick;

pub use collector::{HostPosition, ReferencePoint};
pub use engine::{OwnershipEngine, TickReport};
pub use error::EngineError;
pub use external::{EntityStore, Peer, PeerRegistry};

use data_runtime::configs::ownership::OwnershipCfg;
use zone_core::SessionId;

use crate::peers::PeerTable;
use crate::population::{PopulationDriver, SpawnEvaluator};
use crate::store::MemoryEntityStore;
use crate::tick::HostTickReport;

/// Host loop state wired with the in-process peer table and entity store.
pub struct ServerState {
    pub engine: OwnershipEngine,
    pub population: PopulationDriver,
    pub peers: PeerTable,
    pub store: MemoryEntityStore,
    pub host_pos: HostPosition,
}

impl ServerState {
    /// Build a host for `cfg` and fix its session id.
    pub fn boot(cfg: OwnershipCfg, host: SessionId) -> Result<Self, EngineError> {
        let population = PopulationDriver::for_role(cfg.role, cfg.spawn_interval_s);
        let mut engine = OwnershipEngine::new(cfg)?;
        engine.init_host_session(host)?;
        Ok(Self {
            engine,
            population,
            peers: PeerTable::new(),
            store: MemoryEntityStore::new(),
            host_pos: HostPosition::headless(),
        })
    }

    /// One simulation tick.
    pub fn step(
        &mut self,
        dt: f32,
        evaluator: &mut dyn SpawnEvaluator,
    ) -> Result<HostTickReport, EngineError> {
        tick::tick_host(
            &mut self.engine,
            &mut self.population,
            &self.peers,
            &mut self.store,
            evaluator,
            self.host_pos,
            dt,
        )
    }
}
