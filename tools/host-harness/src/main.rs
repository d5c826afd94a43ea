//! host-harness: boot a headless host, scatter objects, walk simulated peers
//! around and report ownership churn per tick.
//!
//! Usage:
//!   cargo run -p host-harness -- --ticks 600 --peers 4 --seed 7

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use data_runtime::configs::{ownership, telemetry};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use server_core::ServerState;
use server_core::population::{AlwaysEvaluate, RequireEmbodiedActor, SpawnEvaluator};
use std::collections::HashMap;
use std::path::PathBuf;
use zone_core::{ObjectId, SessionId, WorldObjectRecord, ZoneCoord};

#[derive(Parser)]
#[command(author, version, about = "Headless host ownership harness", long_about = None)]
struct Cli {
    /// Ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Simulated peers
    #[arg(long, default_value_t = 4)]
    peers: u32,
    /// Objects scattered over the world at boot
    #[arg(long, default_value_t = 2000)]
    objects: u32,
    /// RNG seed for object placement and peer walks
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Seconds per tick
    #[arg(long, default_value_t = 0.05)]
    dt: f32,
    /// Ownership config file (defaults to data/config/ownership.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a summary line every N ticks
    #[arg(long, default_value_t = 50)]
    report_every: u32,
    /// Spawn gate override (default: the role's gate)
    #[arg(long, value_enum, default_value_t = GateArg::Role)]
    spawn_gate: GateArg,
    /// Chance per tick that a random object drifts into a neighboring zone
    #[arg(long, default_value_t = 0.05)]
    drift: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GateArg {
    Role,
    Always,
    Embodied,
}

/// Counts spawn evaluations per zone.
#[derive(Default)]
struct PopulationLog {
    per_zone: HashMap<ZoneCoord, u32>,
}

impl SpawnEvaluator for PopulationLog {
    fn evaluate_zone(&mut self, zone: ZoneCoord) {
        *self.per_zone.entry(zone).or_default() += 1;
    }
}

struct Walker {
    session: SessionId,
    pos: Vec3,
    heading: f32,
    speed_mps: f32,
    online: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let tcfg = telemetry::load_default()?;
    let _guard = server_core::telemetry::init_telemetry(&tcfg)?;
    let summaries = tcfg.tick_summary.unwrap_or(true);
    let cfg = match &cli.config {
        Some(path) => {
            ownership::load_from(path).with_context(|| format!("load {}", path.display()))?
        }
        None => ownership::load_default()?,
    };
    let zone_size = cfg.zone_size_m;

    let mut host_id = rand::rng().random::<u64>();
    while host_id == 0 {
        host_id = rand::rng().random::<u64>();
    }
    let mut srv = ServerState::boot(cfg, SessionId(host_id)).context("boot host")?;
    match cli.spawn_gate {
        GateArg::Role => {}
        GateArg::Always => srv.population.set_gate(Box::new(AlwaysEvaluate)),
        GateArg::Embodied => srv.population.set_gate(Box::new(RequireEmbodiedActor)),
    }

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let extent = zone_size * 24.0;
    for i in 0..cli.objects {
        let p = Vec3::new(
            rng.random_range(-extent..extent),
            0.0,
            rng.random_range(-extent..extent),
        );
        let zone = zone_core::zone_of(p, zone_size);
        srv.store.insert(WorldObjectRecord::new(ObjectId(u64::from(i) + 1), zone));
    }

    let mut walkers: Vec<Walker> = (0..cli.peers)
        .map(|i| Walker {
            session: SessionId(u64::from(i) + 1),
            pos: zone_core::zone_center(
                ZoneCoord::new(rng.random_range(-12..=12), rng.random_range(-12..=12)),
                zone_size,
            ),
            heading: rng.random_range(0.0..std::f32::consts::TAU),
            speed_mps: rng.random_range(4.0..12.0),
            online: true,
        })
        .collect();
    for w in &walkers {
        srv.peers.connect(w.session, w.pos);
    }

    let mut log = PopulationLog::default();
    let mut total_assigned = 0usize;
    for t in 1..=cli.ticks {
        for w in walkers.iter_mut() {
            // occasional reconnect churn
            if rng.random_bool(0.002) {
                w.online = !w.online;
                if w.online {
                    srv.peers.connect(w.session, w.pos);
                } else {
                    srv.peers.disconnect(w.session);
                }
            }
            w.heading += rng.random_range(-0.2..0.2);
            w.pos += Vec3::new(w.heading.cos(), 0.0, w.heading.sin()) * w.speed_mps * cli.dt;
            if w.online {
                srv.peers.set_ref_pos(w.session, w.pos);
            }
        }
        if cli.objects > 0 && rng.random_bool(cli.drift.clamp(0.0, 1.0)) {
            let id = ObjectId(rng.random_range(1..=u64::from(cli.objects)));
            if let Some(zone) = srv.store.get(id).map(|r| r.zone) {
                let to = ZoneCoord::new(
                    zone.x.saturating_add(rng.random_range(-1..=1)),
                    zone.y.saturating_add(rng.random_range(-1..=1)),
                );
                srv.store.relocate(id, to);
            }
        }
        let rep = srv.step(cli.dt, &mut log)?;
        total_assigned += rep.ownership.assigned;
        if summaries && cli.report_every > 0 && t % cli.report_every == 0 {
            tracing::info!(
                target: "harness",
                tick = t,
                peers = srv.peers.len(),
                near = rep.ownership.near_sectors,
                distant = rep.ownership.distant_sectors,
                near_objects = rep.ownership.near_objects.len(),
                dormant_objects = rep.ownership.dormant_objects.len(),
                assigned = rep.ownership.assigned,
                "tick summary"
            );
        }
    }

    let host = srv.engine.host_session().unwrap_or_default();
    let host_owned = srv.store.iter().filter(|r| r.owner() == host).count();
    println!(
        "ticks={} objects={} host_owned={} total_assigned={} zones_evaluated={}",
        cli.ticks,
        srv.store.len(),
        host_owned,
        total_assigned,
        log.per_zone.values().sum::<u32>()
    );
    Ok(())
}
