//! Population (spawn) evaluation driver and its gate.
//!
//! The stock behavior skips population evaluation when no embodied local
//! actor exists. The gate makes that check injectable: a headless host uses
//! `AlwaysEvaluate`, so evaluation runs over the tick's near sectors even
//! though nobody is standing in them locally. Everything else the driver
//! does per update (timer advance, bookkeeping) happens regardless of the
//! gate.

use data_runtime::configs::ownership::HostRole;
use glam::Vec3;
use zone_core::ZoneCoord;

use crate::area::ActiveAreas;

pub trait SpawnGate {
    fn should_evaluate(&self, embodied_actor: Option<Vec3>) -> bool;
}

/// Stock rule: only evaluate with an embodied local actor.
#[derive(Copy, Clone, Debug, Default)]
pub struct RequireEmbodiedActor;

impl SpawnGate for RequireEmbodiedActor {
    fn should_evaluate(&self, embodied_actor: Option<Vec3>) -> bool {
        embodied_actor.is_some()
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysEvaluate;

impl SpawnGate for AlwaysEvaluate {
    fn should_evaluate(&self, _embodied_actor: Option<Vec3>) -> bool {
        true
    }
}

impl<F> SpawnGate for F
where
    F: Fn(Option<Vec3>) -> bool,
{
    fn should_evaluate(&self, embodied_actor: Option<Vec3>) -> bool {
        self(embodied_actor)
    }
}

/// Default gate per role: headless hosts evaluate unconditionally.
pub fn gate_for_role(role: HostRole) -> Box<dyn SpawnGate> {
    if role.is_headless() {
        Box::new(AlwaysEvaluate)
    } else {
        Box::new(RequireEmbodiedActor)
    }
}

/// Population logic that decides what to spawn in a zone.
pub trait SpawnEvaluator {
    fn evaluate_zone(&mut self, zone: ZoneCoord);
}

pub struct PopulationDriver {
    gate: Box<dyn SpawnGate>,
    interval_s: f32,
    timer_s: f32,
    /// Completed evaluation passes.
    pub passes: u64,
    /// Updates where the interval elapsed but the gate said no.
    pub gated: u64,
}

impl PopulationDriver {
    pub fn new(gate: Box<dyn SpawnGate>, interval_s: f32) -> Self {
        Self { gate, interval_s: interval_s.max(0.0), timer_s: 0.0, passes: 0, gated: 0 }
    }

    pub fn for_role(role: HostRole, interval_s: f32) -> Self {
        Self::new(gate_for_role(role), interval_s)
    }

    pub fn set_gate(&mut self, gate: Box<dyn SpawnGate>) {
        self.gate = gate;
    }

    /// Advance the spawn timer and, when due and allowed, evaluate every
    /// near sector of the tick in zone order. Returns zones evaluated.
    pub fn update(
        &mut self,
        dt: f32,
        embodied_actor: Option<Vec3>,
        areas: &ActiveAreas,
        evaluator: &mut dyn SpawnEvaluator,
    ) -> usize {
        self.timer_s += dt.max(0.0);
        if self.timer_s < self.interval_s {
            return 0;
        }
        self.timer_s = 0.0;
        if !self.gate.should_evaluate(embodied_actor) {
            self.gated += 1;
            return 0;
        }
        let mut zones: Vec<ZoneCoord> = areas.authority_near().iter().copied().collect();
        zones.sort_unstable();
        for &z in &zones {
            evaluator.evaluate_zone(z);
        }
        self.passes += 1;
        zones.len()
    }
}
