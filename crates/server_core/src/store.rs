//! In-process entity store keyed by zone.
//!
//! Stands in for the persistence layer: holds records per zone, tracks which
//! zones were poked active during the current tick (reset by the engine at
//! the start of every tick), and imports/exports the persisted JSON-lines
//! form. Unloadable lines are skipped and reported.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};
use zone_core::{ObjectId, PersistedObject, SessionId, WorldObjectRecord, ZoneCoord};

use crate::external::EntityStore;
use crate::ownership::OwnerPolicy;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Default, Debug)]
pub struct MemoryEntityStore {
    zones: HashMap<ZoneCoord, Vec<WorldObjectRecord>>,
    active: HashSet<ZoneCoord>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.values().all(Vec::is_empty)
    }

    pub fn insert(&mut self, rec: WorldObjectRecord) {
        self.zones.entry(rec.zone).or_default().push(rec);
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObjectRecord> {
        self.zones.values().flat_map(|v| v.iter()).find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldObjectRecord> {
        self.zones.values().flat_map(|v| v.iter())
    }

    /// Move an object to another zone (simulation moved it). Returns `false`
    /// if the id is unknown.
    pub fn relocate(&mut self, id: ObjectId, to: ZoneCoord) -> bool {
        let mut found = None;
        for recs in self.zones.values_mut() {
            if let Some(i) = recs.iter().position(|r| r.id == id) {
                found = Some(recs.swap_remove(i));
                break;
            }
        }
        match found {
            Some(mut rec) => {
                rec.zone = to;
                self.insert(rec);
                true
            }
            None => false,
        }
    }

    /// Owner of every stored object, ordered by id.
    pub fn owners(&self) -> BTreeMap<ObjectId, SessionId> {
        self.iter().map(|r| (r.id, r.owner())).collect()
    }

    #[inline]
    pub fn is_zone_active(&self, zone: ZoneCoord) -> bool {
        self.active.contains(&zone)
    }

    #[inline]
    pub fn active_zone_count(&self) -> usize {
        self.active.len()
    }

    /// Load records from JSON lines, resolving owners through `policy`.
    pub fn import_json_lines(&mut self, text: &str, policy: &dyn OwnerPolicy) -> ImportReport {
        let mut report = ImportReport::default();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<PersistedObject>(line) {
                Ok(stored) => {
                    self.insert(policy.load_record(&stored));
                    report.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        target: "store",
                        line = lineno + 1,
                        error = %e,
                        "skipping unloadable record"
                    );
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// Write all records as JSON lines, ordered by id.
    pub fn export_json_lines(&self) -> Result<String> {
        let mut recs: Vec<&WorldObjectRecord> = self.iter().collect();
        recs.sort_unstable_by_key(|r| r.id);
        let mut out = String::new();
        for r in recs {
            let line = serde_json::to_string(&r.to_persisted())
                .with_context(|| format!("encode object {}", r.id.0))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}

impl EntityStore for MemoryEntityStore {
    /// Forget the previous tick's active set.
    fn begin_tick(&mut self) {
        self.active.clear();
    }

    fn mark_zone_active(&mut self, zone: ZoneCoord) {
        self.active.insert(zone);
    }

    fn objects_in_zone_mut(&mut self, zone: ZoneCoord) -> &mut [WorldObjectRecord] {
        match self.zones.get_mut(&zone) {
            Some(v) => v.as_mut_slice(),
            None => &mut [],
        }
    }

    fn collect_distant(&mut self, zone: ZoneCoord, out: &mut Vec<ObjectId>) {
        if let Some(v) = self.zones.get(&zone) {
            out.extend(v.iter().map(|r| r.id));
        }
    }
}
