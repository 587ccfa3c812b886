//! In-memory appointment store.
//!
//! The single source of truth for the working set: rendering reads
//! snapshots, gestures commit through [`mutate`](AppointmentStore::mutate),
//! and the data source replenishes the set through the two-phase load
//! protocol. No component holds a writable alias to a store-owned record —
//! every mutation is copy-on-write and replaces the record by id.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};

use crate::config::PlannerConfig;
use crate::models::appointment::Appointment;
use crate::models::resource::Resource;
use crate::models::view::TimeRange;
use crate::services::source::AppointmentSource;

pub mod mutate;
pub mod queries;

pub use mutate::{AppointmentPatch, MutateError};

/// Handle for an in-flight load; stale tickets are refused at completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    range: TimeRange,
}

/// What applying a settled load did to the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied {
        inserted: usize,
        updated: usize,
        removed: usize,
        /// Records kept over their fetched copy because they were
        /// mutated locally while the load was pending.
        preserved: usize,
    },
    /// A newer load superseded this ticket; nothing was applied.
    Stale,
}

#[derive(Debug)]
struct PendingLoad {
    /// Ids mutated locally since the load began; these win the merge.
    dirty: HashSet<String>,
}

/// In-memory collection of appointments and resources.
pub struct AppointmentStore {
    config: PlannerConfig,
    appointments: HashMap<String, Appointment>,
    resources: HashMap<String, Resource>,
    load_generation: u64,
    pending_load: Option<PendingLoad>,
}

impl AppointmentStore {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            appointments: HashMap::new(),
            resources: HashMap::new(),
            load_generation: 0,
            pending_load: None,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// All resources, sorted by name for stable presentation.
    pub fn resources(&self) -> Vec<&Resource> {
        let mut resources: Vec<&Resource> = self.resources.values().collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        resources
    }

    /// Replace the resource set wholesale.
    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources.into_iter().map(|r| (r.id.clone(), r)).collect();
    }

    /// Insert or replace appointments by id, outside the load protocol.
    pub fn insert_batch(&mut self, appointments: Vec<Appointment>) {
        for appointment in appointments {
            self.appointments
                .insert(appointment.id.clone(), appointment);
        }
    }

    /// True while a load is pending; the grid dims the stale working set.
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Begin a load for the given range.
    ///
    /// A load that begins while another is pending supersedes it: the
    /// older ticket becomes stale, but ids already mutated locally stay
    /// protected for the new merge.
    pub fn begin_load(&mut self, range: TimeRange) -> LoadTicket {
        self.load_generation += 1;
        let carried_dirty = self
            .pending_load
            .take()
            .map(|pending| pending.dirty)
            .unwrap_or_default();

        self.pending_load = Some(PendingLoad {
            dirty: carried_dirty,
        });

        log::info!(
            "Beginning appointment load generation {} for {} .. {}",
            self.load_generation,
            range.start,
            range.end
        );

        LoadTicket {
            generation: self.load_generation,
            range,
        }
    }

    /// Apply a settled load batch, merging by id.
    ///
    /// Fetched records replace or insert, except where a local mutation
    /// landed while the load was pending — those records are preserved.
    /// Committed records inside the loaded range that the source no
    /// longer returns are dropped, so the source stays authoritative for
    /// the window it was asked about.
    pub fn complete_load(&mut self, ticket: LoadTicket, batch: Vec<Appointment>) -> LoadOutcome {
        if ticket.generation != self.load_generation {
            log::warn!(
                "Discarding stale load generation {} (current {})",
                ticket.generation,
                self.load_generation
            );
            return LoadOutcome::Stale;
        }

        let pending = self.pending_load.take();
        let dirty = pending.map(|p| p.dirty).unwrap_or_default();

        let fetched_ids: HashSet<String> = batch.iter().map(|a| a.id.clone()).collect();

        let mut inserted = 0;
        let mut updated = 0;
        let mut preserved = 0;

        for appointment in batch {
            if dirty.contains(&appointment.id) {
                preserved += 1;
                continue;
            }
            if self
                .appointments
                .insert(appointment.id.clone(), appointment)
                .is_some()
            {
                updated += 1;
            } else {
                inserted += 1;
            }
        }

        let range = ticket.range;
        let stale_ids: Vec<String> = self
            .appointments
            .values()
            .filter(|a| {
                a.overlaps(range.start, range.end)
                    && !fetched_ids.contains(&a.id)
                    && !dirty.contains(&a.id)
            })
            .map(|a| a.id.clone())
            .collect();

        let removed = stale_ids.len();
        for id in stale_ids {
            self.appointments.remove(&id);
        }

        log::info!(
            "Applied load generation {}: {} inserted, {} updated, {} removed, {} preserved",
            ticket.generation,
            inserted,
            updated,
            removed,
            preserved
        );

        LoadOutcome::Applied {
            inserted,
            updated,
            removed,
            preserved,
        }
    }

    /// Drop the pending marker after a failed load, keeping the last
    /// settled working set intact.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if ticket.generation == self.load_generation {
            self.pending_load = None;
        }
    }

    /// Fetch and apply the working set for a time window. This is the
    /// engine's only suspension point.
    pub async fn load(
        &mut self,
        source: &dyn AppointmentSource,
        range: TimeRange,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load(range);

        match source
            .load_appointments(range)
            .await
            .context("Failed to load appointments from data source")
        {
            Ok(batch) => Ok(self.complete_load(ticket, batch)),
            Err(e) => {
                self.fail_load(ticket);
                Err(e)
            }
        }
    }

    /// Fetch and replace the resource set.
    pub async fn load_resources(&mut self, source: &dyn AppointmentSource) -> Result<usize> {
        let resources = source
            .load_resources()
            .await
            .context("Failed to load resources from data source")?;
        let count = resources.len();
        self.set_resources(resources);
        Ok(count)
    }

    pub(crate) fn mark_dirty(&mut self, id: &str) {
        if let Some(pending) = self.pending_load.as_mut() {
            pending.dirty.insert(id.to_string());
        }
    }
}
