//! In-memory dataset for one session.
//!
//! The flow table and the two auxiliary tables load independently and may
//! finish in any order. Each slot remembers the generation of the newest
//! load started for it; a completion carrying an older generation is
//! dropped, so a slow superseded read can never overwrite fresher data.
//! A failed load leaves the slot empty rather than surfacing an error to the
//! aggregation layer.
use crate::auxiliary::{ingest_auxiliary, AuxiliaryRow};
use crate::error::Result;
use crate::loader::{ingest_with_report, IngestReport};
use crate::types::{MigrationRecord, RawRow};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSlot {
    Flows,
    Duration,
    Reasons,
}

impl TableSlot {
    fn index(self) -> usize {
        match self {
            TableSlot::Flows => 0,
            TableSlot::Duration => 1,
            TableSlot::Reasons => 2,
        }
    }
}

/// Handle for one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub slot: TableSlot,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Slots {
    generation: u64,
    latest: [u64; 3],
    flows: Arc<Vec<MigrationRecord>>,
    flow_report: Option<IngestReport>,
    duration: Arc<Vec<AuxiliaryRow>>,
    reasons: Arc<Vec<AuxiliaryRow>>,
}

#[derive(Debug, Default)]
pub struct DatasetStore {
    slots: Mutex<Slots>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // Every update is a single assignment, so a poisoned guard still
        // holds consistent data.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a load for `slot`, superseding any load already in flight.
    pub fn begin_load(&self, slot: TableSlot) -> LoadTicket {
        // Issue and record under one guard so tickets reach `latest` in the
        // order they were issued.
        let mut slots = self.lock();
        slots.generation += 1;
        let generation = slots.generation;
        slots.latest[slot.index()] = generation;
        LoadTicket { slot, generation }
    }

    fn accept(slots: &Slots, ticket: LoadTicket) -> bool {
        let current = slots.latest[ticket.slot.index()];
        if ticket.generation != current {
            debug!(
                slot = ?ticket.slot,
                generation = ticket.generation,
                current,
                "discarding stale load"
            );
            return false;
        }
        true
    }

    fn rows_or_empty(ticket: LoadTicket, result: Result<Vec<RawRow>>) -> Vec<RawRow> {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!(slot = ?ticket.slot, error = %e, "table load failed, using empty set");
                Vec::new()
            }
        }
    }

    /// Publish a finished load. Returns `false` when the ticket was stale.
    pub fn finish_load(&self, ticket: LoadTicket, result: Result<Vec<RawRow>>) -> bool {
        if !Self::accept(&self.lock(), ticket) {
            return false;
        }
        // Ingest outside the lock; re-check afterwards in case a newer load
        // began meanwhile.
        let rows = Self::rows_or_empty(ticket, result);
        match ticket.slot {
            TableSlot::Flows => {
                let (records, report) = ingest_with_report(&rows);
                let mut slots = self.lock();
                if !Self::accept(&slots, ticket) {
                    return false;
                }
                slots.flows = Arc::new(records);
                slots.flow_report = Some(report);
            }
            TableSlot::Duration | TableSlot::Reasons => {
                let table = Arc::new(ingest_auxiliary(rows));
                let mut slots = self.lock();
                if !Self::accept(&slots, ticket) {
                    return false;
                }
                if ticket.slot == TableSlot::Duration {
                    slots.duration = table;
                } else {
                    slots.reasons = table;
                }
            }
        }
        true
    }

    pub fn flows(&self) -> Arc<Vec<MigrationRecord>> {
        Arc::clone(&self.lock().flows)
    }

    pub fn flow_report(&self) -> Option<IngestReport> {
        self.lock().flow_report.clone()
    }

    pub fn duration(&self) -> Arc<Vec<AuxiliaryRow>> {
        Arc::clone(&self.lock().duration)
    }

    pub fn reasons(&self) -> Arc<Vec<AuxiliaryRow>> {
        Arc::clone(&self.lock().reasons)
    }
}
