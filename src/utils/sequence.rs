use std::collections::HashMap;
use std::sync::Mutex;

/// Resources whose responses race each other when requests overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    CandidateList,
    Overview,
    AdminPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    resource: Resource,
    seq: u64,
}

/// Hands out increasing tickets per resource. Only a response holding the
/// most recently issued ticket may be applied.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: Mutex<HashMap<Resource, u64>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, resource: Resource) -> Ticket {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        let seq = latest.entry(resource).or_insert(0);
        *seq += 1;
        Ticket {
            resource,
            seq: *seq,
        }
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.get(&ticket.resource).copied() == Some(ticket.seq)
    }

    pub fn reset(&self) {
        // Bump every resource so responses still in flight are discarded.
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        for seq in latest.values_mut() {
            *seq += 1;
        }
    }
}
