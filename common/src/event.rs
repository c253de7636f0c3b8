// Contract events
// Events are only appended by operations that completed successfully.
// A rejected call never leaves a trace in the log.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Principal;

/// Value carried by an asset movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetValue {
    /// Fungible amount
    Amount(u128),
    /// Non-fungible token id
    Token(u64),
}

impl fmt::Display for AssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetValue::Amount(amount) => write!(f, "{} units", amount),
            AssetValue::Token(token_id) => write!(f, "token #{}", token_id),
        }
    }
}

/// Observable events emitted by an asset controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ContractEvent {
    OwnershipTransferred {
        previous_owner: Principal,
        new_owner: Principal,
    },
    Paused {
        account: Principal,
    },
    Unpaused {
        account: Principal,
    },
    /// Asset movement, `from` is the zero principal for a mint
    Transfer {
        from: Principal,
        to: Principal,
        value: AssetValue,
    },
}

impl ContractEvent {
    /// External event name
    pub fn name(&self) -> &'static str {
        match self {
            ContractEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            ContractEvent::Paused { .. } => "Paused",
            ContractEvent::Unpaused { .. } => "Unpaused",
            ContractEvent::Transfer { .. } => "Transfer",
        }
    }
}

/// Event with its position in the controller log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoggedEvent {
    pub sequence: u64,
    #[serde(flatten)]
    pub event: ContractEvent,
}

/// Append-only event log owned by a controller
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    next_sequence: u64,
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number
    pub fn push(&mut self, event: ContractEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(LoggedEvent { sequence, event });
        sequence
    }

    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ContractEvent> {
        self.entries.last().map(|entry| &entry.event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove the buffered entries for delivery to subscribers.
    /// Sequence numbers keep increasing after a drain.
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.entries)
    }
}
