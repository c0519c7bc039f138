//! Resolution events and the sinks that receive them.
//!
//! A sink is optional. Resolvers build the same outcome whether or not one
//! is attached; the event is a copy of what happened, handed over after
//! the fact.

use std::fmt;

use ars_core::CharacterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of action was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionKind {
    /// A combatant rolled initiative.
    Initiative,
    /// An attack was resolved.
    Attack,
    /// A feint was resolved.
    Feint,
    /// A charge was resolved.
    Charge,
    /// A spell was cast.
    Cast,
    /// A Certamen duel was opened.
    CertamenOpened,
    /// The defender answered a Certamen challenge.
    CertamenAnswered,
    /// A Certamen exchange was rolled.
    CertamenExchange,
    /// A Certamen duel was concluded.
    CertamenEnded,
    /// An aging roll was made.
    Aging,
    /// Warping points were added.
    Warping,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiative => write!(f, "initiative"),
            Self::Attack => write!(f, "attack"),
            Self::Feint => write!(f, "feint"),
            Self::Charge => write!(f, "charge"),
            Self::Cast => write!(f, "cast"),
            Self::CertamenOpened => write!(f, "certamen opened"),
            Self::CertamenAnswered => write!(f, "certamen answered"),
            Self::CertamenExchange => write!(f, "certamen exchange"),
            Self::CertamenEnded => write!(f, "certamen ended"),
            Self::Aging => write!(f, "aging"),
            Self::Warping => write!(f, "warping"),
        }
    }
}

/// A named numeric change, e.g. `("damage", 7)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// What changed.
    pub label: String,
    /// By how much.
    pub value: i32,
}

/// A notification that an action was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEvent {
    /// What was resolved.
    pub kind: ResolutionKind,
    /// Who took part, actor first.
    pub participants: Vec<CharacterId>,
    /// Numeric results worth reporting.
    pub deltas: Vec<Delta>,
}

impl ResolutionEvent {
    /// Create an event with no deltas.
    pub fn new(kind: ResolutionKind, participants: Vec<CharacterId>) -> Self {
        Self {
            kind,
            participants,
            deltas: Vec::new(),
        }
    }

    /// Add a delta.
    pub fn with_delta(mut self, label: impl Into<String>, value: i32) -> Self {
        self.deltas.push(Delta {
            label: label.into(),
            value,
        });
        self
    }

    /// Look up a delta by label.
    pub fn delta(&self, label: &str) -> Option<i32> {
        self.deltas
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.value)
    }

    /// Check whether a character took part.
    pub fn involves(&self, id: CharacterId) -> bool {
        self.participants.contains(&id)
    }
}

/// Receives resolution events.
pub trait EventSink {
    /// Called once per resolved action.
    fn record(&mut self, event: ResolutionEvent);
}

/// An event as stored by [`EventLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// The event itself.
    pub event: ResolutionEvent,
}

/// An in-memory sink that keeps the most recent events.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<LoggedEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: ResolutionEvent) {
        self.events.push(LoggedEvent {
            timestamp: Utc::now(),
            event,
        });
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Events of one kind.
    pub fn of_kind(&self, kind: ResolutionKind) -> Vec<&LoggedEvent> {
        self.events.iter().filter(|e| e.event.kind == kind).collect()
    }

    /// Events a character took part in.
    pub fn events_for(&self, id: CharacterId) -> Vec<&LoggedEvent> {
        self.events.iter().filter(|e| e.event.involves(id)).collect()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&ResolutionEvent> {
        self.events.last().map(|e| &e.event)
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: ResolutionEvent) {
        self.push(event);
    }
}
