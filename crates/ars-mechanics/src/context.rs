//! The per-call resolution context.

use crate::config::RulesConfig;
use crate::dice::{self, BotchCheck, DieRoll, DieSource};
use crate::event::{EventSink, ResolutionEvent};

/// Everything a resolver needs besides the characters themselves.
///
/// There is no global state in the engine: the die source, the rule
/// constants, and the optional event sink travel with every call.
pub struct ResolveContext<'a> {
    /// Where die faces come from.
    pub dice: &'a mut dyn DieSource,
    /// Rule constants.
    pub rules: &'a RulesConfig,
    events: Option<&'a mut dyn EventSink>,
}

impl<'a> ResolveContext<'a> {
    /// Create a context with no event sink.
    pub fn new(dice: &'a mut dyn DieSource, rules: &'a RulesConfig) -> Self {
        Self {
            dice,
            rules,
            events: None,
        }
    }

    /// Attach an event sink.
    pub fn with_sink(mut self, sink: &'a mut dyn EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    /// Hand an event to the sink, if there is one.
    pub fn emit(&mut self, event: ResolutionEvent) {
        if let Some(sink) = &mut self.events {
            sink.record(event);
        }
    }

    /// Roll a simple die.
    pub fn simple_die(&mut self) -> DieRoll {
        dice::simple_die(self.dice)
    }

    /// Roll a stress die.
    pub fn stress_die(&mut self) -> DieRoll {
        dice::stress_die(self.dice)
    }

    /// Roll a simple or stress die.
    pub fn roll_die(&mut self, stress: bool) -> DieRoll {
        dice::roll_die(self.dice, stress)
    }

    /// Roll `n` botch dice.
    pub fn botch_check(&mut self, n: u32) -> BotchCheck {
        dice::botch_check(self.dice, n)
    }

    /// A uniform index in `0..n`.
    pub fn pick(&mut self, n: u32) -> u32 {
        self.dice.below(n)
    }
}
