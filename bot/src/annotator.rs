use crate::Decision;
use moonshot_api::{Analyzer, KnowableState};
use std::sync::Mutex;

/// Observes search decisions. Nothing it does feeds back into play.
pub trait Annotator: Send + Sync {
    fn on_decision(&self, state: &KnowableState, analyzer: &Analyzer, decision: &Decision);
}

/// Keeps every decision in memory.
#[derive(Default)]
pub struct DecisionLog {
    decisions: Mutex<Vec<Decision>>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> Vec<Decision> {
        match self.decisions.lock() {
            Ok(decisions) => decisions.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Annotator for DecisionLog {
    fn on_decision(&self, _: &KnowableState, _: &Analyzer, decision: &Decision) {
        match self.decisions.lock() {
            Ok(mut decisions) => decisions.push(decision.clone()),
            Err(poisoned) => poisoned.into_inner().push(decision.clone()),
        }
    }
}
