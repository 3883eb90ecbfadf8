//! Resource-consumption counters reported by decision providers.
//!
//! Purely observational: nothing in the round logic reads these back.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

/// Aggregates usage per provider id. Share it with `Arc`.
#[derive(Debug, Default)]
pub struct UsageTracker {
    by_provider: Mutex<BTreeMap<String, UsageTotals>>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, provider_id: &str, input: u64, output: u64, total: u64) {
        let mut map = match self.by_provider.lock() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        let entry = map.entry(provider_id.to_string()).or_default();
        entry.input += input;
        entry.output += output;
        entry.total += total;
    }

    pub fn snapshot(&self) -> BTreeMap<String, UsageTotals> {
        match self.by_provider.lock() {
            Ok(m) => m.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn summary(&self) -> String {
        let mut out = String::from("Token usage by provider:");
        for (id, t) in self.snapshot() {
            out.push_str(&format!(
                "\n{}: input={}, output={}, total={}",
                id, t.input, t.output, t.total
            ));
        }
        out
    }
}
