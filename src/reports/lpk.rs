use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::LpkEntry;

/// Changes needed to move a report's stored LPK entries to a new set.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LpkPlan {
    pub inserts: Vec<LpkEntry>,
    pub updates: Vec<LpkEntry>,
    pub deletes: Vec<String>,
}

impl LpkPlan {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

/// Diffs `next` against `previous` by entry id.
///
/// Entries without an id are new and get one assigned. Entries whose id is
/// stored are updated, stored ids missing from `next` are deleted. An id that
/// does not belong to `previous` is rejected.
pub fn plan_lpk_changes(previous: &[LpkEntry], next: &[LpkEntry]) -> Result<LpkPlan> {
    let known: HashSet<&str> = previous.iter().filter_map(|e| e.id.as_deref()).collect();
    let mut kept = HashSet::new();
    let mut plan = LpkPlan::default();

    for entry in next {
        match entry.id.as_deref() {
            Some(id) if known.contains(id) => {
                if !kept.insert(id) {
                    return Err(Error::BadRequest(format!("duplicate LPK entry id: {id}")));
                }
                plan.updates.push(entry.clone());
            }
            Some(id) => {
                return Err(Error::BadRequest(format!("unknown LPK entry id: {id}")));
            }
            None => plan.inserts.push(LpkEntry {
                id: Some(Uuid::new_v4().to_string()),
                ..entry.clone()
            }),
        }
    }

    plan.deletes = previous
        .iter()
        .filter_map(|e| e.id.as_deref())
        .filter(|id| !kept.contains(id))
        .map(str::to_string)
        .collect();

    Ok(plan)
}
