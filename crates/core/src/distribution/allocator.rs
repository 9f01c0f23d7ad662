//! Per-state round-robin allocation of sites to field auditors.

use std::collections::HashMap;

use super::coverage::{normalize_state, CoverageIndex};
use super::types::{Allocation, AssignmentStatus, CoverageGap, SiteAssignment, SiteRecord};
use crate::types::DbId;

/// Assign every site to a field auditor covering its state.
///
/// Sites are processed in input order. Each normalized state keeps its own
/// cursor for the whole pass, so the Nth site of state S (counting from 0)
/// goes to `auditors(S)[N % len]` regardless of how sites of different
/// states interleave.
///
/// A site whose state has no covering auditor produces no assignment and is
/// reported in [`Allocation::gaps`] instead, carrying the state as uploaded.
/// The pass never fails.
///
/// The output depends only on the inputs, except for the fallback code of a
/// site with a blank code (`CODE-<unix millis>-<position + 1>`).
pub fn allocate_sites(
    sites: &[SiteRecord],
    coverage: &CoverageIndex,
    campaign_id: DbId,
) -> Allocation {
    let mut cursors: HashMap<String, usize> = HashMap::new();
    let mut fallback_stamp: Option<i64> = None;
    let mut allocation = Allocation::default();

    for (position, site) in sites.iter().enumerate() {
        let site_code = if site.code.trim().is_empty() {
            let stamp =
                *fallback_stamp.get_or_insert_with(|| chrono::Utc::now().timestamp_millis());
            format!("CODE-{stamp}-{}", position + 1)
        } else {
            site.code.clone()
        };

        let state = normalize_state(&site.state);
        let auditors = coverage.auditors_for(&state);
        if auditors.is_empty() {
            allocation.gaps.push(CoverageGap {
                position,
                site_code,
                state: site.state.clone(),
            });
            continue;
        }

        let cursor = cursors.entry(state).or_insert(0);
        let field_auditor_id = auditors[*cursor % auditors.len()];
        *cursor += 1;

        allocation.assignments.push(SiteAssignment {
            campaign_id,
            site_code,
            field_auditor_id,
            status: AssignmentStatus::Pending,
        });
    }

    allocation
}
