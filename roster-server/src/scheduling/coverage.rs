//! Role coverage: are the per-role minimums of a staffing met
//!
//! Insufficient coverage is a result, not an error.

use std::collections::{BTreeMap, HashMap, HashSet};

use shared::models::{CoverageReport, JobRole, MemberJobRole, RoleCoverage, WorkItemRequiredRole};

/// Evaluate `assigned_member_ids` against `requirements`
///
/// Requirements for the same role across several work items add up.
/// A member holding several required roles counts toward each of them;
/// a member listed twice counts once. A requirement on a deactivated role
/// stays in the report and nobody covers it. Requirements on roles missing
/// from `roles` (foreign) are ignored.
pub fn evaluate_coverage(
    requirements: &[WorkItemRequiredRole],
    roles: &[JobRole],
    links: &[MemberJobRole],
    assigned_member_ids: &[i64],
) -> CoverageReport {
    let roles_by_id: HashMap<i64, &JobRole> = roles.iter().map(|r| (r.id, r)).collect();

    let mut required: BTreeMap<i64, i32> = BTreeMap::new();
    for req in requirements.iter().filter(|r| roles_by_id.contains_key(&r.job_role_id)) {
        *required.entry(req.job_role_id).or_default() += req.min_count;
    }

    let assigned: HashSet<i64> = assigned_member_ids.iter().copied().collect();
    let mut role_counts: HashMap<i64, i32> = HashMap::new();
    for link in links {
        let role_active = roles_by_id.get(&link.job_role_id).is_some_and(|r| r.is_active);
        if role_active
            && assigned.contains(&link.member_id)
            && required.contains_key(&link.job_role_id)
        {
            *role_counts.entry(link.job_role_id).or_default() += 1;
        }
    }

    let role_coverage: Vec<RoleCoverage> = required
        .into_iter()
        .filter_map(|(role_id, required_count)| {
            let role = roles_by_id.get(&role_id)?;
            let current_count = role_counts.get(&role_id).copied().unwrap_or(0);
            Some(RoleCoverage {
                role_id,
                role_name: role.name.clone(),
                role_code: role.code.clone(),
                required_count,
                current_count,
                is_sufficient: current_count >= required_count,
            })
        })
        .collect();

    let insufficient_roles: Vec<RoleCoverage> = role_coverage
        .iter()
        .filter(|c| !c.is_sufficient)
        .cloned()
        .collect();

    CoverageReport {
        is_valid: insufficient_roles.is_empty(),
        message: insufficient_roles
            .iter()
            .map(RoleCoverage::shortfall_label)
            .collect::<Vec<_>>()
            .join(", "),
        role_coverage,
        insufficient_roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARISTA: i64 = 10;
    const CASHIER: i64 = 11;

    fn roles() -> Vec<JobRole> {
        vec![
            JobRole {
                id: BARISTA,
                store_id: 1,
                code: "barista".into(),
                name: "Barista".into(),
                is_active: true,
            },
            JobRole {
                id: CASHIER,
                store_id: 1,
                code: "cashier".into(),
                name: "Cashier".into(),
                is_active: true,
            },
        ]
    }

    fn req(work_item_id: i64, job_role_id: i64, min_count: i32) -> WorkItemRequiredRole {
        WorkItemRequiredRole {
            work_item_id,
            job_role_id,
            min_count,
        }
    }

    fn link(member_id: i64, job_role_id: i64) -> MemberJobRole {
        MemberJobRole {
            member_id,
            job_role_id,
        }
    }

    #[test]
    fn test_min_count_boundary() {
        let links = [link(1, BARISTA), link(2, BARISTA)];
        let reqs = [req(500, BARISTA, 2)];

        let report = evaluate_coverage(&reqs, &roles(), &links, &[1, 2]);
        assert!(report.is_valid);
        assert!(report.role_coverage[0].is_sufficient);
        assert_eq!(report.role_coverage[0].current_count, 2);
        assert!(report.message.is_empty());

        let report = evaluate_coverage(&reqs, &roles(), &links, &[1]);
        assert!(!report.is_valid);
        assert_eq!(report.insufficient_roles.len(), 1);
        assert_eq!(report.message, "Barista: 1/2");
    }

    #[test]
    fn test_no_requirements_is_valid() {
        let report = evaluate_coverage(&[], &roles(), &[link(1, BARISTA)], &[1]);
        assert!(report.is_valid);
        assert!(report.role_coverage.is_empty());
    }

    #[test]
    fn test_multi_role_member_counts_for_each() {
        let links = [link(1, BARISTA), link(1, CASHIER)];
        let reqs = [req(500, BARISTA, 1), req(500, CASHIER, 1)];
        let report = evaluate_coverage(&reqs, &roles(), &links, &[1, 1]);
        assert!(report.is_valid);
        assert!(report.role_coverage.iter().all(|c| c.current_count == 1));
    }

    #[test]
    fn test_requirements_add_up_across_items() {
        let links = [link(1, BARISTA), link(2, BARISTA), link(3, CASHIER)];
        let reqs = [req(500, BARISTA, 1), req(501, BARISTA, 2), req(501, CASHIER, 2)];
        let report = evaluate_coverage(&reqs, &roles(), &links, &[1, 2, 3]);

        assert!(!report.is_valid);
        assert_eq!(report.role_coverage[0].required_count, 3);
        assert_eq!(report.message, "Barista: 2/3, Cashier: 1/2");
    }

    #[test]
    fn test_deactivated_role_is_reported_unmet() {
        let mut roles = roles();
        roles[0].is_active = false;
        let links = [link(1, BARISTA)];
        let report = evaluate_coverage(&[req(500, BARISTA, 1)], &roles, &links, &[1]);

        assert!(!report.is_valid);
        assert_eq!(report.role_coverage.len(), 1);
        assert_eq!(report.role_coverage[0].current_count, 0);
        assert_eq!(report.message, "Barista: 0/1");
    }

    #[test]
    fn test_unknown_roles_are_ignored() {
        let reqs = [req(500, 99, 5)];
        let report = evaluate_coverage(&reqs, &roles(), &[], &[]);
        assert!(report.is_valid);
        assert!(report.role_coverage.is_empty());
    }
}
