//! Candidate pool: who may fill a (work item, date) slot
//!
//! Built once per request from freshly loaded rows, never cached.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::models::{Member, MemberJobRole, WorkItemRequiredRole};

/// Eligible members indexed by role, minus per-date exclusions
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    /// Active member ids in roster order
    roster: Vec<i64>,
    role_to_members: HashMap<i64, HashSet<i64>>,
    unavailable: HashSet<(i64, NaiveDate)>,
    booked: HashSet<(i64, NaiveDate)>,
    target_member: Option<i64>,
}

impl CandidatePool {
    /// `booked` are existing bookings, `unavailable` declared days off.
    /// With `target_member` set, no one else is ever a candidate.
    pub fn new(
        members: &[Member],
        links: &[MemberJobRole],
        unavailable: impl IntoIterator<Item = (i64, NaiveDate)>,
        booked: impl IntoIterator<Item = (i64, NaiveDate)>,
        target_member: Option<i64>,
    ) -> Self {
        let roster: Vec<i64> = members.iter().filter(|m| m.is_active).map(|m| m.id).collect();
        let known: HashSet<i64> = roster.iter().copied().collect();

        let mut role_to_members: HashMap<i64, HashSet<i64>> = HashMap::new();
        for link in links.iter().filter(|l| known.contains(&l.member_id)) {
            role_to_members
                .entry(link.job_role_id)
                .or_default()
                .insert(link.member_id);
        }

        Self {
            roster,
            role_to_members,
            unavailable: unavailable.into_iter().collect(),
            booked: booked.into_iter().collect(),
            target_member,
        }
    }

    /// Whether the member holds at least one of the required roles
    ///
    /// No requirement means anyone qualifies. Several requirements are a
    /// union: holding any one of them is enough.
    pub fn qualifies(&self, member_id: i64, required: &[WorkItemRequiredRole]) -> bool {
        required.is_empty()
            || required.iter().any(|req| {
                self.role_to_members
                    .get(&req.job_role_id)
                    .is_some_and(|members| members.contains(&member_id))
            })
    }

    pub fn is_excluded(&self, member_id: i64, date: NaiveDate) -> bool {
        self.unavailable.contains(&(member_id, date)) || self.booked.contains(&(member_id, date))
    }

    /// Candidates for one slot, in roster order
    #[cfg(test)]
    pub fn candidates(&self, required: &[WorkItemRequiredRole], date: NaiveDate) -> Vec<i64> {
        self.eligible(required, date).collect()
    }

    /// First candidate for one slot, if any
    pub fn first_candidate(&self, required: &[WorkItemRequiredRole], date: NaiveDate) -> Option<i64> {
        self.eligible(required, date).next()
    }

    /// Record a pick so the member is excluded for the rest of that day
    pub fn mark_booked(&mut self, member_id: i64, date: NaiveDate) {
        self.booked.insert((member_id, date));
    }

    fn eligible<'a>(
        &'a self,
        required: &'a [WorkItemRequiredRole],
        date: NaiveDate,
    ) -> impl Iterator<Item = i64> + 'a {
        self.roster
            .iter()
            .copied()
            .filter(move |id| self.target_member.is_none_or(|target| target == *id))
            .filter(move |id| self.qualifies(*id, required))
            .filter(move |id| !self.is_excluded(*id, date))
    }
}
