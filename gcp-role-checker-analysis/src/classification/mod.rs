//! Service-account role classification
//!
//! Partitions a policy's bindings by role, keeps only `serviceAccount:`
//! members, and splits each role's holders into permanent (unconditional)
//! and conditional grants. Roles appear in first-encounter order and
//! holders in binding-encounter order; nothing is deduplicated, so a
//! denormalized source policy is reflected as-is.

mod lookup;

pub use lookup::roles_for_account;

use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::types::{Condition, IamPolicy, PrincipalRef, RoleBinding};

/// A principal granted a role under a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalGrant {
    pub principal: PrincipalRef,
    pub condition: Condition,
}

/// Service-account holders of a single role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoleHolders {
    pub permanent: Vec<PrincipalRef>,
    pub conditional: Vec<ConditionalGrant>,
}

impl RoleHolders {
    pub fn is_empty(&self) -> bool {
        self.permanent.is_empty() && self.conditional.is_empty()
    }
}

/// Role → holders mapping produced by one classification query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Classification {
    roles: IndexMap<String, RoleHolders>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Number of roles with at least one service-account holder.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn get(&self, role: &str) -> Option<&RoleHolders> {
        self.roles.get(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoleHolders)> {
        self.roles.iter().map(|(role, holders)| (role.as_str(), holders))
    }

    /// True when any role in this classification is held unconditionally.
    pub fn has_permanent_grants(&self) -> bool {
        self.roles.values().any(|holders| !holders.permanent.is_empty())
    }

    /// Append the given members of `binding` under its role. Callers pass only
    /// members that already passed their principal filter.
    pub(crate) fn record<'a, I>(&mut self, binding: &RoleBinding, members: I)
    where
        I: IntoIterator<Item = &'a PrincipalRef>,
    {
        let mut members = members.into_iter().peekable();
        if members.peek().is_none() {
            return;
        }
        let holders = self.roles.entry(binding.role.clone()).or_default();
        match &binding.condition {
            None => holders.permanent.extend(members.cloned()),
            Some(condition) => holders
                .conditional
                .extend(members.map(|principal| ConditionalGrant {
                    principal: principal.clone(),
                    condition: condition.clone(),
                })),
        }
    }
}

/// Classify the service-account holders of `roles_of_interest`.
///
/// Bindings whose role is not of interest, or whose members include no
/// service account, are skipped entirely. An empty role set yields an empty
/// classification.
pub fn classify(policy: &IamPolicy, roles_of_interest: &BTreeSet<String>) -> Classification {
    let mut classification = Classification::default();
    if roles_of_interest.is_empty() {
        return classification;
    }

    for binding in &policy.bindings {
        if !roles_of_interest.contains(&binding.role) {
            continue;
        }
        classification.record(
            binding,
            binding.members.iter().filter(|m| m.is_service_account()),
        );
    }

    debug!(
        "Classified {} of {} roles of interest",
        classification.len(),
        roles_of_interest.len()
    );
    classification
}
