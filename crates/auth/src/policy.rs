//! Authorization policy engine
//!
//! A pure decision function over (principal, action, resource owner).
//! Role grants live in a static table built once at process start and
//! consulted read-only; ownership constraints are applied on top for
//! job mutations. Rules are evaluated in priority order, first match
//! wins, and anything unmatched is denied.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::principal::{Principal, Role};
use jobdesk_common::{Error, Result};

/// Every action the policy engine can rule on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListJobsAdminView,
    ListJobsOwn,
    ListJobsPublic,
    CreateJob,
    UpdateJob,
    DeleteJob,
    SearchJobs,
    ApplyToJob,
    ListOwnApplications,
    ListEmployerApplications,
    ListAllApplications,
}

impl Action {
    /// Human-readable action name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ListJobsAdminView => "list jobs (admin view)",
            Action::ListJobsOwn => "list own jobs",
            Action::ListJobsPublic => "list jobs",
            Action::CreateJob => "create job",
            Action::UpdateJob => "update job",
            Action::DeleteJob => "delete job",
            Action::SearchJobs => "search jobs",
            Action::ApplyToJob => "apply to job",
            Action::ListOwnApplications => "list own applications",
            Action::ListEmployerApplications => "list employer applications",
            Action::ListAllApplications => "list all applications",
        }
    }
}

/// Outcome of a policy decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

lazy_static! {
    /// Fixed role -> permitted-actions table, the process-wide
    /// authorization configuration. Loaded once, read-only afterwards.
    static ref ROLE_GRANTS: HashMap<Role, HashSet<Action>> = {
        use Action::*;

        let mut grants = HashMap::new();

        grants.insert(
            Role::Admin,
            HashSet::from([
                ListJobsAdminView,
                ListJobsOwn,
                ListJobsPublic,
                CreateJob,
                UpdateJob,
                DeleteJob,
                SearchJobs,
                ApplyToJob,
                ListOwnApplications,
                ListEmployerApplications,
                ListAllApplications,
            ]),
        );

        grants.insert(
            Role::Employer,
            HashSet::from([
                ListJobsOwn,
                ListJobsPublic,
                CreateJob,
                UpdateJob,
                DeleteJob,
                SearchJobs,
                ApplyToJob,
                ListOwnApplications,
                ListEmployerApplications,
            ]),
        );

        grants.insert(
            Role::User,
            HashSet::from([ListJobsPublic, SearchJobs, ApplyToJob, ListOwnApplications]),
        );

        grants
    };
}

/// True when any of the principal's roles grants the action.
fn granted_by_role(roles: &HashSet<Role>, action: Action) -> bool {
    roles
        .iter()
        .any(|role| ROLE_GRANTS.get(role).is_some_and(|set| set.contains(&action)))
}

/// Decide whether `principal` may perform `action`.
///
/// `resource_owner` is the owning user id of the targeted resource,
/// where one exists (job mutations). Rules in priority order:
///
/// 1. admin -> Allow, unconditionally
/// 2. job mutations -> employer grant, owner-only for update/delete
/// 3. employer-scoped and admin-scoped listings -> role grant
/// 4. apply / own applications -> any authenticated principal
/// 5. public listing and search -> any authenticated principal
/// 6. anything unmatched -> Deny
pub fn decide(principal: &Principal, action: Action, resource_owner: Option<Uuid>) -> Decision {
    // Rule 1: admin is allowed everything
    if principal.has_role(Role::Admin) {
        return Decision::Allow;
    }

    match action {
        // Rules 2-3: mutating an existing job requires the employer
        // grant and ownership of the resource
        Action::UpdateJob | Action::DeleteJob => {
            if granted_by_role(&principal.roles, action)
                && resource_owner == Some(principal.id)
            {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }

        // Rule 2: creating a job has no prior owner; the employer grant decides
        Action::CreateJob => {
            if granted_by_role(&principal.roles, action) {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }

        // Rules 4-5: role-gated listings (result filtering is the
        // caller's responsibility, see the application store)
        Action::ListEmployerApplications
        | Action::ListAllApplications
        | Action::ListJobsOwn
        | Action::ListJobsAdminView => {
            if granted_by_role(&principal.roles, action) {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }

        // Rule 6: open to any authenticated principal, not role-gated
        Action::ApplyToJob | Action::ListOwnApplications => Decision::Allow,

        // Rules 7-8: public listing and search are open
        Action::ListJobsPublic | Action::SearchJobs => Decision::Allow,
    }
}

/// `decide` adapted to the workspace error taxonomy: Deny becomes a
/// 403-mapping `Error::Authorization`.
pub fn authorize(principal: &Principal, action: Action, resource_owner: Option<Uuid>) -> Result<()> {
    match decide(principal, action, resource_owner) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(Error::Authorization(format!(
            "Not allowed to {}",
            action.as_str()
        ))),
    }
}
