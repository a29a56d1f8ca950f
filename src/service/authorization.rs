//! Ownership checks shared by every owner-scoped endpoint.
//!
//! Handlers never compare ids themselves: they ask [`Storage::authorize`]
//! (which loads the owner and defers to [`authorize`]) before mutating or
//! revealing a resource.
//!
//! [`Storage::authorize`]: crate::db::Storage::authorize

use crate::types::{ApplicationId, Identity, InternshipId, Role, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Internship(InternshipId),
    Application(ApplicationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Internship,
    Application,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Internship(_) => ResourceKind::Internship,
            Resource::Application(_) => ResourceKind::Application,
        }
    }
}

/// A stored resource reduced to what ownership depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owned {
    pub kind: ResourceKind,
    pub owner_id: UserId,
}

/// Whether `actor` may act on `owned`.
pub fn authorize(actor: &Identity, owned: &Owned) -> bool {
    let role_may_own = match (owned.kind, actor.role) {
        (ResourceKind::Internship, Role::Teacher) => true,
        (ResourceKind::Internship, Role::Student) => false,
        (ResourceKind::Application, Role::Teacher | Role::Student) => true,
    };
    role_may_own && actor.id == owned.owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEACHER: Identity = Identity {
        id: 1,
        role: Role::Teacher,
    };
    const STUDENT: Identity = Identity {
        id: 2,
        role: Role::Student,
    };

    #[test]
    fn owner_teacher_may_manage_internship() {
        let owned = Owned {
            kind: ResourceKind::Internship,
            owner_id: 1,
        };
        assert!(authorize(&TEACHER, &owned));
    }

    #[test]
    fn other_teacher_may_not_manage_internship() {
        let owned = Owned {
            kind: ResourceKind::Internship,
            owner_id: 9,
        };
        assert!(!authorize(&TEACHER, &owned));
    }

    #[test]
    fn student_never_owns_internship_even_with_matching_id() {
        let owned = Owned {
            kind: ResourceKind::Internship,
            owner_id: 2,
        };
        assert!(!authorize(&STUDENT, &owned));
    }

    #[test]
    fn application_belongs_to_its_applicant_only() {
        let mine = Owned {
            kind: ResourceKind::Application,
            owner_id: 2,
        };
        let theirs = Owned {
            kind: ResourceKind::Application,
            owner_id: 3,
        };
        assert!(authorize(&STUDENT, &mine));
        assert!(!authorize(&STUDENT, &theirs));
    }
}
