//! Caller identity.
//!
//! Authentication lives outside this crate: an external identity provider
//! hands every request an authenticated user id and a staff flag, and the
//! storefront trusts that input. [`Caller`] is threaded explicitly into every
//! operation that needs it instead of being looked up from ambient request
//! state.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::id::entity_id;

entity_id!(UserId, "user");

/// The authenticated caller of a storefront operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user: UserId,
    pub is_staff: bool,
}

impl Caller {
    /// A regular (non-staff) shopper.
    pub fn customer(user: impl Into<UserId>) -> Self {
        Self {
            user: user.into(),
            is_staff: false,
        }
    }

    /// A staff member with privileged access.
    pub fn staff(user: impl Into<UserId>) -> Self {
        Self {
            user: user.into(),
            is_staff: true,
        }
    }

    /// Fails with [`StoreError::Forbidden`] unless the caller is staff.
    pub fn require_staff(&self) -> Result<(), StoreError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(StoreError::Forbidden)
        }
    }

    /// Owner-or-staff capability check for records carrying an owner field.
    pub fn can_view(&self, owner: UserId) -> bool {
        self.is_staff || self.user == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_can_view_everything() {
        let staff = Caller::staff(1);
        assert!(staff.can_view(UserId(2)));
        assert!(staff.require_staff().is_ok());
    }

    #[test]
    fn customer_can_view_only_own_records() {
        let caller = Caller::customer(1);
        assert!(caller.can_view(UserId(1)));
        assert!(!caller.can_view(UserId(2)));
        assert_eq!(caller.require_staff(), Err(StoreError::Forbidden));
    }
}
