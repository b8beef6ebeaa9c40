//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the initial migration.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_USER: &str = "user";

/// Returns `true` if the role carries blog-owner privileges.
pub fn is_owner(role: &str) -> bool {
    role == ROLE_OWNER
}
