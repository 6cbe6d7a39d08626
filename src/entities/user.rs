//! Application user entity

use uuid::Uuid;

use crate::erp_entity;

erp_entity!(
    /// A backend user, optionally assigned to one branch
    User, "user", "users", {
        username: String,
        full_name: String,
        email: Option<String>,
        role: String,
        branch_id: Option<Uuid>,
        is_active: bool,
    }
);
