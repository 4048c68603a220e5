use super::{Mutation, ResourceKind, ResourceSpec};

// Staff listings embed their role, so role changes stale them too
const INVALIDATES: &[ResourceKind] = &[ResourceKind::Role, ResourceKind::Staff];

/// Roles are managed through the superadmin surface
pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Role,
    collection_path: "api/v1/user/role/superadmin",
    item_path: "api/v1/user/role/superadmin",
    envelope_key: "roles",
    record_key: "role",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
