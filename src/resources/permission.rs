use super::{Mutation, ResourceKind, ResourceSpec};

// Roles carry their permission sets
const INVALIDATES: &[ResourceKind] = &[ResourceKind::Permission, ResourceKind::Role];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Permission,
    collection_path: "api/v1/user/permission",
    item_path: "api/v1/user/permission",
    envelope_key: "permissions",
    record_key: "permission",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
