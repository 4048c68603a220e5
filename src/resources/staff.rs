use super::{Mutation, ResourceKind, ResourceSpec};

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Staff];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Staff,
    collection_path: "api/v1/user/staff",
    item_path: "api/v1/user/staff",
    envelope_key: "staff",
    record_key: "staff",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
