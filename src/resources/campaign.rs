use super::{Mutation, ResourceKind, ResourceSpec};

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Campaign];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Campaign,
    collection_path: "api/v1/campaigns",
    item_path: "api/v1/campaigns",
    envelope_key: "campaigns",
    record_key: "campaign",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
