use super::{Mutation, ResourceKind, ResourceSpec};

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Review];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Review,
    collection_path: "api/v1/reviews",
    item_path: "api/v1/reviews",
    envelope_key: "reviews",
    record_key: "review",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
