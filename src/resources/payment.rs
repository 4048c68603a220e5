use super::{Mutation, ResourceKind, ResourceSpec};

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Payment];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Payment,
    collection_path: "api/v1/payments/",
    item_path: "api/v1/payments",
    envelope_key: "payments",
    record_key: "payment",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
