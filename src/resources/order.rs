use super::{Mutation, ResourceKind, ResourceSpec, StatusMutation};

// Order changes move payment state
const INVALIDATES: &[ResourceKind] = &[ResourceKind::Order, ResourceKind::Payment];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Order,
    collection_path: "api/v1/order/",
    item_path: "api/v1/order",
    envelope_key: "orders",
    record_key: "order",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: Some(StatusMutation {
        path: "api/v1/order/update-status",
        mutation: Mutation::status(INVALIDATES),
    }),
};
