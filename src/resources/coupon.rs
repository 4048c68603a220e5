use super::{Mutation, ResourceKind, ResourceSpec};

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Coupon];

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Coupon,
    collection_path: "api/v1/coupons",
    item_path: "api/v1/coupons",
    envelope_key: "coupons",
    record_key: "coupon",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: None,
};
