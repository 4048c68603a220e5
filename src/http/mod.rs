//! The single choke point for outbound calls to the backend API.

pub mod client;
pub mod request;

pub use client::{ClientBuildError, HttpClient, TENANT_HEADER};
pub use request::{Access, RequestBody, RequestDescriptor, Verb, DEFAULT_CONTENT_TYPE};
