//! fastadmin HTTP module
//!
//! Request/response types for the backend's `/api/v1` surface and, behind the
//! `client` feature, typed clients that separate public endpoints from the
//! ones that require a bearer token.

pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{
    AuthenticatedAdminClient, PublicAdminClient, TypedClientBuilder,
    error::{ClientError, ErrorDetail, ErrorKind},
};
