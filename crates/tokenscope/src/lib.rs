//! # tokenscope
//!
//! OAuth 2.0 token introspection (RFC 7662) response handling for resource
//! servers and OIDC relying parties.
//!
//! This crate provides:
//! - A queryable wrapper over the introspection response claims map
//! - Token validity derived from `exp`, `nbf`, and `active`, with injectable
//!   evaluation instants for deterministic testing
//! - Scope list parsing and case-insensitive membership checks
//! - A padding-tolerant Base64URL codec for JWT segment handling
//!
//! ## Overview
//!
//! Fetching the introspection response is the caller's job; this crate takes
//! the raw JSON (or an already parsed claims map), validates its shape once,
//! and derives everything else on demand. Predicates default to `false` when
//! information is missing, so an incomplete response reads as "not active"
//! instead of erroring.
//!
//! ## Modules
//!
//! - [`base64url`] - RFC 4648 URL-safe Base64 codec
//! - [`introspection`] - Introspection response wrapper and validity predicates

pub mod base64url;
pub mod introspection;

pub use introspection::{Claims, InvalidResponse, IntrospectionResponse, RawResponse};
