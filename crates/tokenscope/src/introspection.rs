//! Token introspection response (RFC 7662)
//!
//! Wraps the payload an authorization server returns from its introspection
//! endpoint and answers the questions a resource server actually asks: whether
//! the token is active and inside its validity window, and which scopes it
//! carries.
//!
//! The claims map is kept open: claims this module has no dedicated handling
//! for (server extensions, `sub`, `aud`, and friends) stay in the map and are
//! reachable through [`IntrospectionResponse::claim`].
//!
//! No verification of the response's authenticity happens here; the caller is
//! expected to have obtained it over an authenticated channel.
//!
//! # Example
//!
//! ```ignore
//! use tokenscope::IntrospectionResponse;
//!
//! let response: IntrospectionResponse = body.parse()?;
//! if response.is_active() && response.has_scope("profile") {
//!     // serve the request
//! }
//! ```
//!
//! # References
//!
//! - [RFC 7662 - OAuth 2.0 Token Introspection](https://tools.ietf.org/html/rfc7662)

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use time::OffsetDateTime;

// =============================================================================
// Claims
// =============================================================================

/// Claims map carried by an introspection response.
///
/// Keys are RFC 7662 claim names (`active`, `scope`, `exp`, ...) plus any
/// server-specific extensions; values are arbitrary JSON.
pub type Claims = Map<String, Value>;

/// Raw introspection payload, before validation.
///
/// Authorization servers hand clients either JSON text or an already parsed
/// object. Both forms convert into this variant and are resolved once, in
/// [`IntrospectionResponse::set_response`], instead of being type-inspected
/// throughout the accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// JSON text, expected to parse to a top-level object.
    Text(String),
    /// An already structured claims map, stored as-is.
    Structured(Claims),
}

impl From<&str> for RawResponse {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawResponse {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Claims> for RawResponse {
    fn from(value: Claims) -> Self {
        Self::Structured(value)
    }
}

// =============================================================================
// Response Type
// =============================================================================

/// Token introspection response per RFC 7662.
///
/// Holds at most one claims map. Starts unset via [`new`](Self::new), or set
/// via [`parse`](Self::parse); [`set_response`](Self::set_response) replaces
/// the whole map atomically. There is no way back to the unset state.
///
/// The validity predicates are total: when claims are missing or a referenced
/// claim is absent or malformed, they degrade to `false` (or an empty list)
/// rather than erroring, so an incomplete response reads as "not active".
/// Each predicate comes in two forms: a wall-clock convenience and an `*_at`
/// variant taking the instant to evaluate against, for deterministic use.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IntrospectionResponse {
    claims: Option<Claims>,
}

impl IntrospectionResponse {
    /// Creates a response with no claims set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a response from a raw introspection payload.
    ///
    /// Acceptance rules are those of [`set_response`](Self::set_response).
    pub fn parse(input: impl Into<RawResponse>) -> Result<Self, InvalidResponse> {
        let mut response = Self::new();
        response.set_response(input)?;
        Ok(response)
    }

    /// Replaces the stored claims with a new payload.
    ///
    /// A structured map is stored directly. Text is stored iff it parses as
    /// JSON whose top-level value is an object; any other input (non-JSON
    /// text, a JSON array, scalar, or `null`) fails with [`InvalidResponse`]
    /// and leaves the current state untouched.
    pub fn set_response(&mut self, input: impl Into<RawResponse>) -> Result<(), InvalidResponse> {
        match input.into() {
            RawResponse::Structured(claims) => {
                self.claims = Some(claims);
                Ok(())
            }
            RawResponse::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(claims)) => {
                    self.claims = Some(claims);
                    Ok(())
                }
                _ => {
                    tracing::debug!(
                        len = text.len(),
                        "Introspection payload is not a JSON object"
                    );
                    Err(InvalidResponse)
                }
            },
        }
    }

    /// Returns the stored claims, if any.
    #[must_use]
    pub fn response(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Looks up a claim by name.
    ///
    /// Returns the raw value iff the claim is present and not JSON `null`.
    /// Presence is key-based: `0`, `false`, and `""` are values, not absence.
    /// This covers the optional claims without dedicated methods (`sub`,
    /// `aud`, `iss`, `jti`, `client_id`, `username`, `token_type`, `iat`).
    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims
            .as_ref()
            .and_then(|claims| claims.get(name))
            .filter(|value| !value.is_null())
    }

    /// Whether the token's expiry has passed, per the wall clock.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Whether the token's expiry has passed at `now`.
    ///
    /// False when no integer `exp` claim is present; a token without an
    /// expiry never expires by this check.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        match self.timestamp_claim("exp") {
            Some(exp) => now.unix_timestamp() >= exp,
            None => false,
        }
    }

    /// Whether the token is inside its validity window, per the wall clock.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(OffsetDateTime::now_utc())
    }

    /// Whether the token is inside its validity window at `now`.
    ///
    /// False when expired or when no claims are set. With an integer `nbf`
    /// claim the token becomes valid once `now` reaches it; without one there
    /// is no not-before constraint.
    #[must_use]
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        if self.is_expired_at(now) || self.claims.is_none() {
            return false;
        }
        match self.timestamp_claim("nbf") {
            Some(nbf) => now.unix_timestamp() >= nbf,
            None => true,
        }
    }

    /// Whether the server reports the token active and it is valid, per the
    /// wall clock.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active_at(OffsetDateTime::now_utc())
    }

    /// Whether the server reports the token active and it is valid at `now`.
    ///
    /// `active` must be the boolean `true`; truthy strings or numbers do not
    /// count.
    #[must_use]
    pub fn is_active_at(&self, now: OffsetDateTime) -> bool {
        self.claim("active") == Some(&Value::Bool(true)) && self.is_valid_at(now)
    }

    /// Returns the granted scopes, lower-cased, in response order.
    ///
    /// The `scope` claim is split on single space characters without cleanup,
    /// so consecutive spaces yield empty tokens and duplicates are kept.
    /// Empty when the claim is missing, the empty string, or not a string.
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        let Some(scope) = self.claim("scope").and_then(Value::as_str) else {
            return Vec::new();
        };
        if scope.is_empty() {
            return Vec::new();
        }
        scope.to_lowercase().split(' ').map(str::to_owned).collect()
    }

    /// Whether `scope` is among the granted scopes, case-insensitively.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().contains(&scope.to_lowercase())
    }

    fn timestamp_claim(&self, name: &str) -> Option<i64> {
        self.claim(name).and_then(Value::as_i64)
    }
}

impl From<Claims> for IntrospectionResponse {
    fn from(claims: Claims) -> Self {
        Self {
            claims: Some(claims),
        }
    }
}

impl FromStr for IntrospectionResponse {
    type Err = InvalidResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the stored claims as JSON text; the unset state renders as `null`.
impl fmt::Display for IntrospectionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.claims).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Input was neither a JSON-object string nor a structured claims map.
///
/// The only error this module produces; every read accessor is total and
/// degrades instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid introspection response")]
pub struct InvalidResponse;

// =============================================================================
// Tests
// =============================================================================
