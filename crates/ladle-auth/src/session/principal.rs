//! The value attached to a request after access verification.

use uuid::Uuid;

/// An authenticated caller.
///
/// Deliberately narrow: downstream handlers get the account id and nothing
/// else. The full account record never crosses the trust boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    /// The authenticated account's id.
    pub account_id: Uuid,
}
