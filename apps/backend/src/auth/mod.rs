//! Access-token issuance and verification.

pub mod claims;
pub mod codec;
pub mod error;
pub mod jwt;
pub mod principal;

pub use claims::{Claims, PrincipalId, PRINCIPAL_CLAIM};
pub use codec::{sign, sign_at, verify, verify_at, Header, ALGORITHM};
pub use error::{SignError, TokenError};
pub use jwt::{mint_access_token, verify_access_token};
pub use principal::Principal;
