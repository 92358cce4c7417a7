//! Claims carried in the payload segment of an access token.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application claim naming the authenticated principal.
pub const PRINCIPAL_CLAIM: &str = "principalId";

/// Reserved claim keys owned by the codec. Must match the serde renames on [`Claims`].
pub(crate) const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Verified token payload: the two reserved timestamps plus whatever the
/// issuer put next to them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Issued-at (seconds since epoch)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Application-defined claims, e.g. [`PRINCIPAL_CLAIM`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The principal named by the token, if present and well-typed.
    pub fn principal(&self) -> Option<PrincipalId> {
        let value = self.extra.get(PRINCIPAL_CLAIM)?;
        PrincipalId::deserialize(value)
            .ok()
            .filter(|id| !id.is_blank())
    }
}

/// Identifier of an authenticated principal (a user id in practice).
///
/// Integer ids are kept as integers so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrincipalId {
    Int(i64),
    Str(String),
}

impl PrincipalId {
    fn is_blank(&self) -> bool {
        matches!(self, PrincipalId::Str(s) if s.trim().is_empty())
    }

    /// Claims map with this id under [`PRINCIPAL_CLAIM`], ready for signing.
    pub fn to_claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        let value = match self {
            PrincipalId::Int(id) => Value::from(*id),
            PrincipalId::Str(id) => Value::from(id.as_str()),
        };
        claims.insert(PRINCIPAL_CLAIM.to_string(), value);
        claims
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrincipalId::Int(id) => write!(f, "{id}"),
            PrincipalId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PrincipalId {
    fn from(id: i64) -> Self {
        PrincipalId::Int(id)
    }
}

impl From<String> for PrincipalId {
    fn from(id: String) -> Self {
        PrincipalId::Str(id)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        PrincipalId::Str(id.to_string())
    }
}
