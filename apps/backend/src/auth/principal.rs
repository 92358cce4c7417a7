use super::claims::{Claims, PrincipalId};

/// Identity established by the bearer gate and stored in request extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: PrincipalId,
    pub claims: Claims,
}

impl Principal {
    /// `None` when the verified claims name no usable principal.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        let id = claims.principal()?;
        Some(Self { id, claims })
    }
}
