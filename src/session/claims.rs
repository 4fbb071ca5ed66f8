//! Payload-only JWT decoding.
//!
//! The backend signs its tokens with a key the client never sees; the client
//! only needs the identity claims inside. Signature validation is therefore
//! disabled and the server stays the sole verifier (a tampered token just
//! gets rejected with a 401 on the next request).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::error::{SessionError, SessionResult};

/// Claims carried by a LexiMon staff token. The backend emits .NET identity
/// claim URIs; short names are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(default, alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier")]
    pub id: Option<String>,
    #[serde(default, alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress")]
    pub email: Option<String>,
    #[serde(default, alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl AdminClaims {
    pub fn expired(&self) -> bool {
        match self.exp {
            Some(exp) => exp < Utc::now().timestamp(),
            None => false,
        }
    }
}

/// The signed-in staff member, as read from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    email: String,
    role: String,
}

impl User {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl TryFrom<AdminClaims> for User {
    type Error = SessionError;

    fn try_from(claims: AdminClaims) -> SessionResult<Self> {
        Ok(Self {
            id: claims.id.ok_or(SessionError::MissingClaim("id"))?,
            email: claims.email.ok_or(SessionError::MissingClaim("email"))?,
            role: claims.role.unwrap_or_default(),
        })
    }
}

pub fn decode_claims(token: &str) -> SessionResult<AdminClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data =
        jsonwebtoken::decode::<AdminClaims>(token, &DecodingKey::from_secret(b""), &validation)?;
    Ok(data.claims)
}
