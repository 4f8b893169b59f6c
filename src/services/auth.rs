//! Authentication service.
//!
//! Register/login with salted password hashing and JWT issuance. Tokens
//! carry the user id as subject; middleware re-resolves the user on every
//! request so disabled accounts lose access immediately.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::db::{self, CreateUser, DbPool};
use crate::models::{new_id, User, UserRole};
use crate::{Error, Result};

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(db: DbPool, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            db,
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Register a new account and issue a token for it.
    ///
    /// Email must be unused. The very first account becomes the admin;
    /// everyone after that is a member.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthSession> {
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation("A valid email is required".to_string()));
        }
        if password.len() < 8 {
            return Err(Error::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if display_name.is_empty() {
            return Err(Error::Validation("Display name is required".to_string()));
        }

        if db::email_exists(&self.db, email).await? {
            return Err(Error::AlreadyExists(format!(
                "User with email {} already exists",
                email
            )));
        }

        let role = if db::count_users(&self.db).await? == 0 {
            UserRole::Admin
        } else {
            UserRole::Member
        };

        let user = db::create_user(
            &self.db,
            CreateUser {
                id: new_id(),
                email: email.to_string(),
                password_hash: hash_password(password),
                display_name: display_name.to_string(),
                role,
            },
        )
        .await?;

        let token = self.issue_token(&user)?;
        Ok(AuthSession { token, user })
    }

    /// Verify credentials and issue a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let user = db::get_user_by_email(&self.db, email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !user.enabled || !verify_password(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok(AuthSession { token, user })
    }

    /// Sign a token for the given user.
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_ttl_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and validate a token, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Error::TokenExpired,
            _ => Error::InvalidToken,
        })
    }
}

/// Salted sha256 password hash, stored as `v1$<salt>$<digest>` in hex.
fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("v1${}${}", hex::encode(salt), digest(&salt, password))
}

/// Constant-format verification against a stored `v1$salt$digest` hash.
fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("v1"), Some(salt_hex), Some(expected)) => match hex::decode(salt_hex) {
            Ok(salt) => digest(&salt, password) == expected,
            Err(_) => false,
        },
        _ => false,
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
