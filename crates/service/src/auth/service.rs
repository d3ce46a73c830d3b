use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Claims, LoginInput, SignupInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Session token configuration. The signing secret is supplied out-of-band.
#[derive(Clone)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub ttl: chrono::Duration,
}

impl TokenConfig {
    pub fn new(jwt_secret: impl Into<String>, ttl_days: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), ttl: chrono::Duration::days(ttl_days) }
    }
}

/// Auth business service independent of web framework. `R` may be a trait
/// object so HTTP state can hold one service over any repository.
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: TokenConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: TokenConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user with a hashed password and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, TokenConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::SignupInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, TokenConfig::new("secret", 7));
    /// let input = SignupInput { full_name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into() };
    /// let token = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        let user = self
            .repo
            .create_user(&input.full_name, &input.email, &hash)
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_signed_up");
        self.issue_token(user.id)
    }

    /// Authenticate a user and issue a session token. Unknown email and
    /// wrong password are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed =
            PasswordHash::new(&user.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed)
            .is_err()
        {
            debug!(user_id = %user.id, "password_mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "user_logged_in");
        self.issue_token(user.id)
    }

    /// Decode and verify a session token, returning the embedded subject id.
    /// Any structural, signature, or expiry failure collapses into
    /// `InvalidSession`. No side effects.
    pub fn verify_session(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidSession)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidSession)
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_token_with_ttl(user_id, self.cfg.ttl)
    }

    /// TTL-parameterized issuance; also used by tests to mint expired tokens.
    pub fn issue_token_with_ttl(
        &self,
        user_id: Uuid,
        ttl: chrono::Duration,
    ) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + ttl).timestamp() as usize;
        let claims = Claims { sub: user_id.to_string(), exp };
        encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(Arc::new(MockAuthRepository::default()), TokenConfig::new("test-secret", 7))
    }

    fn signup_input(email: &str) -> SignupInput {
        SignupInput { full_name: "Tester".into(), email: email.into(), password: "hunter22".into() }
    }

    #[tokio::test]
    async fn signup_then_login_roundtrip() {
        let svc = svc();
        let token = svc.signup(signup_input("a@example.com")).await.unwrap();
        let uid = svc.verify_session(&token).unwrap();

        let token2 = svc
            .login(LoginInput { email: "a@example.com".into(), password: "hunter22".into() })
            .await
            .unwrap();
        assert_eq!(svc.verify_session(&token2).unwrap(), uid);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let svc = svc();
        svc.signup(signup_input("dup@example.com")).await.unwrap();
        let err = svc.signup(signup_input("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = svc();
        svc.signup(signup_input("known@example.com")).await.unwrap();

        let unknown = svc
            .login(LoginInput { email: "ghost@example.com".into(), password: "whatever".into() })
            .await
            .unwrap_err();
        let wrong_pw = svc
            .login(LoginInput { email: "known@example.com".into(), password: "nope".into() })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong_pw, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong_pw.to_string());
    }

    #[tokio::test]
    async fn expired_token_rejected() {
        let svc = svc();
        let token = svc.signup(signup_input("exp@example.com")).await.unwrap();
        let uid = svc.verify_session(&token).unwrap();

        // Well past the default 60s decode leeway.
        let expired = svc.issue_token_with_ttl(uid, chrono::Duration::hours(-2)).unwrap();
        assert!(matches!(svc.verify_session(&expired).unwrap_err(), AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn garbage_token_rejected() {
        let svc = svc();
        assert!(matches!(svc.verify_session("not-a-jwt").unwrap_err(), AuthError::InvalidSession));

        // Valid shape, wrong secret.
        let other = AuthService::new(
            Arc::new(MockAuthRepository::default()),
            TokenConfig::new("other-secret", 7),
        );
        let token = other.issue_token(Uuid::new_v4()).unwrap();
        assert!(matches!(svc.verify_session(&token).unwrap_err(), AuthError::InvalidSession));
    }
}
