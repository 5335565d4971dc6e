//! Account flows
//!
//! Request bodies in, response bodies out: decode, validate, then either
//! derive/verify a credential or check a bearer token, then encode.
//! Password hashing is CPU-bound, so it runs on tokio's blocking pool behind
//! a semaphore sized from configuration.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Semaphore;

use crate::accounts::store::{CredentialRecord, CredentialStore};
use crate::config::CoreConfig;
use crate::error::{
    AuthError, CoreError, InternalError, StoreError, ValidationError, client_message,
    error_to_status, handle_error,
};
use crate::random::SecureRandom;
use crate::session::{Clock, SessionIssuer, TokenStore, extract_bearer_token};
use crate::validate::{PasswordRule, validate_account_id, validate_email, validate_password};
use crate::vault::CredentialVault;
use crate::wire::{CREATED, OK, decode, error_body, ok_object, read_body};

const REGISTRATION_CONFLICT: &str = "Registration failed. Email may already be in use.";

/// Status and body for a transport layer to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Registration, login and bearer authorization over injected stores
#[derive(Clone)]
pub struct AuthService {
    vault: CredentialVault,
    issuer: SessionIssuer,
    credentials: Arc<dyn CredentialStore>,
    password_rule: PasswordRule,
    max_body_bytes: usize,
    kdf_permits: Arc<Semaphore>,
}

impl AuthService {
    pub fn new(
        config: &CoreConfig,
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn SecureRandom>,
    ) -> Self {
        Self {
            vault: CredentialVault::new(random.clone()),
            issuer: SessionIssuer::new(tokens, clock, random),
            credentials,
            password_rule: config.auth.password_rule,
            max_body_bytes: config.wire.max_body_bytes,
            kdf_permits: Arc::new(Semaphore::new(config.auth.kdf_concurrency)),
        }
    }

    pub fn issuer(&self) -> &SessionIssuer {
        &self.issuer
    }

    /// Create an account from `{"id","email","password"}`
    pub async fn register(&self, body: &[u8]) -> Result<Reply, CoreError> {
        let fields = decode(&read_body(body, self.max_body_bytes)?);

        let account_id = validate_account_id(fields.get("id"))?.into_value();
        let email = validate_email(fields.get("email"))?.into_value();
        let password = validate_password(fields.get("password"), self.password_rule)?.into_value();

        let vault = self.vault.clone();
        let derived = self.run_kdf(move || vault.derive(&password)).await??;
        let (password_hash_hex, salt_hex) = derived.into_parts();

        let record = CredentialRecord {
            account_id: account_id.clone(),
            email,
            password_hash_hex,
            salt_hex,
        };
        match self.credentials.insert(record) {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                warn!("Registration conflict for {}", account_id);
                return Err(CoreError::Conflict(REGISTRATION_CONFLICT.into()));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Registered account {}", account_id);
        Ok(Reply::new(
            CREATED,
            ok_object().field("userId", account_id).finish(),
        ))
    }

    /// Exchange `{"email","password"}` for a bearer token
    pub async fn login(&self, body: &[u8]) -> Result<Reply, CoreError> {
        let fields = decode(&read_body(body, self.max_body_bytes)?);

        let (Some(email), Some(password)) = (fields.get("email"), fields.get("password")) else {
            return Err(ValidationError::MissingCredentials.into());
        };

        let Some(record) = self.credentials.find_by_email(email)? else {
            warn!("Login rejected: no account for the given email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let password = password.to_string();
        let salt_hex = record.salt_hex.clone();
        let hash_hex = record.password_hash_hex.clone();
        let matches = self
            .run_kdf(move || CredentialVault::verify(&password, &salt_hex, &hash_hex))
            .await?;
        if !matches {
            warn!("Login rejected for {}", record.account_id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issuer.issue(&record.account_id)?;
        info!("Login succeeded for {}", record.account_id);
        Ok(Reply::new(
            OK,
            ok_object()
                .field("token", token)
                .field("userId", record.account_id)
                .finish(),
        ))
    }

    /// Resolve an `Authorization` header to the calling account id
    pub fn authorize(&self, authorization: Option<&str>) -> Result<String, CoreError> {
        self.issuer.authenticate(extract_bearer_token(authorization))
    }

    /// Run a KDF job on the blocking pool once a permit is free.
    ///
    /// The permit moves into the job, so it is held until the derivation
    /// finishes even if the calling future is dropped first.
    async fn run_kdf<F, T>(&self, job: F) -> Result<T, InternalError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .kdf_permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| InternalError::WorkerFailed(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| InternalError::WorkerFailed(e.to_string()))
    }
}

/// Turn a flow outcome into the reply to send, logging failures
pub fn respond(result: Result<Reply, CoreError>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            handle_error(&e);
            Reply::new(error_to_status(&e), error_body(&client_message(&e)))
        }
    }
}
