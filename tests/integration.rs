use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use crowdtruth_core::accounts::{AuthService, MemoryCredentialStore, respond};
use crowdtruth_core::config::CoreConfig;
use crowdtruth_core::error::{AuthError, CoreError, InternalError, StoreError};
use crowdtruth_core::random::{OsRandom, SecureRandom};
use crowdtruth_core::session::{Clock, MemoryTokenStore, SessionRecord, TOKEN_TTL_MS, TokenStore};
use crowdtruth_core::utils::setup_test_logging;
use crowdtruth_core::validate::PasswordRule;
use crowdtruth_core::wire::decode;

const REGISTER_ALICE: &[u8] =
    br#"{"id":"alice","email":"alice@example.com","password":"Sup3rSecret!"}"#;
const LOGIN_ALICE: &[u8] = br#"{"email":"alice@example.com","password":"Sup3rSecret!"}"#;

/// Clock the test moves by hand
struct SteppedClock(AtomicI64);

impl SteppedClock {
    fn at(now_ms: i64) -> Self {
        Self(AtomicI64::new(now_ms))
    }

    fn advance(&self, delta_ms: i64) {
        self.0.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// OS randomness that holds each fill for a while and records how many
/// fills were in flight at once. Registration draws its salt inside the
/// KDF job, so the peak is the peak number of concurrent derivations.
struct GaugedRandom {
    hold: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl GaugedRandom {
    fn new(hold: Duration) -> Self {
        Self {
            hold,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl SecureRandom for GaugedRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), InternalError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.hold);
        self.active.fetch_sub(1, Ordering::SeqCst);
        OsRandom.fill(dest)
    }
}

struct Harness {
    service: AuthService,
    clock: Arc<SteppedClock>,
    tokens: Arc<MemoryTokenStore>,
}

fn harness(toml: &str) -> Harness {
    harness_with_random(toml, Arc::new(OsRandom))
}

fn harness_with_random(toml: &str, random: Arc<dyn SecureRandom>) -> Harness {
    setup_test_logging();
    let config = CoreConfig::from_toml_str(toml).unwrap();
    let clock = Arc::new(SteppedClock::at(1_700_000_000_000));
    let tokens = Arc::new(MemoryTokenStore::new());
    let service = AuthService::new(
        &config,
        Arc::new(MemoryCredentialStore::new()),
        tokens.clone(),
        clock.clone(),
        random,
    );
    Harness {
        service,
        clock,
        tokens,
    }
}

fn opt_in_harness() -> Harness {
    harness("[auth]\npassword_rule = \"at_least_one_special\"")
}

#[tokio::test]
async fn test_register_login_authorize() {
    let h = opt_in_harness();

    let reply = respond(h.service.register(REGISTER_ALICE).await);
    assert_eq!(reply.status, 201);
    assert_eq!(reply.body, r#"{"ok":true,"userId":"alice"}"#);

    let reply = respond(h.service.login(LOGIN_ALICE).await);
    assert_eq!(reply.status, 200);
    let fields = decode(&reply.body);
    assert!(fields.flag("ok"));
    assert_eq!(fields.get("userId"), Some("alice"));
    let token = fields.get("token").unwrap().to_string();
    assert_eq!(h.tokens.len(), 1);

    let header = format!("Bearer {}", token);
    assert_eq!(h.service.authorize(Some(header.as_str())).unwrap(), "alice");

    h.clock.advance(TOKEN_TTL_MS + 1);
    assert_eq!(
        h.service.authorize(Some(header.as_str())).unwrap_err(),
        CoreError::Auth(AuthError::Expired)
    );
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let h = opt_in_harness();
    respond(h.service.register(REGISTER_ALICE).await);

    let reply = respond(
        h.service
            .login(br#"{"email":"alice@example.com","password":"Sup3rSecret?"}"#)
            .await,
    );
    assert_eq!(reply.status, 401);
    assert_eq!(reply.body, r#"{"ok":false,"error":"Invalid credentials"}"#);
    assert!(h.tokens.is_empty());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let h = opt_in_harness();
    assert_eq!(respond(h.service.register(REGISTER_ALICE).await).status, 201);

    let reply = respond(
        h.service
            .register(br#"{"id":"alice2","email":"alice@example.com","password":"An0ther!"}"#)
            .await,
    );
    assert_eq!(reply.status, 409);
    assert_eq!(
        reply.body,
        r#"{"ok":false,"error":"Registration failed. Email may already be in use."}"#
    );
}

#[tokio::test]
async fn test_default_config_keeps_literal_password_rule() {
    let h = harness("");
    let reply = respond(h.service.register(REGISTER_ALICE).await);
    assert_eq!(reply.status, 400);
    assert_eq!(
        reply.body,
        r#"{"ok":false,"error":"Invalid Password, Must Contain at least one Special Character(!?@#$%&)"}"#
    );
}

fn registration(n: usize) -> Vec<u8> {
    format!(r#"{{"id":"user{n}","email":"user{n}@example.com","password":"Sup3rSecret!"}}"#)
        .into_bytes()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_respect_kdf_bound() {
    let random = Arc::new(GaugedRandom::new(Duration::from_millis(100)));
    let h = harness_with_random(
        "[auth]\npassword_rule = \"at_least_one_special\"\nkdf_concurrency = 2",
        random.clone(),
    );

    let mut handles = Vec::new();
    for n in 0..6 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            respond(service.register(&registration(n)).await)
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().status, 201);
    }

    assert!(random.peak() >= 1);
    assert!(random.peak() <= 2, "peak {} exceeds bound 2", random.peak());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancelled_registration_keeps_its_kdf_permit() {
    let random = Arc::new(GaugedRandom::new(Duration::from_millis(400)));
    let h = harness_with_random(
        "[auth]\npassword_rule = \"at_least_one_special\"\nkdf_concurrency = 1",
        random.clone(),
    );

    let service = h.service.clone();
    let first = tokio::spawn(async move { service.register(&registration(1)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    first.abort();
    assert!(first.await.unwrap_err().is_cancelled());

    let reply = respond(h.service.register(&registration(2)).await);
    assert_eq!(reply.status, 201);
    assert_eq!(random.peak(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_logins_issue_distinct_tokens() {
    let h = harness("[auth]\npassword_rule = \"at_least_one_special\"\nkdf_concurrency = 1");
    assert_eq!(respond(h.service.register(REGISTER_ALICE).await).status, 201);

    let mut handles = Vec::new();
    for _ in 0..3 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move { service.login(LOGIN_ALICE).await }));
    }

    let mut tokens = Vec::new();
    for handle in handles {
        let reply = handle.await.unwrap().unwrap();
        tokens.push(decode(&reply.body).get("token").unwrap().to_string());
    }
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 3);
    assert_eq!(h.tokens.len(), 3);
}

struct DownTokenStore;

impl TokenStore for DownTokenStore {
    fn put(&self, _: &str, _: &str, _: i64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("timeout".into()))
    }

    fn get(&self, _: &str) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("timeout".into()))
    }
}

#[tokio::test]
async fn test_token_store_outage_is_a_server_error() {
    setup_test_logging();
    let mut config = CoreConfig::default();
    config.auth.password_rule = PasswordRule::AtLeastOneSpecial;
    let service = AuthService::new(
        &config,
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(DownTokenStore),
        Arc::new(SteppedClock::at(0)),
        Arc::new(OsRandom),
    );

    assert!(matches!(
        service.authorize(Some("Bearer abc")).unwrap_err(),
        CoreError::Internal(InternalError::Store(StoreError::Unavailable(_)))
    ));

    assert_eq!(respond(service.register(REGISTER_ALICE).await).status, 201);
    let reply = respond(service.login(LOGIN_ALICE).await);
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body, r#"{"ok":false,"error":"Server error"}"#);
}
