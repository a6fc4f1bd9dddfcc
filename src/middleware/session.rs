//! Session layer configuration: signed cookie, in-memory store.

use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{Key, SameSite, time::Duration},
    service::SignedCookie,
};

use crate::config::AppConfig;

pub const SESSION_COOKIE_NAME: &str = "storefront_session";

/// Session expiry (7 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Build the session layer. The signing key is derived from the
/// configured secret, so cookies from one deployment are invalid on
/// another unless the secret matches.
pub fn create_session_layer(config: &AppConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();
    let key = Key::derive_from(config.session_secret.as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(false)
        .with_path("/")
        .with_signed(key)
}
