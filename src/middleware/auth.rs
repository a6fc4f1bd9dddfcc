//! Session-backed auth extractors.
//!
//! Authorization failures never surface as error pages: a missing
//! login redirects to `/login`, a non-admin hitting an admin route is
//! silently bounced to the home page, both with a flash notice.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::session::{self, keys};

/// The single privileged account. Admin access is a string comparison
/// against the session's username, not a role system.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
}

pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

pub struct HomeRedirect;

impl IntoResponse for HomeRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| LoginRedirect)?;

        let user_id = session.get::<Uuid>(keys::USER_ID).await.ok().flatten();
        let username = session.get::<String>(keys::USERNAME).await.ok().flatten();

        if let (Some(user_id), Some(username)) = (user_id, username) {
            return Ok(AuthUser { user_id, username });
        }

        let _ = session::flash(&session, "Please log in first").await;
        Err(LoginRedirect)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = HomeRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| HomeRedirect)?;

        let user_id = session.get::<Uuid>(keys::USER_ID).await.ok().flatten();
        let username = session.get::<String>(keys::USERNAME).await.ok().flatten();

        if let (Some(user_id), Some(username)) = (user_id, username) {
            if username == ADMIN_USERNAME {
                return Ok(AdminUser { user_id });
            }
        }

        let _ = session::flash(&session, "Access denied. Admins only.").await;
        Err(HomeRedirect)
    }
}
