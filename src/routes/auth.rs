//! Registration, login, logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::AppResult,
    services::auth_service::{self, RegisterOutcome},
    session::{self, PageContext},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

pub async fn register_form(session: Session) -> AppResult<RegisterTemplate> {
    Ok(RegisterTemplate {
        ctx: session::page_context(&session).await?,
    })
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Redirect> {
    match auth_service::register(&state.pool, &form.username, &form.password).await? {
        RegisterOutcome::UsernameTaken => {
            session::flash(&session, "Username already exists").await?;
            Ok(Redirect::to("/register"))
        }
        RegisterOutcome::Registered => {
            session::flash(&session, "Registered. Please login.").await?;
            Ok(Redirect::to("/login"))
        }
    }
}

pub async fn login_form(session: Session) -> AppResult<LoginTemplate> {
    Ok(LoginTemplate {
        ctx: session::page_context(&session).await?,
    })
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Redirect> {
    match auth_service::login(&state.pool, &form.username, &form.password).await? {
        Some(user) => {
            session::sign_in(&session, &user).await?;
            session::flash(&session, "Logged in").await?;
            Ok(Redirect::to("/"))
        }
        None => {
            session::flash(&session, "Invalid credentials").await?;
            Ok(Redirect::to("/login"))
        }
    }
}

/// Clears the whole session, cart included.
pub async fn logout(session: Session) -> AppResult<Redirect> {
    session.clear().await;
    session::flash(&session, "Logged out").await?;
    Ok(Redirect::to("/"))
}
