//! Registration, login, logout and session inspection.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tiffin_core::{Address, Role};
use tower_sessions::Session;

use crate::{
    error::{AppError, Result},
    middleware::{OptionalUser, clear_current_user, set_current_user},
    models::{CurrentUser, NewUser},
    services::AuthService,
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    error: Option<String>,
    logged_in: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    error: Option<String>,
    success: Option<String>,
    logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    name: String,
    email: String,
    phone: String,
    password: String,
    role: String,
    street: String,
    city: String,
    state: String,
    pincode: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    name: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    registered: Option<String>,
    error: Option<String>,
}

pub async fn register_page() -> RegisterTemplate {
    RegisterTemplate {
        error: None,
        logged_in: false,
    }
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let role = Role::parse(&form.role)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth = AuthService::new(state.pool());
    auth.register(
        &NewUser {
            name: form.name,
            email: form.email,
            phone: form.phone,
            role,
            address: Address::new(form.street, form.city, form.state, form.pincode),
        },
        &form.password,
    )
    .await?;

    Ok(Redirect::to("/login?registered=1"))
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> LoginTemplate {
    let success = query
        .registered
        .map(|_| "Registration successful, please log in".to_string());
    LoginTemplate {
        error: query.error,
        success,
        logged_in: false,
    }
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&form.name, &form.password).await?;

    set_current_user(
        &session,
        &CurrentUser {
            id: user.id,
            role: user.role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
    Ok(Redirect::to(user.role.home_path()))
}

pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    Ok(Redirect::to("/login"))
}

pub async fn check_session(OptionalUser(user): OptionalUser) -> String {
    match user {
        Some(current) => format!("Logged in as {} with role {}", current.id, current.role),
        None => "No user logged in".to_string(),
    }
}
