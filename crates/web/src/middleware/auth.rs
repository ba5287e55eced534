//! Authentication extractors and the role gate.
//!
//! Every role-restricted route declares its requirement through one of the
//! extractors below instead of checking the session by hand. The failure
//! mode is uniform across the application: GET page views redirect to the
//! login page, mutating requests get a plain `401 Unauthorized`.

use axum::{
    extract::FromRequestParts,
    http::{Method, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use tiffin_core::Role;

use crate::models::{CurrentUser, session_keys};

/// Rejection when a gated route is hit without the required session role.
#[derive(Debug, PartialEq, Eq)]
pub enum RoleRejection {
    /// Redirect to the login page (page views).
    RedirectToLogin,
    /// Unauthorized response (mutating requests).
    Unauthorized,
}

impl IntoResponse for RoleRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Pick the rejection for a request based on its method.
fn rejection_for(method: &Method) -> RoleRejection {
    if *method == Method::GET || *method == Method::HEAD {
        RoleRejection::RedirectToLogin
    } else {
        RoleRejection::Unauthorized
    }
}

/// Read the current user out of the request's session, if logged in.
async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Extractor that requires any authenticated session, regardless of role.
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = RoleRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .await
            .map(Self)
            .ok_or_else(|| rejection_for(&parts.method))
    }
}

/// Defines one role-specific extractor over the shared session lookup.
macro_rules! require_role {
    ($name:ident, $role:expr, $doc:literal) => {
        #[doc = $doc]
        pub struct $name(pub CurrentUser);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = RoleRejection;

            async fn from_request_parts(
                parts: &mut Parts,
                _state: &S,
            ) -> Result<Self, Self::Rejection> {
                match session_user(parts).await {
                    Some(user) if user.role == $role => Ok(Self(user)),
                    _ => Err(rejection_for(&parts.method)),
                }
            }
        }
    };
}

require_role!(
    RequireCustomer,
    Role::Customer,
    "Extractor that requires a session with the `customer` role."
);
require_role!(
    RequireOwner,
    Role::RestaurantOwner,
    "Extractor that requires a session with the `restaurant_owner` role."
);
require_role!(
    RequireDriver,
    Role::DeliveryPerson,
    "Extractor that requires a session with the `delivery_person` role."
);

/// Extractor that optionally gets the current user.
///
/// Unlike the `Require*` extractors, this never rejects the request.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await))
    }
}

/// Helper to set the current user in the session after login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to destroy the session on logout.
///
/// Flushes the whole session record rather than just removing the user
/// key, so the token cannot be reused.
///
/// # Errors
///
/// Returns an error if the session store cannot be reached.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
