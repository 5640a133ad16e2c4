//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! profile, password change).

use std::borrow::Cow;

use axum::extract::State;
use coursehub_core::accounts::{
    full_name_in_bounds, non_blank, MSG_ACCOUNT_INACTIVE, MSG_EMAIL_IN_USE, MSG_EMAIL_TAKEN,
    MSG_INVALID_CREDENTIALS, MSG_OLD_PASSWORD_INCORRECT, MSG_USERNAME_TAKEN, MSG_USER_NOT_FOUND,
    PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
use coursehub_core::error::CoreError;
use coursehub_db::models::user::{CreateUser, UpdateProfile, User, UserResponse};
use coursehub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, validate_token, TOKEN_TYPE_REFRESH,
};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const MSG_INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const MSG_FULL_NAME_LENGTH: &str = "Full name must be 2 to 100 characters";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = USERNAME_MIN_LEN,
        max = USERNAME_MAX_LEN,
        message = "Username must be 3 to 50 characters"
    ))]
    pub username: String,
    #[validate(length(min = PASSWORD_MIN_LEN, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Checked and stored without surrounding whitespace.
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
    pub email: Option<String>,
}

/// Request body for `POST /auth/login`. Both fields are required; no length rules.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PUT /auth/profile`. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(
        min = PASSWORD_MIN_LEN,
        message = "New password must be at least 6 characters"
    ))]
    pub new_password: String,
}

/// Length rule for full names, applied to the trimmed value that gets stored.
fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name_in_bounds(full_name) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(Cow::Borrowed(MSG_FULL_NAME_LENGTH)))
    }
}

/// Login payload: token pair plus the user.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Refresh payload: a new access token; the refresh token is echoed back.
#[derive(Debug, Serialize)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a `student` account. Username and (non-blank) email must be unused.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    if UserRepo::username_exists(&state.pool, &input.username).await? {
        return Err(CoreError::Conflict(MSG_USERNAME_TAKEN.into()).into());
    }

    let email = non_blank(input.email.as_deref()).map(str::to_string);
    if let Some(email) = &email {
        if UserRepo::email_exists(&state.pool, email, None).await? {
            return Err(CoreError::Conflict(MSG_EMAIL_TAKEN.into()).into());
        }
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Registration failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email,
            password_hash,
            full_name: input.full_name.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Student registered");

    Ok(ApiResponse::ok(
        UserResponse::from(&user),
        "Registration successful",
    ))
}

/// POST /api/auth/login
///
/// Authenticate with username + password. Credentials are checked before the
/// account status, so an inactive account is only revealed to its owner.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginData>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| CoreError::InvalidCredentials(MSG_INVALID_CREDENTIALS.into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(CoreError::InvalidCredentials(MSG_INVALID_CREDENTIALS.into()).into());
    }

    if !user.is_active() {
        tracing::info!(user_id = user.id, status = %user.status, "Login rejected: inactive account");
        return Err(CoreError::Forbidden(MSG_ACCOUNT_INACTIVE.into()).into());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let (access_token, refresh_token) = issue_token_pair(&state, &user)?;
    let message = format!("Welcome back, {}!", user.full_name);

    Ok(ApiResponse::ok(
        LoginData {
            access_token,
            refresh_token,
            expires_in: state.config.jwt.access_expires_in(),
            user: UserResponse::from(&user),
        },
        message,
    ))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for a new access token. The account must
/// still exist and be active.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<ApiResponse<TokenData>> {
    let claims = validate_token(&input.refresh_token, TOKEN_TYPE_REFRESH, &state.config.jwt)
        .map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            CoreError::InvalidCredentials(MSG_INVALID_REFRESH_TOKEN.into())
        })?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .filter(User::is_active)
        .ok_or_else(|| CoreError::InvalidCredentials(MSG_INVALID_REFRESH_TOKEN.into()))?;

    let access_token =
        generate_access_token(user.id, &user.username, &user.role, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(ApiResponse::ok(
        TokenData {
            access_token,
            refresh_token: input.refresh_token,
            expires_in: state.config.jwt.access_expires_in(),
        },
        "Token refreshed",
    ))
}

/// POST /api/auth/logout
///
/// Tokens are stateless, so there is nothing to revoke; clients discard them.
pub async fn logout(auth_user: AuthUser) -> AppResult<ApiResponse<()>> {
    tracing::info!(user_id = auth_user.user_id, "User logged out");
    Ok(ApiResponse::message("Logged out"))
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = load_user(&state, &auth_user).await?;
    Ok(ApiResponse::ok(UserResponse::from(&user), "Profile loaded"))
}

/// PUT /api/auth/profile
///
/// Partial update. Blank values are ignored; a new email must not belong to
/// another user.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let email = non_blank(input.email.as_deref()).map(str::to_string);
    if let Some(email) = &email {
        if UserRepo::email_exists(&state.pool, email, Some(auth_user.user_id)).await? {
            return Err(CoreError::Conflict(MSG_EMAIL_IN_USE.into()).into());
        }
    }

    let update = UpdateProfile {
        full_name: non_blank(input.full_name.as_deref()).map(str::to_string),
        email,
        avatar_url: non_blank(input.avatar_url.as_deref()).map(str::to_string),
    };

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_USER_NOT_FOUND.into()))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(ApiResponse::ok(UserResponse::from(&user), "Profile updated"))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    let user = load_user(&state, &auth_user).await?;

    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password change failed: {e}")))?;
    if !old_valid {
        return Err(CoreError::InvalidCredentials(MSG_OLD_PASSWORD_INCORRECT.into()).into());
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password change failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(ApiResponse::message("Password changed"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the full user row behind a token.
async fn load_user(state: &AppState, auth_user: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_USER_NOT_FOUND.into()).into())
}

fn issue_token_pair(state: &AppState, user: &User) -> AppResult<(String, String)> {
    let jwt = &state.config.jwt;
    let access = generate_access_token(user.id, &user.username, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = generate_refresh_token(user.id, &user.username, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok((access, refresh))
}
