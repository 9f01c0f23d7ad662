//! Handlers for `/auth`: first super admin signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::error::CoreError;
use postertrack_core::roles::Role;
use postertrack_core::users::normalize_email;
use postertrack_db::models::user::{CreateUser, UserResponse};
use postertrack_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/v1/auth/super-admin/signup
///
/// Creates the one super admin account. Rejected once it exists.
pub async fn super_admin_signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    if UserRepo::super_admin_exists(&state.pool).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A Super Admin already exists.".into(),
        )));
    }

    let email = normalize_email(&input.email)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent signup loses on the partial unique index and gets a 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            role: Role::SuperAdmin,
            firstname: input.firstname,
            lastname: input.lastname,
            name: None,
            phone: input.phone,
            address: None,
            states_covered: Vec::new(),
            additional_emails: Vec::new(),
            industry: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Super admin created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = input.email.trim().to_lowercase();
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let role = user.role()?;
    let token = generate_access_token(user.id, role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in(),
        user: UserResponse::from(user),
    }))
}
