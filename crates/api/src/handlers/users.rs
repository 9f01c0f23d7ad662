//! Handlers for `/users`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::roles::Role;
use postertrack_core::users::{validate_new_account, NewAccount, GENERATED_PASSWORD_LEN};
use postertrack_db::models::user::{CreateUser, UserResponse};
use postertrack_db::repositories::UserRepo;
use postertrack_events::Notification;
use serde::Deserialize;

use crate::auth::password::{generate_password, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::notify;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoleFilter {
    pub role: Option<Role>,
}

/// POST /api/v1/users
///
/// Create an account with a generated password, emailed to the new user.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewAccount>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let account = validate_new_account(input, admin.role)?;

    let password = generate_password(GENERATED_PASSWORD_LEN);
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: account.email,
            password_hash,
            role: account.role,
            firstname: account.firstname,
            lastname: account.lastname,
            name: account.name,
            phone: account.phone,
            address: account.address,
            states_covered: account.states_covered.unwrap_or_default(),
            additional_emails: account.additional_emails.unwrap_or_default(),
            industry: account.industry,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        role = %account.role,
        created_by = admin.user_id,
        "Account created",
    );

    notify::dispatch(
        &state,
        vec![user.email.clone()],
        Notification::account_credentials(
            &user.display_name(),
            &user.email,
            &password,
            account.role,
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/users?role=FIELD_AUDITOR
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<RoleFilter>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, filter.role).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/field-auditors
///
/// The roster campaign distribution works from, in creation order.
pub async fn list_field_auditors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, Some(Role::FieldAuditor)).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
