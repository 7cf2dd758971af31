//! User registration and authentication endpoints

use axum::{
    Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonOrForm,
    jwt::TokenType,
    mail::OutgoingMail,
    models::{
        LoginRequest, LoginResponse, MessageResponse, NewUser, RegisterForm,
        ResetPasswordRequest, UserResponse,
    },
    password::{hash_password, verify_password},
    repositories::StorageError,
    state::AppState,
    validation::{validate_email, validate_password, validate_required},
};

const BAD_CREDENTIALS: &str = "Bad email or password";
const BAD_RESET_TOKEN: &str = "Invalid or expired reset token";

fn internal(context: &str, err: anyhow::Error) -> ApiError {
    ApiError::Internal(format!("{}: {}", context, err))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let Form(form) = form?;

    validate_required("first_name", &form.first_name).map_err(ApiError::Validation)?;
    validate_required("last_name", &form.last_name).map_err(ApiError::Validation)?;
    validate_email(&form.email).map_err(ApiError::Validation)?;
    validate_password(&form.password).map_err(ApiError::Validation)?;

    let password_hash =
        hash_password(&form.password).map_err(|e| internal("Failed to hash password", e))?;

    let new_user = NewUser {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        password_hash,
    };

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| match e {
            StorageError::AlreadyExists(_) => {
                ApiError::Conflict("That email already exists.".to_string())
            }
            other => other.into(),
        })?;

    info!("Registered user {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully.",
            "user": UserResponse::from(&user),
        })),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(credentials): JsonOrForm<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    info!("Login attempt for user: {}", credentials.email);

    let user = state
        .user_repository
        .find_by_email(&credentials.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let password_matches = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| internal("Failed to verify password", e))?;

    if !password_matches {
        warn!("Wrong password for user: {}", user.email);
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let access_token = state
        .jwt_service
        .generate_access_token(&user.email)
        .map_err(|e| internal("Failed to generate access token", e))?;

    Ok(Json(LoginResponse {
        message: "Login succeeded!".to_string(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    }))
}

/// Mail a password reset token to a registered address
pub async fn retrieve_password(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(email) = path?;

    let user = state
        .user_repository
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("That email doesn't exist".to_string()))?;

    let reset_token = state
        .jwt_service
        .generate_reset_token(&user.email)
        .map_err(|e| internal("Failed to generate reset token", e))?;

    let minutes = state.jwt_service.reset_token_expiry() / 60;
    state
        .mailer
        .send(OutgoingMail {
            to: user.email.clone(),
            subject: "Your planetary API password reset".to_string(),
            body: format!(
                "Hello {},\n\n\
                 Use the token below with POST /reset_password to choose a new password.\n\
                 It expires in {} minutes.\n\n\
                 Reset token: {}\n",
                user.first_name, minutes, reset_token
            ),
        })
        .await?;

    info!("Password reset mail sent to {}", user.email);

    Ok(Json(MessageResponse::new(format!(
        "Password reset instructions sent to {}",
        user.email
    ))))
}

/// Set a new password using a mailed reset token
pub async fn reset_password(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let claims = state
        .jwt_service
        .validate_token(&request.token, TokenType::PasswordReset)
        .map_err(|e| {
            warn!("Rejected reset token: {}", e);
            ApiError::Unauthorized(BAD_RESET_TOKEN.to_string())
        })?;

    validate_password(&request.password).map_err(ApiError::Validation)?;

    let password_hash =
        hash_password(&request.password).map_err(|e| internal("Failed to hash password", e))?;

    let updated = state
        .user_repository
        .update_password(&claims.sub, &password_hash)
        .await?;

    if !updated {
        return Err(ApiError::Unauthorized(BAD_RESET_TOKEN.to_string()));
    }

    info!("Password updated for {}", claims.sub);

    Ok(Json(MessageResponse::new("Password updated")))
}
