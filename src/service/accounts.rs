use tokio::task;
use tracing::info;

use crate::db::Storage;
use crate::error::AppError;
use crate::service::password::{hash_password, verify_against_dummy, verify_password};
use crate::types::forms::{LoginForm, RegisterForm, normalize_email};
use crate::types::{Identity, UserId};

/// Validate the form, hash the password and store the new user.
pub async fn register(store: &Storage, form: RegisterForm) -> Result<UserId, AppError> {
    let new_user = form.validate()?;
    let password = new_user.password.clone();
    let password_hash = blocking(move || hash_password(&password)).await?;
    let id = store.create_user(&new_user, &password_hash).await?;
    info!(user_id = id, role = %new_user.role, "user registered");
    Ok(id)
}

/// Resolve the credentials to an identity. Every failure is `InvalidCredentials`,
/// whichever field was wrong.
pub async fn login(store: &Storage, form: LoginForm) -> Result<Identity, AppError> {
    let email = normalize_email(&form.email);
    let Some(user) = store.find_user_by_email(&email).await? else {
        let password = form.password;
        blocking(move || {
            verify_against_dummy(&password);
            Ok(())
        })
        .await?;
        return Err(AppError::InvalidCredentials);
    };

    let password = form.password;
    let stored = user.password.clone();
    if !blocking(move || verify_password(&password, &stored)).await? {
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, role = %user.role, "user logged in");
    Ok(Identity {
        id: user.id,
        role: user.role,
    })
}

/// Run CPU-bound hashing on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::PasswordHash(format!("hashing task failed: {e}")))?
}
