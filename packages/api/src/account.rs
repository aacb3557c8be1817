//! # Account server functions
//!
//! The authentication surface the session provider and the login, register and profile pages
//! call: session read, sign-in, sign-up, sign-out, identity and profile updates.
//!
//! Sign-up writes the account, its profile and the role-specific row in one transaction, so a
//! profile exists for every identity from the first request on.

use dioxus::prelude::*;

use crate::models::{Identity, Profile, ProfileUpdate, Role, SignUpForm, SignedIn};

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// Identity bound to the current session, if any.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_session() -> Result<Option<Identity>, ServerFnError> {
    server::get_session(&session).await.map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_session() -> Result<Option<Identity>, ServerFnError> {
    Ok(None)
}

/// Profile of the signed-in user. `None` when signed out or when no profile row exists.
#[cfg(feature = "server")]
#[get("/api/auth/profile", session: tower_sessions::Session)]
pub async fn get_my_profile() -> Result<Option<Profile>, ServerFnError> {
    server::get_my_profile(&session).await.map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/profile")]
pub async fn get_my_profile() -> Result<Option<Profile>, ServerFnError> {
    Ok(None)
}

/// Sign in with email and password. When `portal` is given, accounts of the other role are
/// refused and no session is opened.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(
    email: String,
    password: String,
    portal: Option<Role>,
) -> Result<SignedIn, ServerFnError> {
    server::sign_in(&session, &email, &password, portal)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(
    email: String,
    password: String,
    portal: Option<Role>,
) -> Result<SignedIn, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/sign-up", session: tower_sessions::Session)]
pub async fn sign_up(form: SignUpForm) -> Result<SignedIn, ServerFnError> {
    server::sign_up(&session, form).await.map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-up")]
pub async fn sign_up(form: SignUpForm) -> Result<SignedIn, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// End the current session.
#[cfg(feature = "server")]
#[post("/api/auth/sign-out", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::info!("session closed");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-out")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// Change the email and/or the password of the signed-in account.
#[cfg(feature = "server")]
#[post("/api/auth/identity", session: tower_sessions::Session)]
pub async fn update_identity(
    email: Option<String>,
    password: Option<String>,
) -> Result<Identity, ServerFnError> {
    server::update_identity(&session, email, password)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/identity")]
pub async fn update_identity(
    email: Option<String>,
    password: Option<String>,
) -> Result<Identity, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update the signed-in user's own profile. The role cannot be changed.
#[cfg(feature = "server")]
#[post("/api/auth/profile", session: tower_sessions::Session)]
pub async fn update_profile(update: ProfileUpdate) -> Result<Profile, ServerFnError> {
    server::update_profile(&session, update)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/profile")]
pub async fn update_profile(update: ProfileUpdate) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use tower_sessions::Session;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{
        Account, Identity, Profile, ProfileUpdate, Role, SignUpForm, SignedIn,
    };
    use crate::validate;

    pub async fn get_session(session: &Session) -> Result<Option<Identity>, ApiError> {
        let Some(user_id) = auth::current_user_id(session).await? else {
            return Ok(None);
        };
        let pool = get_pool().await?;
        let account: Option<Account> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(account.map(|a| a.to_identity()))
    }

    pub async fn get_my_profile(session: &Session) -> Result<Option<Profile>, ApiError> {
        let Some(user_id) = auth::current_user_id(session).await? else {
            return Ok(None);
        };
        let pool = get_pool().await?;
        auth::load_profile(pool, user_id).await
    }

    pub async fn sign_in(
        session: &Session,
        email: &str,
        password: &str,
        portal: Option<Role>,
    ) -> Result<SignedIn, ApiError> {
        let invalid = || ApiError::Forbidden("Invalid email or password".to_string());
        let email = validate::normalize_email(email).map_err(|_| invalid())?;
        let pool = get_pool().await?;

        let account: Option<Account> =
            sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
                .bind(&email)
                .fetch_optional(pool)
                .await?;
        let Some(account) = account else {
            return Err(invalid());
        };
        if !auth::verify_password(password, &account.password_hash)? {
            return Err(invalid());
        }

        let profile = auth::load_profile(pool, account.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile"))?;

        if let Some(portal) = portal {
            if portal != profile.role {
                tracing::warn!(
                    user = %account.id,
                    portal = %portal,
                    role = %profile.role,
                    "sign-in refused on the wrong portal"
                );
                return Err(ApiError::Forbidden(format!(
                    "Access denied: this account is registered as {} {}. Use the {} area.",
                    article(profile.role),
                    profile.role.label(),
                    profile.role.label()
                )));
            }
        }

        auth::open_session(session, account.id).await?;
        tracing::info!(user = %account.id, role = %profile.role, "signed in");

        Ok(SignedIn {
            identity: account.to_identity(),
            role: profile.role,
        })
    }

    fn article(role: Role) -> &'static str {
        match role {
            Role::Client => "an",
            Role::Trainer => "a",
        }
    }

    pub async fn sign_up(session: &Session, form: SignUpForm) -> Result<SignedIn, ApiError> {
        validate::validate_sign_up(&form).map_err(ApiError::invalid)?;
        let email = validate::normalize_email(&form.email).map_err(ApiError::invalid)?;
        let pool = get_pool().await?;

        let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM accounts WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = auth::hash_password(&form.password)?;

        let mut tx = pool.begin().await?;

        let account: Account = sqlx::query_as(
            "INSERT INTO accounts (email, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO user_profiles (id, email, user_type, first_name, last_name, phone)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(account.id)
        .bind(&email)
        .bind(form.role.as_str())
        .bind(form.first_name.trim())
        .bind(form.last_name.trim())
        .bind(form.phone.trim())
        .execute(&mut *tx)
        .await?;

        match form.role {
            Role::Client => {
                sqlx::query(
                    "INSERT INTO client_profiles (id, fitness_goal) VALUES ($1, $2)
                     ON CONFLICT (id) DO UPDATE SET fitness_goal = EXCLUDED.fitness_goal",
                )
                .bind(account.id)
                .bind(form.fitness_goal.map(|g| g.as_str()))
                .execute(&mut *tx)
                .await?;
            }
            Role::Trainer => {
                sqlx::query(
                    "INSERT INTO trainer_profiles (id, experience_years) VALUES ($1, 0)
                     ON CONFLICT (id) DO NOTHING",
                )
                .bind(account.id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        auth::open_session(session, account.id).await?;
        tracing::info!(user = %account.id, role = %form.role, "account created");

        Ok(SignedIn {
            identity: account.to_identity(),
            role: form.role,
        })
    }

    pub async fn update_identity(
        session: &Session,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Identity, ApiError> {
        let user_id = auth::require_user_id(session).await?;
        let pool = get_pool().await?;

        let email = email
            .filter(|e| !e.trim().is_empty())
            .map(|e| validate::normalize_email(&e))
            .transpose()
            .map_err(ApiError::invalid)?;
        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                validate::validate_password(&password).map_err(ApiError::invalid)?;
                Some(auth::hash_password(&password)?)
            }
            None => None,
        };

        let mut tx = pool.begin().await?;

        if let Some(ref email) = email {
            let taken: Option<(i32,)> =
                sqlx::query_as("SELECT 1 FROM accounts WHERE email = $1 AND id <> $2")
                    .bind(email)
                    .bind(user_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if taken.is_some() {
                return Err(ApiError::Conflict(
                    "This email is already in use".to_string(),
                ));
            }
            sqlx::query("UPDATE accounts SET email = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE user_profiles SET email = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(ref hash) = password_hash {
            sqlx::query(
                "UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(user_id)
            .bind(hash)
            .execute(&mut *tx)
            .await?;
        }

        let account: Account = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(account.to_identity())
    }

    pub async fn update_profile(
        session: &Session,
        update: ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        let user_id = auth::require_user_id(session).await?;
        if update.first_name.trim().is_empty() || update.last_name.trim().is_empty() {
            return Err(ApiError::invalid("First and last name are required"));
        }
        let pool = get_pool().await?;

        let profile: Option<Profile> = sqlx::query_as(
            "UPDATE user_profiles SET
                first_name = $2,
                last_name = $3,
                phone = COALESCE($4, phone),
                bio = COALESCE($5, bio),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(user_id)
        .bind(update.first_name.trim())
        .bind(update.last_name.trim())
        .bind(update.phone.as_deref().map(str::trim))
        .bind(update.bio.as_deref().map(str::trim))
        .fetch_optional(pool)
        .await?;

        profile.ok_or(ApiError::NotFound("Profile"))
    }
}
