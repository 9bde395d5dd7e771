use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::{eyre::eyre, Result};
use ulid::Ulid;

use super::models::AuthUser;
use super::Db;

impl Db {
    pub async fn create_user(&self, username: &str, password: &str, is_admin: bool) -> Result<i64> {
        let password_hash = hash_password(password)?;

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password_hash, is_admin) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new user created: id={user_id}, username={username}");
        Ok(user_id)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, username, is_admin FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<AuthUser>> {
        let user =
            sqlx::query_as::<_, AuthUser>("SELECT id, username, is_admin FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        let stored_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        match stored_hash {
            Some(hash) => Ok(verify_password(password, &hash)),
            None => Ok(false),
        }
    }

    pub async fn create_user_session(&self, user_id: i64) -> Result<String> {
        let session = Ulid::new().to_string();

        sqlx::query("INSERT INTO user_sessions (id, user_id) VALUES (?, ?)")
            .bind(&session)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("new user session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn get_user_by_session(&self, session_id: &str) -> Result<Option<AuthUser>> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT users.id, users.username, users.is_admin FROM users \
             JOIN user_sessions ON user_sessions.user_id = users.id \
             WHERE user_sessions.id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM user_sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create the admin account on first boot. Does nothing if a user with
    /// that name already exists.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<()> {
        if self.find_user_by_username(username).await?.is_some() {
            return Ok(());
        }
        self.create_user(username, password, true).await?;
        tracing::info!("seeded admin user '{username}'");
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("could not hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
