use crate::db::models::User;
use crate::db::schema::SQLITE_INIT;
use crate::error::AppError;
use crate::service::authorization::{self, Owned, Resource};
use crate::types::forms::{NewUser, ProfileUpdate};
use crate::types::{Identity, UserId};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Process-wide handle on the connection pool. Cloning shares the pool;
/// each query checks a connection out and returns it on completion or error.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        // sqlx::query runs a single statement, so split the script
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Round-trip to the store; used as the startup connectivity check.
    pub async fn server_version(&self) -> Result<String, AppError> {
        let (version,): (String,) = sqlx::query_as("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    /// Load the owner of `resource` and decide whether `actor` may act on it.
    /// A missing resource is never authorized.
    pub async fn authorize(&self, actor: &Identity, resource: Resource) -> Result<bool, AppError> {
        let owner: Option<(UserId,)> = match resource {
            Resource::Internship(id) => {
                sqlx::query_as("SELECT posted_by_id FROM internships WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            Resource::Application(id) => {
                sqlx::query_as("SELECT student_id FROM applications WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        let allowed = owner.is_some_and(|(owner_id,)| {
            authorization::authorize(
                actor,
                &Owned {
                    kind: resource.kind(),
                    owner_id,
                },
            )
        });
        if !allowed {
            debug!(user_id = actor.id, ?resource, "authorization denied");
        }
        Ok(allowed)
    }

    pub async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, full_name, email, password, role, department,
               designation, roll_number, created_at
               FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, full_name, email, password, role, department,
               designation, roll_number, created_at
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a user whose password has already been hashed.
    /// Fails with `Conflict` on a duplicate email.
    pub async fn create_user(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserId, AppError> {
        let email_taken = || AppError::Conflict {
            field: "email",
            message: "This email is already registered.".to_string(),
        };

        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(email_taken());
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                full_name, email, password, role, department,
                designation, roll_number, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(&user.department)
        .bind(&user.designation)
        .bind(&user.roll_number)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(AppError::from);

        // a concurrent registration can still win the race past the pre-check
        match inserted {
            Ok(res) => Ok(res.last_insert_rowid()),
            Err(e) if e.is_unique_violation() => Err(email_taken()),
            Err(e) => Err(e),
        }
    }

    /// Returns the number of rows touched (0 if the user vanished).
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<u64, AppError> {
        let res = sqlx::query(
            r#"UPDATE users SET
                full_name = ?,
                department = ?,
                designation = ?,
                roll_number = ?
              WHERE id = ?"#,
        )
        .bind(&update.full_name)
        .bind(&update.department)
        .bind(&update.designation)
        .bind(&update.roll_number)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
