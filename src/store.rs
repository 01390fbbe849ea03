//! Submission storage: pool lifecycle, idempotent DDL, and the two data paths.

use crate::config::ServerConfig;
use crate::error::{AppError, ConfigError};
use crate::model::{NewSubmission, Submission};
use crate::service::PageRequest;
use crate::sql::{count_submissions, insert_submission, select_submissions, to_arguments, ListFilter, GENDER_TYPE, TABLE};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Name of the unique index on `submissions.email`; a violation of it means a duplicate email.
pub const EMAIL_UNIQUE_INDEX: &str = "submissions_email_key";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaState {
    Ready,
    Missing,
}

/// Storage client. Opened once at startup, shared through `AppState`, closed at shutdown.
#[derive(Clone, Debug)]
pub struct SubmissionStore {
    pool: PgPool,
}

impl SubmissionStore {
    /// Open the pool (creating the database first when configured to).
    pub async fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        if config.ensure_database {
            ensure_database_exists(&config.database_url).await?;
        }
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(SubmissionStore { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        SubmissionStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Whether the submissions table is present. A query failure means the database is unreachable.
    pub async fn schema_state(&self) -> Result<SchemaState, AppError> {
        let present: bool = sqlx::query_scalar("SELECT to_regclass($1::text) IS NOT NULL")
            .bind(TABLE)
            .fetch_one(&self.pool)
            .await?;
        Ok(if present { SchemaState::Ready } else { SchemaState::Missing })
    }

    /// Create the gender type, table, indexes and `updated_at` trigger if missing. Never destructive.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        for ddl in schema_ddl() {
            tracing::debug!(sql = %ddl, "ddl");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        tracing::info!(table = TABLE, "schema ready");
        Ok(())
    }

    /// Insert one row and return its id. A duplicate email surfaces as `AppError::Conflict`.
    pub async fn insert(&self, s: &NewSubmission) -> Result<i64, AppError> {
        let sql = insert_submission();
        tracing::debug!(sql = %sql, email = %s.email, "query");
        let inserted = sqlx::query_scalar::<_, i64>(&sql)
            .bind(&s.name)
            .bind(&s.email)
            .bind(&s.phone)
            .bind(s.gender.as_str())
            .bind(s.dob)
            .fetch_one(&self.pool)
            .await;
        match inserted {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(e))
                if e.is_unique_violation() && e.constraint() == Some(EMAIL_UNIQUE_INDEX) =>
            {
                Err(AppError::Conflict("Email already exists".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn count(&self, filter: &ListFilter) -> Result<i64, AppError> {
        let q = count_submissions(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let total = sqlx::query_scalar_with::<_, i64, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list(&self, filter: &ListFilter, page: PageRequest) -> Result<Vec<Submission>, AppError> {
        let q = select_submissions(filter, page);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = sqlx::query_as_with::<_, Submission, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn schema_ddl() -> Vec<String> {
    vec![
        format!(
            r#"
            DO $$ BEGIN
                CREATE TYPE {ty} AS ENUM ('Male', 'Female', 'Other');
            EXCEPTION WHEN duplicate_object THEN NULL;
            END $$
            "#,
            ty = GENDER_TYPE
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {t} (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(150) NOT NULL,
                phone VARCHAR(20) NOT NULL,
                gender {ty} NOT NULL,
                dob DATE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            t = TABLE,
            ty = GENDER_TYPE
        ),
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} (email)",
            EMAIL_UNIQUE_INDEX, TABLE
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {t}_created_at_idx ON {t} (created_at DESC)",
            t = TABLE
        ),
        format!(
            r#"
            CREATE OR REPLACE FUNCTION {t}_touch_updated_at() RETURNS trigger AS $$
            BEGIN
                NEW.updated_at = NOW();
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
            "#,
            t = TABLE
        ),
        format!(
            r#"
            DO $$ BEGIN
                CREATE TRIGGER {t}_touch_updated_at BEFORE UPDATE ON {t}
                    FOR EACH ROW EXECUTE FUNCTION {t}_touch_updated_at();
            EXCEPTION WHEN duplicate_object THEN NULL;
            END $$
            "#,
            t = TABLE
        ),
    ]
}

/// Connect to the `postgres` maintenance database and create the target database if it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance connection plus the target database name. `None` when the URL
/// names no database, or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let db_name = match opts.get_database().map(str::trim) {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_target_postgres_db() {
        let (admin, db) = admin_options("postgres://u:p@localhost:5432/submissions").unwrap().unwrap();
        assert_eq!(db, "submissions");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn url_without_database_needs_no_create() {
        assert!(admin_options("postgres://user@db.internal:5432").unwrap().is_none());
        assert!(admin_options("postgres://user@db.internal:5432/postgres").unwrap().is_none());
    }

    #[test]
    fn socket_url_keeps_host_query() {
        let (admin, db) = admin_options("postgres:///forms?host=/var/run/postgresql&user=u").unwrap().unwrap();
        assert_eq!(db, "forms");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(
            admin.get_socket().map(|p| p.to_string_lossy().into_owned()).as_deref(),
            Some("/var/run/postgresql")
        );
    }

    #[test]
    fn credentials_with_empty_host_are_rejected() {
        // Not a valid URL (empty host after userinfo); must not be read as database "postgresql".
        assert!(matches!(
            admin_options("postgres://u@/forms?host=/var/run/postgresql"),
            Err(ConfigError::DatabaseUrl(_))
        ));
    }

    #[test]
    fn malformed_url_is_a_config_error() {
        assert!(matches!(admin_options("not a url"), Err(ConfigError::DatabaseUrl(_))));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }

    #[test]
    fn ddl_is_create_if_missing_only() {
        for ddl in schema_ddl() {
            let upper = ddl.to_uppercase();
            assert!(!upper.contains("DROP"), "destructive ddl: {ddl}");
        }
    }
}
