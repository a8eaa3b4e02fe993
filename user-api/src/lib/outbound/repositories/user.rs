use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::Phone;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, active, token, created_at, modified_at, last_login
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn phones_of(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Phone>>, UserError> {
        let rows = sqlx::query_as::<_, PhoneRow>(
            r#"
            SELECT id, user_id, number, city_code, country_code
            FROM phones
            WHERE user_id = ANY($1)
            ORDER BY user_id, position
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut phones: HashMap<Uuid, Vec<Phone>> = HashMap::new();
        for row in rows {
            phones.entry(row.user_id).or_default().push(row.into());
        }
        Ok(phones)
    }

    async fn with_phones(&self, row: Option<UserRow>) -> Result<Option<User>, UserError> {
        match row {
            Some(r) => {
                let mut phones = self.phones_of(&[r.id]).await?;
                let user_phones = phones.remove(&r.id).unwrap_or_default();
                Ok(Some(r.into_user(user_phones)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, active, token, created_at, modified_at, last_login)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.active)
        .bind(&user.token)
        .bind(user.created_at)
        .bind(user.modified_at)
        .bind(user.last_login)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, &user.email))?;

        insert_phones(&mut tx, &user).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        self.with_phones(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        self.with_phones(row).await
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{} ORDER BY seq", SELECT_USER))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut phones = self.phones_of(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let user_phones = phones.remove(&r.id).unwrap_or_default();
                r.into_user(user_phones)
            })
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, active = $5, token = $6,
                modified_at = $7, last_login = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.active)
        .bind(&user.token)
        .bind(user.modified_at)
        .bind(user.last_login)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        sqlx::query("DELETE FROM phones WHERE user_id = $1")
            .bind(user.id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        insert_phones(&mut tx, &user).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(user)
    }

    async fn record_login(
        &self,
        id: &UserId,
        last_login: DateTime<Utc>,
        token: &str,
    ) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET last_login = $2, token = $3 WHERE id = $1")
            .bind(id.0)
            .bind(last_login)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_phones(conn: &mut PgConnection, user: &User) -> Result<(), UserError> {
    for (position, phone) in user.phones.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO phones (id, user_id, number, city_code, country_code, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(phone.id)
        .bind(user.id.0)
        .bind(&phone.number)
        .bind(&phone.city_code)
        .bind(&phone.country_code)
        .bind(position as i32)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;
    }
    Ok(())
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Unique violations on email surface as `DuplicateEmail`, closing the check-then-insert race.
fn write_error(e: sqlx::Error, email: &str) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
            return UserError::DuplicateEmail(email.to_string());
        }
    }
    database_error(e)
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    active: bool,
    token: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self, phones: Vec<Phone>) -> User {
        User {
            id: UserId(self.id),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            active: self.active,
            token: self.token,
            created_at: self.created_at,
            modified_at: self.modified_at,
            last_login: self.last_login,
            phones,
        }
    }
}

#[derive(Debug, FromRow)]
struct PhoneRow {
    id: Uuid,
    user_id: Uuid,
    number: String,
    city_code: String,
    country_code: String,
}

impl From<PhoneRow> for Phone {
    fn from(row: PhoneRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId(row.user_id),
            number: row.number,
            city_code: row.city_code,
            country_code: row.country_code,
        }
    }
}
