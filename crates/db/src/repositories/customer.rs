use crate::models::DbCustomer;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_customer(
    pool: &Pool<Postgres>,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<DbCustomer> {
    tracing::debug!("Creating customer: email={}", email);

    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        INSERT INTO customers (email, name, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, email, name, password_hash, created_at
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(customer)
}

pub async fn get_customer_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, email, name, password_hash, created_at
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn get_customer_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, email, name, password_hash, created_at
        FROM customers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}
