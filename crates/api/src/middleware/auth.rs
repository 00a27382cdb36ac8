//! # Authentication Module
//!
//! Password hashing and verification for customer accounts, using Argon2
//! with a random salt per password. Hashes are stored in PHC string format.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use barbershop_db::models::DbCustomer;
use eyre::Result;
use sqlx::PgPool;

/// Hashes a password using the Argon2 algorithm.
///
/// Generates a fresh random salt and uses the default Argon2 parameters
/// (memory: 19MiB, iterations: 3, parallelism: 4).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a plain text password against a stored PHC hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

/// Looks up a customer by email and checks the password.
///
/// Returns the customer row on success, `None` when the email is unknown or
/// the password does not match. Callers map both cases to the same
/// authentication failure so the response does not reveal which part was
/// wrong.
pub async fn verify_customer_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<DbCustomer>> {
    let customer =
        match barbershop_db::repositories::customer::get_customer_by_email(pool, email).await? {
            Some(customer) => customer,
            None => return Ok(None),
        };

    if verify_password(password, &customer.password_hash)? {
        Ok(Some(customer))
    } else {
        Ok(None)
    }
}
