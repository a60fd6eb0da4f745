//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AccountCredentials, AccountPersistenceError, AccountRepository};
use crate::domain::{Account, EmailAddress, Handle};

use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

const HANDLE_CONSTRAINT: &str = "accounts_handle_key";
const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match info.constraint_name() {
                Some(EMAIL_CONSTRAINT) => AccountPersistenceError::DuplicateEmail,
                Some(HANDLE_CONSTRAINT) => AccountPersistenceError::DuplicateHandle,
                _ => AccountPersistenceError::query("unique constraint violated"),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPersistenceError::connection("database connection error")
        }
        _ => AccountPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain account plus its credential hash.
///
/// Rows were validated on the way in, so a failure here means the stored
/// data no longer satisfies the domain invariants.
fn row_to_credentials(row: AccountRow) -> Result<AccountCredentials, AccountPersistenceError> {
    let handle = Handle::new(row.handle)
        .map_err(|err| AccountPersistenceError::query(format!("stored handle invalid: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| AccountPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok(AccountCredentials {
        account: Account::new(row.id, handle, email, row.is_superuser),
        credential_hash: row.credential_hash,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(
        &self,
        account: &Account,
        credential_hash: &str,
    ) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountRow {
            id: account.id(),
            handle: account.handle().as_ref(),
            email: account.email().as_ref(),
            credential_hash,
            is_superuser: account.is_superuser(),
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<AccountCredentials>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::handle.eq(handle))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_credentials).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row_to_credentials(row).map(|creds| creds.account))
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .find(id)
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row_to_credentials(row).map(|creds| creds.account))
            .transpose()
    }
}
