//! Household user operations

use rusqlite::{params, OptionalExtension};

use super::{datetime_column, Database};
use crate::error::{Error, Result};
use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, created_at";

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: datetime_column(row, 3)?,
    })
}

impl Database {
    /// Create a user, failing if the username is taken
    pub fn create_user(&self, username: &str, email: Option<&str>) -> Result<i64> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidData("Username cannot be empty".into()));
        }
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, email) VALUES (?, ?)",
            params![username, email],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_name(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS),
                params![username.trim()],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Get a user by name, creating it on first use
    ///
    /// Safe under concurrent first use: the insert is a no-op when another
    /// connection created the row first.
    pub fn ensure_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidData("Username cannot be empty".into()));
        }

        let conn = self.conn()?;
        let created = conn.execute(
            "INSERT OR IGNORE INTO users (username) VALUES (?)",
            params![username],
        )?;
        if created > 0 {
            tracing::info!(user = username, id = conn.last_insert_rowid(), "Created user");
        }

        let user = conn.query_row(
            &format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS),
            params![username],
            row_to_user,
        )?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }
}
