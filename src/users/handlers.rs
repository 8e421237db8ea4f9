use rusqlite::{named_params, params, Row};

use crate::db::{self, DB};

use super::{User, UserId};

impl<'a> TryFrom<&Row<'a>> for User {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            full_name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            created_on: row.get(4)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserParameters {
    pub full_name: String,
    pub email: String,
    /// Already hashed; this layer never sees a plaintext password.
    pub password: String,
}

pub async fn create_user(db: DB, args: CreateUserParameters) -> db::Result<User> {
    let user = db
        .call(move |conn| {
            conn.query_row(
                r#"INSERT INTO users (full_name, email, password) VALUES (:full_name, :email, :password)
                RETURNING id, full_name, email, password, created_on"#,
                named_params! {
                    ":full_name": args.full_name,
                    ":email": args.email,
                    ":password": args.password,
                },
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await?;

    Ok(user)
}

pub async fn find_one_by_email(db: DB, email: String) -> db::Result<User> {
    let user_email = email.clone();
    let user = db
        .call(move |conn| {
            conn.query_row(
                "SELECT id, full_name, email, password, created_on FROM users WHERE email = ?",
                params![email],
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(format!("User '{}' not found", user_email)))?;

    Ok(user)
}

pub async fn find_one_by_id(db: DB, user_id: UserId) -> db::Result<User> {
    let user = db
        .call(move |conn| {
            conn.query_row(
                "SELECT id, full_name, email, password, created_on FROM users WHERE id = ?",
                params![user_id],
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(format!("User '{}' not found", user_id)))?;

    Ok(user)
}
