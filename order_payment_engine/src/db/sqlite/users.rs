use sqlx::SqliteConnection;

use crate::{db::sqlite::SqliteDatabaseError, db_types::UserId};

pub async fn fetch_user_id_for_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<UserId>, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}
