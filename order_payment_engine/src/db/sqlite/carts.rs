use sqlx::SqliteConnection;

use crate::{db::sqlite::SqliteDatabaseError, db_types::UserId};

/// Deletes the user's cart record. Returns the number of rows removed; zero simply means there was no cart.
pub async fn clear_cart_for_user(user_id: &UserId, conn: &mut SqliteConnection) -> Result<u64, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM carts WHERE user_id = ?").bind(user_id).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
