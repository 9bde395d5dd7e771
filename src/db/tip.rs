use color_eyre::Result;

use super::models::Tip;
use super::Db;

const TIP_COLUMNS: &str = "tips.id, tips.text, tips.accepted, tips.quiz_id, tips.author_id, \
                           users.username AS author_name";

impl Db {
    pub async fn tips_for_quiz(&self, quiz_id: i64) -> Result<Vec<Tip>> {
        let tips = sqlx::query_as::<_, Tip>(&format!(
            "SELECT {TIP_COLUMNS} FROM tips \
             LEFT JOIN users ON users.id = tips.author_id \
             WHERE tips.quiz_id = ? ORDER BY tips.id"
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tips)
    }

    pub async fn tip(&self, id: i64) -> Result<Option<Tip>> {
        let tip = sqlx::query_as::<_, Tip>(&format!(
            "SELECT {TIP_COLUMNS} FROM tips \
             LEFT JOIN users ON users.id = tips.author_id \
             WHERE tips.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tip)
    }

    /// New tips start unaccepted until the quiz author or an admin accepts
    /// them.
    pub async fn create_tip(&self, quiz_id: i64, text: &str, author_id: i64) -> Result<i64> {
        let tip_id: i64 = sqlx::query_scalar(
            "INSERT INTO tips (text, quiz_id, author_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(text)
        .bind(quiz_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new tip created with id: {tip_id} on quiz_id: {quiz_id}");
        Ok(tip_id)
    }

    pub async fn accept_tip(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE tips SET accepted = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Editing a tip sends it back through moderation: accepted drops to
    /// false alongside the text change.
    pub async fn update_tip(&self, id: i64, text: &str) -> Result<()> {
        sqlx::query("UPDATE tips SET text = ?, accepted = 0 WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_tip(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM tips WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("tip deleted: id={id}");
        Ok(())
    }
}
