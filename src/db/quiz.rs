use color_eyre::Result;

use super::models::Quiz;
use super::Db;

/// Turn a user search string into a LIKE pattern: runs of whitespace
/// become wildcards so "capital france" matches "capital of France".
fn search_pattern(search: &str) -> String {
    format!("%{}%", search.split_whitespace().collect::<Vec<_>>().join("%"))
}

const QUIZ_COLUMNS: &str = "quizzes.id, quizzes.question, quizzes.answer, quizzes.author_id, \
                            users.username AS author_name";

impl Db {
    /// Number of quizzes matching the optional search text and author filter.
    pub async fn count_quizzes(
        &self,
        search: Option<&str>,
        author_id: Option<i64>,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM quizzes \
             WHERE (? IS NULL OR question LIKE ?) AND (? IS NULL OR author_id = ?)",
        )
        .bind(search)
        .bind(search.map(search_pattern))
        .bind(author_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// One page of quizzes, newest filters applied, with the author's
    /// username joined in.
    pub async fn quizzes_page(
        &self,
        search: Option<&str>,
        author_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes \
             LEFT JOIN users ON users.id = quizzes.author_id \
             WHERE (? IS NULL OR quizzes.question LIKE ?) \
               AND (? IS NULL OR quizzes.author_id = ?) \
             ORDER BY quizzes.id LIMIT ? OFFSET ?"
        ))
        .bind(search)
        .bind(search.map(search_pattern))
        .bind(author_id)
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    /// Full catalog, used by random play.
    pub async fn all_quizzes(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes \
             LEFT JOIN users ON users.id = quizzes.author_id \
             ORDER BY quizzes.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    pub async fn quiz(&self, id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes \
             LEFT JOIN users ON users.id = quizzes.author_id \
             WHERE quizzes.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    pub async fn create_quiz(&self, question: &str, answer: &str, author_id: i64) -> Result<i64> {
        let quiz_id: i64 = sqlx::query_scalar(
            "INSERT INTO quizzes (question, answer, author_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(question)
        .bind(answer)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new quiz created with id: {quiz_id} for author_id: {author_id}");
        Ok(quiz_id)
    }

    pub async fn update_quiz(&self, id: i64, question: &str, answer: &str) -> Result<()> {
        sqlx::query("UPDATE quizzes SET question = ?, answer = ? WHERE id = ?")
            .bind(question)
            .bind(answer)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a quiz; its tips go with it via the FK cascade.
    pub async fn delete_quiz(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("quiz deleted: id={id}");
        Ok(())
    }
}
