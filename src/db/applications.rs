use crate::db::models::MyApplication;
use crate::db::sqlite::Storage;
use crate::error::AppError;
use crate::types::{ApplicationId, InternshipId, UserId};
use chrono::Utc;

impl Storage {
    /// Record that `student` applied to `internship`. Repeats and unknown
    /// internships insert nothing; returns whether a row was created.
    pub async fn apply(&self, student: UserId, internship: InternshipId) -> Result<bool, AppError> {
        let res = sqlx::query(
            r#"
            INSERT INTO applications (student_id, internship_id, applied_at)
            SELECT ?, id, ? FROM internships WHERE id = ?
            ON CONFLICT(student_id, internship_id) DO NOTHING
            "#,
        )
        .bind(student)
        .bind(Utc::now())
        .bind(internship)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn list_applications(&self, student: UserId) -> Result<Vec<MyApplication>, AppError> {
        let rows = sqlx::query_as::<_, MyApplication>(
            r#"SELECT a.id, a.internship_id, a.status, a.applied_at, i.title, i.link
               FROM applications a
               JOIN internships i ON i.id = a.internship_id
               WHERE a.student_id = ?
               ORDER BY a.applied_at DESC, a.id DESC"#,
        )
        .bind(student)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Returns rows affected; 0 when the application is not `student`'s.
    pub async fn update_application_status(
        &self,
        student: UserId,
        id: ApplicationId,
        status: &str,
    ) -> Result<u64, AppError> {
        let res = sqlx::query("UPDATE applications SET status = ? WHERE id = ? AND student_id = ?")
            .bind(status)
            .bind(id)
            .bind(student)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }

    /// Returns rows affected; 0 when the application is not `student`'s.
    pub async fn remove_application(
        &self,
        student: UserId,
        id: ApplicationId,
    ) -> Result<u64, AppError> {
        let res = sqlx::query("DELETE FROM applications WHERE id = ? AND student_id = ?")
            .bind(id)
            .bind(student)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn count_applications(&self, internship: InternshipId) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE internship_id = ?")
                .bind(internship)
                .fetch_one(self.pool())
                .await?;
        Ok(count)
    }
}
