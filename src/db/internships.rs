use crate::db::models::{DepartmentCount, Internship, InternshipSummary, Roster, RosterEntry};
use crate::db::sqlite::Storage;
use crate::error::AppError;
use crate::types::forms::NewInternship;
use crate::types::{InternshipId, UserId};
use chrono::Utc;

const SUMMARY_SELECT: &str = r#"
    SELECT i.id, i.title, i.link, i.skills, i.target_year, i.pay, i.positions,
           i.posted_by_id, i.created_at,
           u.full_name AS recruiter,
           COUNT(a.id) AS applicant_count
    FROM internships i
    JOIN users u ON u.id = i.posted_by_id
    LEFT JOIN applications a ON a.internship_id = i.id
"#;

impl Storage {
    pub async fn create_internship(
        &self,
        owner: UserId,
        internship: &NewInternship,
    ) -> Result<InternshipId, AppError> {
        let res = sqlx::query(
            r#"
            INSERT INTO internships (
                title, link, skills, target_year, pay, positions, posted_by_id, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&internship.title)
        .bind(&internship.link)
        .bind(&internship.skills)
        .bind(&internship.target_year)
        .bind(&internship.pay)
        .bind(internship.positions)
        .bind(owner)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn get_internship(&self, id: InternshipId) -> Result<Option<Internship>, AppError> {
        let row = sqlx::query_as::<_, Internship>(
            r#"SELECT id, title, link, skills, target_year, pay, positions,
               posted_by_id, created_at
               FROM internships WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// Internships posted by `owner`, newest first, with live applicant counts.
    pub async fn list_internships_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<InternshipSummary>, AppError> {
        let sql = format!(
            "{SUMMARY_SELECT} WHERE i.posted_by_id = ? GROUP BY i.id ORDER BY i.created_at DESC, i.id DESC"
        );
        let rows = sqlx::query_as::<_, InternshipSummary>(&sql)
            .bind(owner)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    /// Every internship in the system, newest first.
    pub async fn list_all_internships(&self) -> Result<Vec<InternshipSummary>, AppError> {
        let sql = format!("{SUMMARY_SELECT} GROUP BY i.id ORDER BY i.created_at DESC, i.id DESC");
        let rows = sqlx::query_as::<_, InternshipSummary>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    /// Delete the internship and its applications in one transaction,
    /// applications first so no row ever points at a missing internship.
    /// Returns the number of internships deleted: 0 when `owner` does not own it.
    pub async fn delete_internship(
        &self,
        owner: UserId,
        id: InternshipId,
    ) -> Result<u64, AppError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"DELETE FROM applications
               WHERE internship_id = ?
                 AND EXISTS (SELECT 1 FROM internships WHERE id = ? AND posted_by_id = ?)"#,
        )
        .bind(id)
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        let res = sqlx::query("DELETE FROM internships WHERE id = ? AND posted_by_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(res.rows_affected())
    }

    /// Applicants of `internship` (oldest application first) and their department breakdown,
    /// read from one snapshot. Callers must have authorized the owner beforehand.
    pub async fn roster(&self, internship: Internship) -> Result<Roster, AppError> {
        let mut tx = self.pool().begin().await?;

        let applicants = sqlx::query_as::<_, RosterEntry>(
            r#"SELECT a.id AS application_id, u.id AS student_id, u.full_name, u.email,
                      u.department, u.roll_number, a.status, a.applied_at
               FROM applications a
               JOIN users u ON u.id = a.student_id
               WHERE a.internship_id = ?
               ORDER BY a.applied_at, a.id"#,
        )
        .bind(internship.id)
        .fetch_all(&mut *tx)
        .await?;

        let department_stats = sqlx::query_as::<_, DepartmentCount>(
            r#"SELECT u.department, COUNT(*) AS count
               FROM applications a
               JOIN users u ON u.id = a.student_id
               WHERE a.internship_id = ?
               GROUP BY u.department
               ORDER BY count DESC, u.department"#,
        )
        .bind(internship.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Roster {
            internship,
            applicants,
            department_stats,
        })
    }
}
