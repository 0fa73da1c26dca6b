//! StudentRepository - Repository per l'anagrafica studenti (sola lettura)

use super::Read;
use crate::entities::Student;
use sqlx::{Error, PgPool};

// STUDENT REPOSITORY
pub struct StudentRepository {
    connection_pool: PgPool,
}

impl StudentRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }
}

impl Read<Student, String> for StudentRepository {
    async fn read(&self, enrollment_no: &String) -> Result<Option<Student>, Error> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT enrollment_no, name, class_name, contact
            FROM students
            WHERE enrollment_no = $1
            "#,
        )
        .bind(enrollment_no)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(student)
    }
}
