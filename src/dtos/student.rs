//! Student DTOs - Data Transfer Objects per gli studenti

use crate::entities::Student;
use serde::{Deserialize, Serialize};

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StudentDTO {
    pub enrollment_no: String,
    pub name: String,
    pub class_name: String,
}

impl From<Student> for StudentDTO {
    fn from(value: Student) -> Self {
        Self {
            enrollment_no: value.enrollment_no,
            name: value.name,
            class_name: value.class_name,
        }
    }
}
