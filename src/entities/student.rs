//! Student entity - Anagrafica studenti (dati di riferimento immutabili)

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Student {
    pub enrollment_no: String,
    pub name: String,
    pub class_name: String,
    pub contact: String,
}
