use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub xml_file_path: String,
    pub image_file_path: String,
    pub votes: i64,
    pub reports: i64,
}
