use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

// Ingredient structure for JSONB storage
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// Recipe difficulty rating. Stored as text in the database; anything
/// outside these three values fails deserialization loudly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl ToSql<Text, Pg> for Difficulty {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Difficulty {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        match value.as_bytes() {
            b"Easy" => Ok(Difficulty::Easy),
            b"Medium" => Ok(Difficulty::Medium),
            b"Hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unrecognized difficulty: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub instructions: Vec<Option<String>>,
    pub image_url: String,
    pub cooking_time_minutes: i32,
    pub difficulty: Difficulty,
    pub servings: i32,
    pub saved_by: Vec<Option<Uuid>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub created_by: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub instructions: &'a [Option<String>],
    pub image_url: &'a str,
    pub cooking_time_minutes: i32,
    pub difficulty: Difficulty,
    pub servings: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serde_uses_capitalized_names() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"Medium\""
        );
        let parsed: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        assert!(serde_json::from_str::<Difficulty>("\"Impossible\"").is_err());
        assert!(serde_json::from_str::<Difficulty>("\"easy\"").is_err());
    }
}
