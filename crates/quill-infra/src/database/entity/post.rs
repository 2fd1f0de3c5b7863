//! Post entity for SeaORM.
//!
//! Table layout:
//!
//! ```sql
//! CREATE TABLE posts (
//!     id      INTEGER GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
//!     title   VARCHAR(300) NOT NULL,
//!     text    TEXT,
//!     author  TEXT NOT NULL,
//!     created TIMESTAMPTZ NOT NULL
//! );
//! ```

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, QueryResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub text: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub author: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row mapper handed to the executor for every post query.
pub fn from_row(row: &QueryResult) -> Result<quill_core::domain::Post, DbErr> {
    Model::from_query_result(row, "").map(Into::into)
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            author: model.author,
            created: model.created.into(),
        }
    }
}
