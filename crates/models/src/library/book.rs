use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::validate_required;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when creating a book; `id` is generated unless supplied.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewBook {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("title", &self.title)?;
        validate_required("author", &self.author)?;
        Ok(())
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: &NewBook) -> Result<Model, ModelError> {
    input.validate()?;
    let mut am = ActiveModel {
        title: Set(input.title.trim().to_string()),
        author: Set(input.author.trim().to_string()),
        year: Set(input.year),
        ..Default::default()
    };
    if let Some(id) = input.id {
        am.id = Set(id);
    }
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Page of books in insertion (id) order.
pub async fn list<C: ConnectionTrait>(db: &C, offset: u64, limit: u64) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}
