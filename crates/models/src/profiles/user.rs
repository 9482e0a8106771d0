use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::Serialize;

use crate::errors::ModelError;
use crate::profiles::user_profile;
use crate::validation::{normalize_email, validate_email, validate_required};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Profile }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Profile => Entity::has_one(user_profile::Entity).into(),
        }
    }
}

impl Related<user_profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::Profile.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a user; the caller supplies an already-hashed password.
pub async fn create<C: ConnectionTrait>(db: &C, email: &str, name: &str, password_hash: String) -> Result<Model, ModelError> {
    validate_email(email.trim())?;
    validate_required("name", name)?;
    let am = ActiveModel {
        email: Set(normalize_email(email)),
        name: Set(name.trim().to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// User joined with its profile row, if any.
pub async fn find_with_profile<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(Model, Option<user_profile::Model>)>, ModelError> {
    let found = Entity::find_by_id(id)
        .find_also_related(user_profile::Entity)
        .one(db)
        .await?;
    Ok(found)
}
