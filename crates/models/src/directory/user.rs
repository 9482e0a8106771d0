use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, QuerySelect, Set};
use serde::Serialize;

use crate::directory::user_details;
use crate::errors::ModelError;
use crate::patch::merge;
use crate::validation::{normalize_email, validate_email, validate_required};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Details }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Details => Entity::has_one(user_details::Entity).into(),
        }
    }
}

impl Related<user_details::Entity> for Entity {
    fn to() -> RelationDef { Relation::Details.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column-level changes for an existing user; the password is already hashed.
#[derive(Clone, Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(email) = &self.email {
            validate_email(email.trim())?;
        }
        if let Some(username) = &self.username {
            validate_required("username", username)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, am: &mut ActiveModel) {
        merge(&mut am.email, self.email.as_deref().map(normalize_email));
        merge(&mut am.username, self.username.as_deref().map(|u| u.trim().to_string()));
        merge(&mut am.password_hash, self.password_hash.clone());
    }
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Username.eq(username.trim()))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    email: &str,
    username: &str,
    password_hash: String,
) -> Result<Model, ModelError> {
    validate_email(email.trim())?;
    validate_required("username", username)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        email: Set(normalize_email(email)),
        username: Set(username.trim().to_string()),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn update<C: ConnectionTrait>(db: &C, existing: Model, changes: &UserChanges) -> Result<Model, ModelError> {
    changes.validate()?;
    let mut am: ActiveModel = existing.into();
    changes.apply_to(&mut am);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ModelError::from_db)
}

pub async fn find_with_details<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(Model, Option<user_details::Model>)>, ModelError> {
    let found = Entity::find_by_id(id)
        .find_also_related(user_details::Entity)
        .one(db)
        .await?;
    Ok(found)
}

/// Page of users in insertion (id) order, each with its details row if any.
pub async fn list_with_details<C: ConnectionTrait>(
    db: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<(Model, Option<user_details::Model>)>, ModelError> {
    let rows = Entity::find()
        .find_also_related(user_details::Entity)
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// Returns true if a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
