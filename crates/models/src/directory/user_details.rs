use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::directory::user;
use crate::errors::ModelError;
use crate::patch::{merge, present};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Details body for create and partial update.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DetailsPatch {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub bio: Option<Option<String>>,
}

impl DetailsPatch {
    pub fn apply_to(&self, am: &mut ActiveModel) {
        merge(&mut am.first_name, self.first_name.clone());
        merge(&mut am.last_name, self.last_name.clone());
        merge(&mut am.phone, self.phone.clone());
        merge(&mut am.address, self.address.clone());
        merge(&mut am.bio, self.bio.clone());
    }
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?;
    Ok(found)
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: i32, patch: &DetailsPatch) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut am = ActiveModel {
        user_id: Set(user_id),
        first_name: Set(None),
        last_name: Set(None),
        phone: Set(None),
        address: Set(None),
        bio: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    patch.apply_to(&mut am);
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn update<C: ConnectionTrait>(db: &C, existing: Model, patch: &DetailsPatch) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    patch.apply_to(&mut am);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ModelError::from_db)
}

/// Returns true if a row was removed.
pub async fn delete_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
