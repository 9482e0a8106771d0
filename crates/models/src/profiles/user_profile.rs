use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::patch::{merge, present};
use crate::profiles::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub interests: Option<String>,
    pub about: Option<String>,
    pub address: Option<String>,
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

/// Profile fields supplied by a `PUT /users/{id}/profile` body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, deserialize_with = "present")]
    pub interests: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub about: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn apply_to(&self, am: &mut ActiveModel) {
        merge(&mut am.interests, self.interests.clone());
        merge(&mut am.about, self.about.clone());
        merge(&mut am.address, self.address.clone());
    }
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?;
    Ok(found)
}

/// Create the profile on first use, otherwise merge into the existing row.
pub async fn upsert<C: ConnectionTrait>(db: &C, user_id: i32, patch: &ProfilePatch) -> Result<Model, ModelError> {
    match find_by_user(db, user_id).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.clone().into();
            patch.apply_to(&mut am);
            if !am.is_changed() {
                return Ok(existing);
            }
            am.update(db).await.map_err(ModelError::from_db)
        }
        None => {
            let mut am = ActiveModel {
                user_id: Set(user_id),
                interests: Set(None),
                about: Set(None),
                address: Set(None),
                ..Default::default()
            };
            patch.apply_to(&mut am);
            am.insert(db).await.map_err(ModelError::from_db)
        }
    }
}
