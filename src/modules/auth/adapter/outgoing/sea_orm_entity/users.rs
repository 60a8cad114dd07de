use sea_orm::entity::prelude::*;

use crate::auth::application::domain::entities::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "author")]
    Author,
    #[sea_orm(string_value = "administrator")]
    Administrator,
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Author => Role::Author,
            UserRole::Administrator => Role::Administrator,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Author => UserRole::Author,
            Role::Administrator => UserRole::Administrator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub role: UserRole,
    pub is_confirmed: bool,
    pub token: Option<String>,
    pub token_issued_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_bios::Entity")]
    UserBios,
}

impl Related<super::user_bios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::auth::application::domain::entities::User {
    fn from(model: Model) -> Self {
        use crate::auth::application::domain::entities::{AccountToken, UserId};

        let token = match (model.token, model.token_issued_at) {
            (Some(value), Some(issued_at)) => {
                Some(AccountToken::new(value, issued_at.with_timezone(&chrono::Utc)))
            }
            _ => None,
        };

        Self {
            id: UserId::from(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            is_confirmed: model.is_confirmed,
            token,
            avatar_url: model.avatar_url,
            role: model.role.into(),
            created_at: model.created_at.with_timezone(&chrono::Utc),
        }
    }
}
