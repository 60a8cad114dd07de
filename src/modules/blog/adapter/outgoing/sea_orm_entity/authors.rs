use sea_orm::entity::prelude::*;

use crate::blog::application::ports::outgoing::AuthorView;

/// Public columns of `users`, as shown next to posts and comments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuthorView {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            avatar_url: model.avatar_url,
        }
    }
}
