use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use super::sea_orm_entity::user_bios::{Column as BioColumn, Entity as BioEntity};
use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity, UserRole};
use crate::auth::application::domain::entities::{User, UserBio, UserId};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_error(e: sea_orm::DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(user.map(User::from))
    }

    async fn find_by_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Token.eq(token))
            .filter(UserColumn::TokenIssuedAt.gt(issued_after.fixed_offset()))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(user.map(User::from))
    }

    async fn find_bio(&self, user_id: UserId) -> Result<Option<UserBio>, UserQueryError> {
        let bio = BioEntity::find()
            .filter(BioColumn::UserId.eq(user_id.value()))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(bio.map(UserBio::from))
    }

    async fn administrator_exists(&self) -> Result<bool, UserQueryError> {
        let admin = UserEntity::find()
            .filter(UserColumn::Role.eq(UserRole::Administrator))
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(admin.is_some())
    }
}
