use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::sea_orm_entity::user_bios::{
    ActiveModel as BioActiveModel, Column as BioColumn, Entity as BioEntity,
};
use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
};
use crate::auth::application::domain::entities::{AccountToken, User, UserBio, UserId};
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, ProfileChanges, UserRepository, UserRepositoryError,
};

const SINGLE_ADMINISTRATOR_INDEX: &str = "idx_users_single_administrator";

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_write_error(e: DbErr) -> UserRepositoryError {
        let err_str = e.to_string().to_lowercase();
        if err_str.contains(SINGLE_ADMINISTRATOR_INDEX) {
            return UserRepositoryError::AdministratorAlreadyExists;
        }
        if err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
        {
            return UserRepositoryError::UserAlreadyExists;
        }
        if err_str.contains("23503") || err_str.contains("foreign key") {
            return UserRepositoryError::UserNotFound;
        }
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn apply_account_changes<C>(
        conn: &C,
        user_id: UserId,
        name: Option<String>,
        email: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<User, UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let user = UserEntity::find_by_id(user_id.value())
            .one(conn)
            .await
            .map_err(db_error)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        let mut active_user: UserActiveModel = user.into();
        if let Some(name) = name {
            active_user.name = Set(name);
        }
        if let Some(email) = email {
            active_user.email = Set(email);
        }
        if let Some(avatar_url) = avatar_url {
            active_user.avatar_url = Set(avatar_url);
        }

        let updated = active_user
            .update(conn)
            .await
            .map_err(Self::map_write_error)?;

        Ok(User::from(updated))
    }

    async fn upsert_bio<C>(
        conn: &C,
        user_id: UserId,
        bio: UserBio,
    ) -> Result<UserBio, UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let active_bio = BioActiveModel {
            id: NotSet,
            user_id: Set(user_id.value()),
            genre: Set(bio.genre),
            about: Set(bio.about),
            profession: Set(bio.profession),
            linkedin: Set(bio.linkedin),
            twitter: Set(bio.twitter),
            facebook: Set(bio.facebook),
        };

        let saved = BioEntity::insert(active_bio)
            .on_conflict(
                OnConflict::column(BioColumn::UserId)
                    .update_columns([
                        BioColumn::Genre,
                        BioColumn::About,
                        BioColumn::Profession,
                        BioColumn::Linkedin,
                        BioColumn::Twitter,
                        BioColumn::Facebook,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(conn)
            .await
            .map_err(Self::map_write_error)?;

        Ok(UserBio::from(saved))
    }
}

fn db_error(e: DbErr) -> UserRepositoryError {
    UserRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: NotSet,
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            avatar_url: Set(user.avatar_url),
            role: Set(user.role.into()),
            is_confirmed: Set(false),
            token: Set(Some(user.token.value().to_string())),
            token_issued_at: Set(Some(user.token.issued_at().fixed_offset())),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user
            .insert(&*self.db)
            .await
            .map_err(Self::map_write_error)?;

        Ok(User::from(inserted))
    }

    async fn store_token(
        &self,
        user_id: UserId,
        token: AccountToken,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(UserColumn::Token, Expr::value(token.value().to_string()))
            .col_expr(
                UserColumn::TokenIssuedAt,
                Expr::value(token.issued_at().fixed_offset()),
            )
            .filter(UserColumn::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn confirm_with_token(
        &self,
        token: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError> {
        // Single conditional UPDATE: only one caller can match the token.
        let updated = UserEntity::update_many()
            .col_expr(UserColumn::IsConfirmed, Expr::value(true))
            .col_expr(UserColumn::Token, Expr::value(Option::<String>::None))
            .col_expr(
                UserColumn::TokenIssuedAt,
                Expr::value(Option::<sea_orm::prelude::DateTimeWithTimeZone>::None),
            )
            .filter(UserColumn::Token.eq(token))
            .filter(UserColumn::TokenIssuedAt.gt(issued_after.fixed_offset()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(updated.into_iter().next().map(User::from))
    }

    async fn reset_password_with_token(
        &self,
        user_id: UserId,
        token: &str,
        issued_after: DateTime<Utc>,
        password_hash: String,
    ) -> Result<bool, UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(UserColumn::PasswordHash, Expr::value(password_hash))
            .col_expr(UserColumn::Token, Expr::value(Option::<String>::None))
            .col_expr(
                UserColumn::TokenIssuedAt,
                Expr::value(Option::<sea_orm::prelude::DateTimeWithTimeZone>::None),
            )
            .filter(UserColumn::Id.eq(user_id.value()))
            .filter(UserColumn::Token.eq(token))
            .filter(UserColumn::TokenIssuedAt.gt(issued_after.fixed_offset()))
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected == 1)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<(User, Option<UserBio>), UserRepositoryError> {
        let ProfileChanges {
            name,
            email,
            avatar_url,
            bio,
        } = changes;

        // An early return drops `txn`, which rolls back both writes.
        let txn = self.db.begin().await.map_err(db_error)?;

        let user = Self::apply_account_changes(&txn, user_id, name, email, avatar_url).await?;
        let bio = match bio {
            Some(bio) => Some(Self::upsert_bio(&txn, user_id, bio).await?),
            None => None,
        };

        txn.commit().await.map_err(db_error)?;
        Ok((user, bio))
    }
}
