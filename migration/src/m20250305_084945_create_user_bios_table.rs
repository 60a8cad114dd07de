use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserBios::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserBios::Genre).string_len(250).null())
                    .col(ColumnDef::new(UserBios::About).string_len(2000).null())
                    .col(ColumnDef::new(UserBios::Profession).string_len(250).null())
                    .col(ColumnDef::new(UserBios::Linkedin).string_len(250).null())
                    .col(ColumnDef::new(UserBios::Twitter).string_len(250).null())
                    .col(ColumnDef::new(UserBios::Facebook).string_len(250).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_bios_user_id")
                            .from(UserBios::Table, UserBios::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserBios {
    Table,
    Id,
    UserId,
    Genre,
    About,
    Profession,
    Linkedin,
    Twitter,
    Facebook,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
