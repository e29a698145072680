use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Prds::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Prds::Description).text())
                    .col(ColumnDef::new(Prds::TechStack).json_binary().not_null())
                    .col(ColumnDef::new(Prds::Content).text())
                    .col(
                        ColumnDef::new(Prds::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Prds::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Prds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Prds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Prds::Table, Prds::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Prds::Table)
                    .col(Prds::UserId)
                    .col((Prds::UpdatedAt, IndexOrder::Desc))
                    .name("idx_prds_user_id_updated_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prds::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prds {
    Table,
    Id,
    Title,
    Description,
    TechStack,
    Content,
    Published,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
