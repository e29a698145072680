use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pages::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Pages::PrdId).string().not_null())
                    .col(ColumnDef::new(Pages::Name).string().not_null())
                    .col(ColumnDef::new(Pages::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Pages::Table, Pages::PrdId)
                            .to(Prds::Table, Prds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Pages::Table)
                    .col(Pages::PrdId)
                    .col(Pages::Position)
                    .name("idx_pages_prd_id_position")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Pages {
    Table,
    Id,
    PrdId,
    Name,
    Position,
}

#[derive(Iden)]
enum Prds {
    Table,
    Id,
}
