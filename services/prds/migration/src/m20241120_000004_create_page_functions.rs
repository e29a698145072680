use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageFunctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PageFunctions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PageFunctions::PageId).string().not_null())
                    .col(ColumnDef::new(PageFunctions::Name).text().not_null())
                    .col(ColumnDef::new(PageFunctions::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PageFunctions::Table, PageFunctions::PageId)
                            .to(Pages::Table, Pages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PageFunctions::Table)
                    .col(PageFunctions::PageId)
                    .col(PageFunctions::Position)
                    .name("idx_page_functions_page_id_position")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PageFunctions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PageFunctions {
    Table,
    Id,
    PageId,
    Name,
    Position,
}

#[derive(Iden)]
enum Pages {
    Table,
    Id,
}
