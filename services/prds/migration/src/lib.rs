use sea_orm_migration::prelude::*;

mod m20241120_000001_create_users;
mod m20241120_000002_create_prds;
mod m20241120_000003_create_pages;
mod m20241120_000004_create_page_functions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241120_000001_create_users::Migration),
            Box::new(m20241120_000002_create_prds::Migration),
            Box::new(m20241120_000003_create_pages::Migration),
            Box::new(m20241120_000004_create_page_functions::Migration),
        ]
    }
}
