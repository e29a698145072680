use sea_orm::entity::prelude::*;

/// Screen or route belonging to a PRD.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub prd_id: String,
    pub name: String,
    /// 0-based index among the PRD's pages.
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prds::Entity",
        from = "Column::PrdId",
        to = "super::prds::Column::Id",
        on_delete = "Cascade"
    )]
    Prd,
    #[sea_orm(has_many = "super::page_functions::Entity")]
    PageFunctions,
}

impl Related<super::prds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prd.def()
    }
}

impl Related<super::page_functions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PageFunctions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
