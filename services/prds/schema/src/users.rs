use sea_orm::entity::prelude::*;

/// User mirrored from the external identity provider.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prds::Entity")]
    Prds,
}

impl Related<super::prds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
