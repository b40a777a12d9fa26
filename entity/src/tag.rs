use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub create_date: DateTime,
    pub creator_id: Option<i32>,
    pub update_date: DateTime,
    pub updater_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::news_tag_param::Entity")]
    NewsTagParam,
}

impl Related<super::news_tag_param::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsTagParam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
