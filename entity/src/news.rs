use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub news_type_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub is_published: bool,
    pub create_date: DateTime,
    pub creator_id: Option<i32>,
    pub update_date: DateTime,
    pub updater_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::news_type::Entity",
        from = "Column::NewsTypeId",
        to = "super::news_type::Column::Id"
    )]
    NewsType,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::news_tag_param::Entity")]
    NewsTagParam,
}

impl Related<super::news_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsType.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::news_tag_param::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsTagParam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
