use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn genre_list(&self) -> Vec<String> {
        super::decode_genres(&self.genres)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Shows,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
