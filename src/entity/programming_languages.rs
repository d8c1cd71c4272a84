//! 编程语言实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "programming_languages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub display_name: String,
    pub language_name: Option<String>,
    pub piston_name: Option<String>,
    pub piston_version: Option<String>,
    pub judge0_language_id: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_language(self) -> crate::models::languages::entities::ProgrammingLanguage {
        use crate::models::languages::entities::ProgrammingLanguage;
        use chrono::{DateTime, Utc};

        ProgrammingLanguage {
            id: self.id,
            display_name: self.display_name,
            language_name: self.language_name,
            piston_name: self.piston_name,
            piston_version: self.piston_version,
            judge0_language_id: self.judge0_language_id,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
