use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::college;
use sea_orm::{DatabaseConnection, DbErr};

pub struct CollegeSeeder;

#[async_trait]
impl Seeder for CollegeSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for name in ["Crestwood College", "Brookfield College"] {
            college::Model::create(db, name).await?;
        }
        Ok(())
    }
}
