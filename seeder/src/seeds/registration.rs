use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::{event, registration};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

pub struct RegistrationSeeder;

#[async_trait]
impl Seeder for RegistrationSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Overfill the small event (capacity 3) so the waitlist has entries
        // to look at in development.
        let Some(small) = event::Entity::find_by_id(3).one(db).await? else {
            return Err(DbErr::Custom("EventSeeder must run first".into()));
        };

        // users 3..=10 are the seeded Crestwood students
        for student_id in 3..=8 {
            registration::Model::admit(db, &small, student_id)
                .await
                .map_err(|e| DbErr::Custom(format!("Seed admission failed: {e}")))?;
        }

        Ok(())
    }
}
