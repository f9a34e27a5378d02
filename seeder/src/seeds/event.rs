use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use db::models::event::{Model as EventModel, Status};
use sea_orm::{DatabaseConnection, DbErr};

pub struct EventSeeder;

#[async_trait]
impl Seeder for EventSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // user 2 is the Crestwood events admin seeded by UserSeeder
        let admin_id = 2;
        let plan: [(&str, &str, i32, i64); 4] = [
            ("Freshers Fair", "social", 200, 7),
            ("Intro to Rust", "tech", 30, 10),
            ("Open Mic Night", "social", 3, 14),
            ("Career Workshop", "careers", 50, 21),
        ];

        for (title, category, capacity, days_out) in plan {
            EventModel::create(
                db,
                1,
                admin_id,
                title,
                Some("Seeded development event"),
                Some(category),
                Utc::now() + Duration::days(days_out),
                "Crestwood Campus",
                capacity,
                Status::Active,
            )
            .await?;
        }

        Ok(())
    }
}
