use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::user::{Model as UserModel, Role};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // College 1 gets the full cast; college 2 a skeleton crew.
        UserModel::create(
            db,
            1,
            "root@crestwood.edu",
            "password",
            "Rory",
            "Root",
            None,
            Role::SuperAdmin,
        )
        .await?;
        UserModel::create(
            db,
            1,
            "events@crestwood.edu",
            "password",
            "Erin",
            "Eventson",
            None,
            Role::Admin,
        )
        .await?;

        for i in 1..=8 {
            UserModel::create(
                db,
                1,
                &format!("student{i}@crestwood.edu"),
                "password",
                &format!("Student{i}"),
                "Crestwood",
                Some(&format!("C{:07}", i)),
                Role::Student,
            )
            .await?;
        }

        UserModel::create(
            db,
            2,
            "events@brookfield.edu",
            "password",
            "Blake",
            "Brooks",
            None,
            Role::Admin,
        )
        .await?;
        UserModel::create(
            db,
            2,
            "student1@brookfield.edu",
            "password",
            "Bailey",
            "Brookfield",
            Some("B0000001"),
            Role::Student,
        )
        .await?;

        Ok(())
    }
}
