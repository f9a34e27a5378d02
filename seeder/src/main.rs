use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    college::CollegeSeeder, event::EventSeeder, registration::RegistrationSeeder, user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(CollegeSeeder) as Box<dyn Seeder + Send + Sync>, "College"),
        (Box::new(UserSeeder), "User"),
        (Box::new(EventSeeder), "Event"),
        (Box::new(RegistrationSeeder), "Registration"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
