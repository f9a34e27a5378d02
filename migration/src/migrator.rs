use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202603010001_create_colleges::Migration),
            Box::new(migrations::m202603010002_create_users::Migration),
            Box::new(migrations::m202603010003_create_events::Migration),
            Box::new(migrations::m202603010004_create_registrations::Migration),
            Box::new(migrations::m202603010005_create_attendance::Migration),
            Box::new(migrations::m202603010006_create_feedback::Migration),
            Box::new(migrations::m202603010007_create_notes::Migration),
        ]
    }
}
