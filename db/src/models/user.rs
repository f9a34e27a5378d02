use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents an account in the `users` table.
///
/// `college_id` is the account's tenant. Authorization always re-reads this
/// row; the value baked into an issued token is never trusted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub college_id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Institutional student number; absent for admin accounts.
    pub student_number: Option<String>,
    pub role: Role,
    /// Deactivated accounts fail authorization even with a live token.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of account roles. Capability checks dispatch on this enum,
/// never on raw strings.
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

impl Role {
    /// Admin capability: plain admins and super admins.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::college::Entity",
        from = "Column::CollegeId",
        to = "super::college::Column::Id"
    )]
    College,
    #[sea_orm(has_many = "super::registration::Entity")]
    Registrations,
}

impl Related<super::college::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::College.def()
    }
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates an account with an argon2-hashed password.
    pub async fn create(
        db: &DbConn,
        college_id: i64,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        student_number: Option<&str>,
        role: Role,
    ) -> Result<Model, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))?
            .to_string();

        let now = Utc::now();
        let user = ActiveModel {
            college_id: Set(college_id),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            student_number: Set(student_number.map(str::to_owned)),
            role: Set(role),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        user.insert(db).await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await
    }

    /// Looks up the account by email and checks the password.
    ///
    /// Returns `None` for both unknown email and wrong password, so callers
    /// cannot distinguish the two.
    pub async fn verify_credentials(
        db: &DbConn,
        email: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        let Some(user) = Self::find_by_email(db, email).await? else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| DbErr::Custom(format!("Corrupt password hash: {e}")))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn set_active(db: &DbConn, user_id: i64, active: bool) -> Result<(), DbErr> {
        let user = ActiveModel {
            id: Set(user_id),
            active: Set(active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        user.update(db).await?;
        Ok(())
    }
}
