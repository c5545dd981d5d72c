use crate::seed::Seeder;
use db::models::user::{Model, Role};
use fake::{Fake, faker::internet::en::SafeEmail};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed accounts, one per role
        for (email, username, role) in [
            ("admin@example.com", "admin", Role::Admin),
            ("agent@example.com", "agent", Role::Agent),
            ("agent2@example.com", "agent2", Role::Agent),
            ("user@example.com", "user", Role::User),
        ] {
            if !Model::email_taken(db, email).await? {
                Model::create(db, email, username, "password123", role).await?;
            }
        }

        // Random users
        for _ in 0..10 {
            let email: String = SafeEmail().fake();
            let username = format!("user{:06}", fastrand::u32(..1_000_000));
            if Model::email_taken(db, &email).await?
                || Model::username_taken(db, &username, None).await?
            {
                continue;
            }
            Model::create(db, &email, &username, "password123", Role::User).await?;
        }

        Ok(())
    }
}
