use crate::seed::Seeder;
use db::models::category::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct CategorySeeder;

#[async_trait::async_trait]
impl Seeder for CategorySeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let categories = [
            ("Hardware", "Laptops, monitors, peripherals", "#ef4444"),
            ("Software", "Installs, licences, crashes", "#3b82f6"),
            ("Network", "VPN, Wi-Fi, connectivity", "#10b981"),
            ("Accounts", "Access and passwords", "#f59e0b"),
        ];

        for (name, description, color) in categories {
            if !Model::name_taken(db, name, None).await? {
                Model::create(db, name, Some(description), Some(color)).await?;
            }
        }

        Ok(())
    }
}
