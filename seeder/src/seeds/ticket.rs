use crate::seed::Seeder;
use db::models::{
    category::Model as CategoryModel,
    tickets::{Model as TicketModel, TicketPriority, TicketStatus},
    user::{Model as UserModel, Role},
};
use sea_orm::{DatabaseConnection, DbErr, Iterable};

pub struct TicketSeeder;

const TITLES: [&str; 6] = [
    "Cannot connect to VPN",
    "Laptop will not boot",
    "Password reset not arriving",
    "Printer jams on tray 2",
    "Editor crashes on save",
    "Request access to shared drive",
];

const DESCRIPTIONS: [&str; 4] = [
    "Started this morning, nothing changed on my side.",
    "Happens every time, screenshots attached.",
    "Colleagues on the same floor see it too.",
    "Blocking work on a deadline this week.",
];

fn pick<T: Copy>(items: &[T]) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[fastrand::usize(..items.len())])
    }
}

#[async_trait::async_trait]
impl Seeder for TicketSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let users: Vec<i64> = UserModel::find_with_roles(db, &[Role::User])
            .await?
            .iter()
            .map(|u| u.id)
            .collect();
        let agents: Vec<i64> = UserModel::find_with_roles(db, &[Role::Agent, Role::Admin])
            .await?
            .iter()
            .map(|u| u.id)
            .collect();
        let categories: Vec<i64> = CategoryModel::find_all(db)
            .await?
            .iter()
            .map(|c| c.id)
            .collect();
        let priorities: Vec<TicketPriority> = TicketPriority::iter().collect();
        let statuses: Vec<TicketStatus> = TicketStatus::iter().collect();

        if users.is_empty() {
            return Err(DbErr::Custom("no users to own tickets; run the user seeder first".into()));
        }

        for _ in 0..40 {
            let (Some(owner), Some(title), Some(description)) =
                (pick(&users), pick(&TITLES), pick(&DESCRIPTIONS))
            else {
                continue;
            };
            let priority = pick(&priorities).unwrap_or_default();
            let category = if fastrand::bool() { pick(&categories) } else { None };

            let ticket =
                TicketModel::create(db, owner, title, description, priority, category).await?;

            // Roughly half get picked up by staff and moved along.
            if fastrand::bool() {
                if let Some(agent) = pick(&agents) {
                    TicketModel::set_assignee(db, ticket.id, Some(agent)).await?;
                    if let Some(status) = pick(&statuses).filter(|s| *s != TicketStatus::Open) {
                        TicketModel::set_status(db, ticket.id, status).await?;
                    }
                }
            }
        }

        Ok(())
    }
}
