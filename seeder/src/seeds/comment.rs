use crate::seed::Seeder;
use db::{
    filters::TicketFilter,
    models::{ticket_comments::Model as CommentModel, tickets::Model as TicketModel},
};
use sea_orm::{DatabaseConnection, DbErr};

pub struct CommentSeeder;

const PUBLIC_REPLIES: [&str; 3] = [
    "Thanks, looking into it now.",
    "Could you try again and let us know?",
    "This should be fixed, please confirm.",
];

const INTERNAL_NOTES: [&str; 2] = [
    "Likely the same root cause as last week's outage.",
    "Escalate to infrastructure if it happens again.",
];

#[async_trait::async_trait]
impl Seeder for CommentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let tickets = TicketModel::find_all(db, &TicketFilter::new()).await?;

        for ticket in tickets {
            CommentModel::create(db, ticket.id, ticket.created_by, "Any update on this?", false)
                .await?;

            let Some(agent) = ticket.assigned_to else {
                continue;
            };
            let reply = PUBLIC_REPLIES[fastrand::usize(..PUBLIC_REPLIES.len())];
            CommentModel::create(db, ticket.id, agent, reply, false).await?;

            if fastrand::bool() {
                let note = INTERNAL_NOTES[fastrand::usize(..INTERNAL_NOTES.len())];
                CommentModel::create(db, ticket.id, agent, note, true).await?;
            }
        }

        Ok(())
    }
}
