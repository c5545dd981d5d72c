use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    category::CategorySeeder, comment::CommentSeeder, ticket::TicketSeeder, user::UserSeeder,
};
use colored::*;
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to connect:".red());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to migrate:".red());
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CategorySeeder), "Category"),
        (Box::new(TicketSeeder), "Ticket"),
        (Box::new(CommentSeeder), "Comment"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
