pub mod category;
pub mod ticket_comments;
pub mod tickets;
pub mod user;

pub use category::Entity as Category;
pub use ticket_comments::Entity as TicketComment;
pub use tickets::Entity as Ticket;
pub use user::Entity as User;
