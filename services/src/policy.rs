//! Access & lifecycle policy.
//!
//! Pure decisions over an [`Actor`] and entity snapshots: who can see a
//! ticket, who can manage it, which status changes are allowed, who can
//! comment and assign, and who administers categories and roles.
//!
//! Nothing here touches the database or fails. A denial is `false` or an
//! empty collection; callers turn that into an error or hide the action. The
//! store's foreign keys remain the last line of enforcement, and concurrent
//! claims are settled by last-write-wins on the ticket row, so a `true` from
//! [`can_manage`] is only as fresh as the snapshot it was computed from.

use db::models::{
    ticket_comments::Model as CommentModel,
    tickets::{Model as TicketModel, TicketStatus},
    user::{Model as UserModel, Role},
};

/// The identity a request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

impl From<&UserModel> for Actor {
    fn from(user: &UserModel) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}

/// Whether `role` sees every ticket rather than only its own.
pub fn can_view_all_tickets(role: Role) -> bool {
    match role {
        Role::User => false,
        Role::Agent | Role::Admin => true,
    }
}

/// A ticket is always visible to its creator; staff see everything.
pub fn can_view(actor: Actor, ticket: &TicketModel) -> bool {
    ticket.created_by == actor.user_id || can_view_all_tickets(actor.role)
}

pub fn visible_tickets(actor: Actor, tickets: Vec<TicketModel>) -> Vec<TicketModel> {
    tickets.into_iter().filter(|t| can_view(actor, t)).collect()
}

/// Single-claim-or-admin-override.
///
/// Admins manage everything. An agent manages a ticket that is unassigned
/// (and may claim it) or assigned to them. Users never manage.
pub fn can_manage(actor: Actor, ticket: &TicketModel) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Agent => ticket
            .assigned_to
            .is_none_or(|assignee| assignee == actor.user_id),
        Role::User => false,
    }
}

/// Any change between distinct statuses for staff; nothing for users.
pub fn allowed_status_transition(role: Role, from: TicketStatus, to: TicketStatus) -> bool {
    match role {
        Role::User => false,
        Role::Agent | Role::Admin => from != to,
    }
}

pub fn can_comment(actor: Actor, ticket: &TicketModel, internal: bool) -> bool {
    if !can_view(actor, ticket) {
        return false;
    }
    !internal || can_post_internal(actor.role)
}

pub fn can_post_internal(role: Role) -> bool {
    can_see_internal(role)
}

pub fn can_see_internal(role: Role) -> bool {
    match role {
        Role::User => false,
        Role::Agent | Role::Admin => true,
    }
}

pub fn comment_visible(role: Role, comment: &CommentModel) -> bool {
    !comment.is_internal || can_see_internal(role)
}

/// Drops internal comments for roles that may not read them.
///
/// Each comment travels with whatever was loaded alongside it (its author,
/// or `()`), which is kept untouched.
pub fn visible_comments<A>(
    role: Role,
    comments: Vec<(CommentModel, A)>,
) -> Vec<(CommentModel, A)> {
    comments
        .into_iter()
        .filter(|(c, _)| comment_visible(role, c))
        .collect()
}

pub fn can_assign(role: Role) -> bool {
    match role {
        Role::User => false,
        Role::Agent | Role::Admin => true,
    }
}

/// Whether a user holding `role` may be set as a ticket's assignee.
pub fn is_assignable(role: Role) -> bool {
    match role {
        Role::User => false,
        Role::Agent | Role::Admin => true,
    }
}

pub fn assignable_candidates(users: Vec<UserModel>) -> Vec<UserModel> {
    users.into_iter().filter(|u| is_assignable(u.role)).collect()
}

pub fn can_manage_categories(role: Role) -> bool {
    matches!(role, Role::Admin)
}

pub fn can_manage_user_roles(role: Role) -> bool {
    matches!(role, Role::Admin)
}
