mod auth_test;
mod categories_test;
mod comments_test;
mod health_test;
mod me_test;
mod tickets_test;
mod users_test;
