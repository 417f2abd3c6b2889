pub mod user_handlers;
