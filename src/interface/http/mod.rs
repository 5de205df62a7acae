pub mod items_handler;
pub mod problem;
