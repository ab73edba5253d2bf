pub mod handlers;
pub mod recommendations;
