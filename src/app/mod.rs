pub mod bootstrap;
pub mod cli;
pub mod command_handlers;
pub mod submission;
