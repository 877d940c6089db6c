//! Console front-end: a numbered menu read line by line from any reader.

mod forms;
mod helpers;
mod menu;
mod session;
mod terminal;

pub use session::Session;
pub use terminal::run_app;

pub use helpers::describe_error;
