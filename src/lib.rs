pub mod app;
pub mod cli;
pub mod layout;
pub mod logging;
pub mod panel;
pub mod realm;
pub mod settings;
pub mod terminal;
pub mod ui;
