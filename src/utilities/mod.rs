pub mod database;
pub mod fetch_page;
pub mod logging;
