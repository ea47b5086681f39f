//! Catalogue client shell: configuration, session, navigation and the page
//! controllers a renderer drives.

pub mod config;
pub mod error;
pub mod in_flight;
pub mod pages;
pub mod route;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use route::{Navigation, Route};
pub use session::Session;
