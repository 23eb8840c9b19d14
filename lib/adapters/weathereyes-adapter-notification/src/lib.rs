//! Alert rendering and delivery.

pub mod dispatcher;
pub mod render;
pub mod service;

pub use dispatcher::{AlertDispatcher, FlushReport};
pub use render::render_message;
pub use service::NotificationService;
