//! The client: request dispatch and the domain operations built on it.

mod api;
mod dispatcher;
pub mod events;

pub use api::ShieldCortex;
pub use dispatcher::RequestDispatcher;
