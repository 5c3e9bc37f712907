pub mod assignments;
pub mod handlers;
pub mod middleware;
pub mod queues;
pub mod routes;
pub mod ws;

pub use routes::create_router;
pub use ws::{WsBroadcaster, WsMessage};
