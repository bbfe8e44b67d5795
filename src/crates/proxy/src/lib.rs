mod health;
mod mock;
mod request_adapter;

pub use health::{HealthCtx, HealthProxy};
pub use mock::{MockCtx, MockProxy};
pub use request_adapter::adapt as adapt_request;
