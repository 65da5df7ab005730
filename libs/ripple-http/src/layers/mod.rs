//! Tower layers for the transport middleware stack

mod user_agent;

pub use user_agent::{UserAgentLayer, UserAgentService};
