//! API endpoint modules.

mod tailnet;
mod zone;

pub use tailnet::TailnetApi;
pub use zone::ZoneApi;
