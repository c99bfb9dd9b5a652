mod device;
mod record;

pub use device::*;
pub use record::*;
