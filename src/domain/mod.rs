pub mod community;
pub mod device;
pub mod energy;
pub mod profile;
pub mod recommendation;
pub mod scenario;

pub use community::*;
pub use device::*;
pub use energy::*;
pub use profile::*;
pub use recommendation::*;
pub use scenario::*;
