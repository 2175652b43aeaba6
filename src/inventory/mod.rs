pub mod memory;
pub mod traits;

pub use memory::InMemoryInventory;
pub use traits::CarInventory;
