pub mod booking_repository;
pub mod dock_registry;
pub mod repository_trait;

pub use booking_repository::*;
pub use dock_registry::*;
pub use repository_trait::*;
