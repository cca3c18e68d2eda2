//! Property repository module.

mod r#trait;
pub use r#trait::PropertyRepository;

mod mock;
pub use mock::MockPropertyRepository;
