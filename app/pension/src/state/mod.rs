pub mod controls;
pub mod form;
pub mod pending;
pub mod snapshot;

pub use controls::*;
pub use form::*;
pub use pending::*;
pub use snapshot::*;
