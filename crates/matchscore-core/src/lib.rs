pub mod compatibility;
pub mod direction;
pub mod importance;
pub mod model;
pub mod record;

pub use compatibility::*;
pub use direction::*;
pub use importance::*;
pub use model::*;
pub use record::*;
