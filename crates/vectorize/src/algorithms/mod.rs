pub mod preprocessing;
pub mod extraction;
pub mod filtering;
pub mod simplification;

pub use preprocessing::*;
pub use extraction::*;
pub use filtering::*;
pub use simplification::*;
