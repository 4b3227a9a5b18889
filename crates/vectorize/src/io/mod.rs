pub mod drawing;

pub use drawing::*;
