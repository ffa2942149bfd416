pub mod catalog;
pub mod site;
pub mod specs;

pub use catalog::*;
pub use site::*;
pub use specs::*;
