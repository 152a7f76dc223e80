pub mod service;
pub mod view;

pub use service::*;
pub use view::*;
