pub mod controller;
pub mod engine;
pub mod fallback;
pub mod target;

#[cfg(test)]
mod fake;

pub use controller::*;
pub use engine::*;
pub use fallback::*;
pub use target::*;
