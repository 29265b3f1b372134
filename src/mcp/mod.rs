mod server;
mod types;

pub use server::TechSvgMcp;
pub use types::*;
