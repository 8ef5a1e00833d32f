pub mod params;
pub mod state;
pub mod tokens;

pub use tokens::Tokens;
