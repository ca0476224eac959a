pub mod env;
pub mod fallback;
pub mod geo;
pub mod id;
pub mod let_also;
