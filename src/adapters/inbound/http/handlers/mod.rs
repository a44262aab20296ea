pub mod feed_handlers;

pub use feed_handlers::*;
