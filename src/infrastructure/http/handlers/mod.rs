//! HTTP Handlers

mod dictionary;
mod ping;
mod speech;

pub use dictionary::*;
pub use ping::*;
pub use speech::*;
