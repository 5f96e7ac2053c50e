//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod clock;
pub mod odata;
pub mod speech;

pub use clock::TokioClock;
pub use odata::*;
pub use speech::*;
