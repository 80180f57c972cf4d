pub mod model;
pub use model::*;
pub mod network;
pub use network::*;
pub mod graph;
pub use graph::*;
pub mod spatial;
pub use spatial::*;
