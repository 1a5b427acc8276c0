pub mod animation;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod leaderboard;
pub mod resolver;
pub mod result;
pub mod scene;
pub mod scorer;
pub mod session;
pub mod sim;
pub mod timeline;
pub mod trial;

pub use error::{DartError, DgResult};
// cmd and reports belong to the binary (main.rs).
