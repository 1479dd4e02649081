pub mod clock;
pub mod config;
pub mod db;
pub mod game;
pub mod handlers;
pub mod paths;
pub mod srs;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
