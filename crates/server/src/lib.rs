pub mod cli;
pub mod db;
pub mod progression;
pub mod routes;

mod state;
pub use state::*;
