mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

mod plan;
pub use plan::*;

mod weight_history;
pub use weight_history::*;

mod schedule;
pub use schedule::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement returned by delete routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
