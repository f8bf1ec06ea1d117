use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{check_all, ValidateModel},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordWeight {
    pub weight: f64,
}

impl ValidateModel for RecordWeight {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([(self.weight > 0.0, "weight must be positive")])
    }
}
