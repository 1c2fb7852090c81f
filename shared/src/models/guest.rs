//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest details embedded in a booking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub document_id: Option<String>,
}
