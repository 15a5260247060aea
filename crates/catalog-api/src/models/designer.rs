use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designer {
    #[serde(rename = "designer_id")]
    pub id: String,
    pub name: String,
}
