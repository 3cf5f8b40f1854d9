use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// One generated document for a period: a salary slip, an incentive slip or an
/// allowance entry.
///
/// All three fixtures share this shape; only allowance entries carry `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipRecord {
    pub id: String,
    pub year: i32,
    pub month: String,
    /// link to the downloadable PDF
    #[serde(rename = "pdf")]
    pub document_ref: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub allowance_type: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumIter, EnumString, Display, IntoStaticStr)]
pub enum AllowanceType {
    #[strum(serialize = "Father Allowance")]
    Father = 1,
    #[strum(serialize = "Mother Allowance")]
    Mother = 2,
    #[strum(serialize = "Spouse Allowance")]
    Spouse = 3,
}

impl AllowanceType {
    pub fn priority(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Priority of a raw `type` string, 0 when it is not one of the known types.
    pub fn priority_of(raw: &str) -> u8 {
        raw.parse::<AllowanceType>()
            .map(AllowanceType::priority)
            .unwrap_or(0)
    }
}

impl SlipRecord {
    pub fn new(id: &str, year: i32, month: &str, document_ref: &str) -> Self {
        Self {
            id: id.to_string(),
            year,
            month: month.to_string(),
            document_ref: document_ref.to_string(),
            allowance_type: None,
        }
    }

    pub fn with_type(mut self, allowance_type: &str) -> Self {
        self.allowance_type = Some(allowance_type.to_string());
        self
    }
}
