use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutsideExperience {
    pub total: String,
    pub relevant: String,
}

/// Employee profile as shipped in `profile.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub employee_code: String,
    pub date_of_birth: String,
    pub gender: String,
    pub date_of_joining: String,
    pub group_joining_date: String,
    pub years_in_company: String,
    pub outside_experience: OutsideExperience,
    pub qualification_index: String,
    pub company: String,
    pub division: String,
    pub sub_division: String,
    pub job_type: String,
    pub job_category: String,
    pub reporting_person: String,
    pub designation: String,
    pub hourly_rate: String,
    pub reporting_time: String,
    pub monitoring: String,
}
