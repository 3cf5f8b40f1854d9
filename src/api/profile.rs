use serde::Serialize;

use crate::model::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileField {
    pub label: &'static str,
    pub value: String,
    pub highlight: bool,
    pub has_info: bool,
}

fn field(label: &'static str, value: &str) -> ProfileField {
    ProfileField {
        label,
        value: if value.trim().is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        },
        highlight: false,
        has_info: false,
    }
}

fn highlighted(label: &'static str, value: &str) -> ProfileField {
    ProfileField {
        highlight: true,
        ..field(label, value)
    }
}

/// Profile rows in display order. Empty values show as "-".
pub fn profile_fields(profile: &Profile) -> Vec<ProfileField> {
    let experience = format!(
        "Total Exp : {}, Relevant Exp : {}",
        profile.outside_experience.total, profile.outside_experience.relevant
    );

    vec![
        field("Employee Code", &profile.employee_code),
        field("Date of Birth", &profile.date_of_birth),
        field("Gender", &profile.gender),
        field("Date of Joining", &profile.date_of_joining),
        field("Group Joining Date", &profile.group_joining_date),
        highlighted("Years in Company", &profile.years_in_company),
        field("Outside Experience", &experience),
        ProfileField {
            has_info: true,
            ..field("Qualification Index", &profile.qualification_index)
        },
        field("Company", &profile.company),
        field("Division", &profile.division),
        field("SubDivision", &profile.sub_division),
        field("Job Type", &profile.job_type),
        highlighted("Job Category", &profile.job_category),
        highlighted("Reporting Person", &profile.reporting_person),
        field("Designation", &profile.designation),
        field("Hourly Rate", &profile.hourly_rate),
        field("Reporting Time", &profile.reporting_time),
        field("Monitoring", &profile.monitoring),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_display_order_and_fill_blanks() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "employeeCode": "EMP-0042",
                "designation": "Engineer",
                "reportingPerson": "John Roe",
                "outsideExperience": {"total": "2.7", "relevant": "0"},
                "monitoring": ""
            }"#,
        )
        .unwrap();

        let rows = profile_fields(&profile);
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0].label, "Employee Code");
        assert_eq!(rows[0].value, "EMP-0042");
        assert_eq!(rows[6].value, "Total Exp : 2.7, Relevant Exp : 0");
        assert!(rows[7].has_info);

        let reporting = rows.iter().find(|r| r.label == "Reporting Person").unwrap();
        assert!(reporting.highlight);
        assert_eq!(rows.last().unwrap().value, "-");
        assert_eq!(rows[2].value, "-");
    }
}
