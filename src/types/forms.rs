//! Form payloads posted by the browser and the validated inputs derived from them.

use serde::Deserialize;
use url::Url;

use crate::error::AppError;
use crate::types::identity::Role;

const MIN_PASSWORD_LEN: usize = 6;
const MAX_STATUS_LEN: usize = 64;

// Required text fields default to empty so a missing field surfaces as a
// field-level validation error instead of a form rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub dept: String,
    pub designation: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dept: String,
    pub designation: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InternshipForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    pub skills: Option<String>,
    pub target_year: Option<String>,
    pub pay: Option<String>,
    pub positions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department: String,
    pub designation: Option<String>,
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub department: String,
    pub designation: Option<String>,
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewInternship {
    pub title: String,
    pub link: String,
    pub skills: Option<String>,
    pub target_year: Option<String>,
    pub pay: Option<String>,
    pub positions: i64,
}

/// Blank optional inputs are stored as NULL.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(field: &'static str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, format!("`{field}` is required")));
    }
    Ok(value.to_string())
}

/// Emails are compared case-insensitively by storing them lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl RegisterForm {
    pub fn validate(self) -> Result<NewUser, AppError> {
        let full_name = required("name", &self.name)?;
        let email = normalize_email(&required("email", &self.email)?);
        if !email.contains('@') {
            return Err(AppError::validation("email", "not a valid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        let role: Role = self
            .role
            .parse()
            .map_err(|_| AppError::validation("role", "must be `teacher` or `student`"))?;
        let department = required("dept", &self.dept)?;

        Ok(NewUser {
            full_name,
            email,
            password: self.password,
            role,
            department,
            designation: non_empty(self.designation),
            roll_number: non_empty(self.year),
        })
    }
}

impl ProfileForm {
    pub fn validate(self) -> Result<ProfileUpdate, AppError> {
        Ok(ProfileUpdate {
            full_name: required("name", &self.name)?,
            department: required("dept", &self.dept)?,
            designation: non_empty(self.designation),
            roll_number: non_empty(self.year),
        })
    }
}

impl InternshipForm {
    pub fn validate(self) -> Result<NewInternship, AppError> {
        let title = required("title", &self.title)?;
        let link = required("link", &self.link)?;
        match Url::parse(&link) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(AppError::validation("link", "must be an http(s) URL")),
        }
        let positions = match non_empty(self.positions) {
            None => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::validation(
                        "positions",
                        "must be a whole number of at least 1",
                    ));
                }
            },
        };

        Ok(NewInternship {
            title,
            link,
            skills: non_empty(self.skills),
            target_year: non_empty(self.target_year),
            pay: non_empty(self.pay),
            positions,
        })
    }
}

impl StatusForm {
    pub fn validate(self) -> Result<String, AppError> {
        let status = required("status", &self.status)?;
        if status.chars().count() > MAX_STATUS_LEN {
            return Err(AppError::validation(
                "status",
                format!("must be at most {MAX_STATUS_LEN} characters"),
            ));
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Asha Rao".to_string(),
            email: " Asha@Example.com ".to_string(),
            password: "hunter22".to_string(),
            role: "student".to_string(),
            dept: "CSE".to_string(),
            designation: Some(String::new()),
            year: Some("  ".to_string()),
        }
    }

    #[test]
    fn register_normalizes_email_and_blank_optionals() {
        let user = register_form().validate().unwrap();
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.designation, None);
        assert_eq!(user.roll_number, None);
    }

    #[test]
    fn register_reports_offending_field() {
        let mut form = register_form();
        form.role = "principal".to_string();
        match form.validate() {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "role"),
            other => panic!("unexpected: {other:?}"),
        }

        let mut form = register_form();
        form.dept = String::new();
        match form.validate() {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "dept"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn profile_year_empty_string_becomes_none() {
        let update = ProfileForm {
            name: "Asha".to_string(),
            dept: "ECE".to_string(),
            designation: None,
            year: Some(String::new()),
        }
        .validate()
        .unwrap();
        assert_eq!(update.roll_number, None);
    }

    #[test]
    fn internship_link_must_be_http() {
        let form = InternshipForm {
            title: "Backend intern".to_string(),
            link: "ftp://jobs.example.com".to_string(),
            skills: None,
            target_year: None,
            pay: None,
            positions: None,
        };
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation { field: "link", .. })
        ));
    }

    #[test]
    fn internship_positions_default_and_bounds() {
        let mut form = InternshipForm {
            title: "Backend intern".to_string(),
            link: "https://jobs.example.com/42".to_string(),
            skills: Some("Rust, SQL".to_string()),
            target_year: Some("3".to_string()),
            pay: Some("15000/month".to_string()),
            positions: Some(String::new()),
        };
        assert_eq!(form.validate().unwrap().positions, 1);

        form = InternshipForm {
            title: "Backend intern".to_string(),
            link: "https://jobs.example.com/42".to_string(),
            skills: None,
            target_year: None,
            pay: None,
            positions: Some("0".to_string()),
        };
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation {
                field: "positions",
                ..
            })
        ));
    }
}
