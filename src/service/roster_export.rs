//! Spreadsheet export of an internship's applicant roster.

use rust_xlsxwriter::{Format, Workbook};

use crate::db::models::Roster;
use crate::error::AppError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_NAME: &str = "Applicants";

/// Fixed column layout of the export.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Internship",
    "Name",
    "Email",
    "Department",
    "Year",
    "Status",
    "Applied At",
];

const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn export_file_name(roster: &Roster) -> String {
    format!("applicants_{}.xlsx", roster.internship.id)
}

/// One row per applicant, cells in `EXPORT_COLUMNS` order.
pub fn export_rows(roster: &Roster) -> Vec<[String; 7]> {
    roster
        .applicants
        .iter()
        .map(|a| {
            [
                roster.internship.title.clone(),
                a.full_name.clone(),
                a.email.clone(),
                a.department.clone(),
                a.roll_number.clone().unwrap_or_default(),
                a.status.clone(),
                a.applied_at.format(APPLIED_AT_FORMAT).to_string(),
            ]
        })
        .collect()
}

/// Render the roster as an in-memory `.xlsx` workbook: bold header row, then data.
pub fn build_workbook(roster: &Roster) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, 22)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (row, cells) in export_rows(roster).iter().enumerate() {
        let row = row as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            sheet.write(row, col as u16, cell.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{DepartmentCount, Internship, RosterEntry};
    use chrono::{TimeZone, Utc};

    fn roster() -> Roster {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
        let entry = |id: i64, name: &str, dept: &str, year: Option<&str>| RosterEntry {
            application_id: id,
            student_id: id + 100,
            full_name: name.to_string(),
            email: format!("{}@college.edu", name.to_lowercase()),
            department: dept.to_string(),
            roll_number: year.map(str::to_string),
            status: "Applied".to_string(),
            applied_at: at,
        };
        Roster {
            internship: Internship {
                id: 7,
                title: "Data Intern".to_string(),
                link: "https://example.com/data".to_string(),
                skills: None,
                target_year: None,
                pay: None,
                positions: 2,
                posted_by_id: 1,
                created_at: at,
            },
            applicants: vec![
                entry(1, "Meera", "CSE", Some("3")),
                entry(2, "Kabir", "ECE", None),
            ],
            department_stats: vec![
                DepartmentCount {
                    department: "CSE".to_string(),
                    count: 1,
                },
                DepartmentCount {
                    department: "ECE".to_string(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn one_row_per_applicant_in_fixed_column_order() {
        let rows = export_rows(&roster());
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            [
                "Data Intern".to_string(),
                "Meera".to_string(),
                "meera@college.edu".to_string(),
                "CSE".to_string(),
                "3".to_string(),
                "Applied".to_string(),
                "2025-03-04 09:30".to_string(),
            ]
        );
        assert_eq!(rows[1][4], "");
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let bytes = build_workbook(&roster()).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert_eq!(export_file_name(&roster()), "applicants_7.xlsx");
    }
}
