//! SQL DDL for initializing the store.
//! SQLite-first; every statement is idempotent so it runs on each startup.

/// Schema with:
/// - `users.email` UNIQUE, `users.role` restricted to the two roles
/// - `internships.posted_by_id` -> `users.id`
/// - `applications` UNIQUE on (student_id, internship_id), both columns foreign keys
///   without cascade: internship deletion removes applications explicitly first
/// - timestamps stored as RFC3339 text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('teacher', 'student')),
    department TEXT NOT NULL,
    designation TEXT NULL,
    roll_number TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS internships (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    link TEXT NOT NULL,
    skills TEXT NULL,
    target_year TEXT NULL,
    pay TEXT NULL,
    positions INTEGER NOT NULL DEFAULT 1,
    posted_by_id INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_internships_posted_by ON internships(posted_by_id);

CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES users(id),
    internship_id INTEGER NOT NULL REFERENCES internships(id),
    status TEXT NOT NULL DEFAULT 'Applied',
    applied_at TEXT NOT NULL,
    UNIQUE (student_id, internship_id)
);

CREATE INDEX IF NOT EXISTS idx_applications_internship ON applications(internship_id);
"#;
