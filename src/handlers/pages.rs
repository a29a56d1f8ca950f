//! Public entry views. The forms are fixed markup; everything behind the
//! session gate answers with JSON view payloads.

use axum::response::{Html, Redirect};

use crate::error::AppError;
use crate::middleware::auth::LOGIN_PATH;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<h1>Sign in</h1>
<form method="post" action="/login">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Login</button>
</form>
<p><a href="/register">Create an account</a></p>
</body>
</html>
"#;

const REGISTER_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Register</title></head>
<body>
<h1>Register</h1>
<form method="post" action="/register">
  <label>Full name <input name="name" required></label>
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" minlength="6" required></label>
  <label>Role
    <select name="role">
      <option value="student">Student</option>
      <option value="teacher">Teacher</option>
    </select>
  </label>
  <label>Department <input name="dept" required></label>
  <label>Designation (teachers) <input name="designation"></label>
  <label>Year (students) <input name="year"></label>
  <button type="submit">Register</button>
</form>
<p><a href="/login">Already registered?</a></p>
</body>
</html>
"#;

pub async fn index() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

pub async fn register_page() -> Html<&'static str> {
    Html(REGISTER_PAGE)
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
