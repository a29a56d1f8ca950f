#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use axum_extra::extract::cookie::Key;
use internhub::db::Storage;
use internhub::server::router::{AppState, app_router};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

static DB_SEQ: AtomicUsize = AtomicUsize::new(0);

/// The full router over a throwaway SQLite file.
pub struct TestApp {
    pub app: Router,
    pub store: Storage,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "internhub-test-{}-{}-{}.sqlite",
            std::process::id(),
            nanos,
            DB_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let store = Storage::connect(&database_url, 4)
            .await
            .expect("failed to open test database");
        let state = AppState::new(store.clone(), Key::generate(), true);

        Self {
            app: app_router(state),
            store,
            db_path,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(req)
            .await
            .expect("request failed")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("failed to build request"))
            .await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).expect("failed to build request"))
            .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        dept: &str,
    ) -> Response<Body> {
        self.post_form(
            "/register",
            &[
                ("name", name),
                ("email", email),
                ("password", password),
                ("role", role),
                ("dept", dept),
                ("designation", ""),
                ("year", ""),
            ],
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response<Body> {
        self.post_form("/login", &[("email", email), ("password", password)], None)
            .await
    }

    /// Register and log in; returns the `user=...` cookie pair.
    pub async fn sign_up(&self, name: &str, email: &str, role: &str, dept: &str) -> String {
        let resp = self.register(name, email, "s3cret-pass", role, dept).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "register {email}");
        let resp = self.login(email, "s3cret-pass").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login {email}");
        session_cookie(&resp).expect("login did not set a session cookie")
    }

    /// Post an internship as `teacher` and return its id.
    pub async fn post_internship(&self, teacher: &str, title: &str) -> i64 {
        let resp = self
            .post_form(
                "/post-internship",
                &[
                    ("title", title),
                    ("link", "https://careers.example.com/apply"),
                    ("skills", "Rust, SQL"),
                    ("target_year", "3"),
                    ("pay", "12000/month"),
                    ("positions", "2"),
                ],
                Some(teacher),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let dash = body_json(self.get("/teacher-dash", Some(teacher)).await).await;
        dash["internships"]
            .as_array()
            .expect("internships array")
            .iter()
            .find(|i| i["title"] == title)
            .and_then(|i| i["id"].as_i64())
            .expect("posted internship missing from dashboard")
    }

    /// Ids of the caller's applications, newest first.
    pub async fn my_application_ids(&self, student: &str) -> Vec<i64> {
        let body = body_json(self.get("/my-applications", Some(student)).await).await;
        body["apps"]
            .as_array()
            .expect("apps array")
            .iter()
            .filter_map(|a| a["id"].as_i64())
            .collect()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.db_path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}

/// The `user=<sealed>` pair from a response's `Set-Cookie` headers.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("user="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}
