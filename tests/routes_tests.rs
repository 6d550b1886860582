use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum_extra::extract::cookie::Key;
use tower::ServiceExt;

use inkpress::db::{self, BlogStorage};
use inkpress::render::Renderer;
use inkpress::router::{AppState, blog_router};

const TEST_KEY: &[u8] =
    b"an-overlong-development-only-cookie-key-for-the-route-tests-0123456789";

/// The app plus a naive cookie store, so a test can walk a browser-like
/// flow across several requests.
struct Site {
    app: Router,
    db: BlogStorage,
    cookies: HashMap<String, String>,
    db_path: PathBuf,
}

impl Site {
    async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "inkpress-routes-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let pool = db::connect(&database_url)
            .await
            .expect("failed to open database");
        let storage = BlogStorage::new(pool);
        storage.init_schema().await.expect("failed to init schema");

        let renderer = Arc::new(Renderer::new().expect("failed to build renderer"));
        let state = AppState::new(storage.clone(), renderer, Key::from(TEST_KEY));

        Self {
            app: blog_router(state),
            db: storage,
            cookies: HashMap::new(),
            db_path,
        }
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.request("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, form_body: &str) -> Response<Body> {
        self.request("POST", uri, Some(form_body)).await
    }

    async fn request(&mut self, method: &str, uri: &str, form_body: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }

        let request = match form_body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        for header in response.headers().get_all(SET_COOKIE) {
            let header = header.to_str().expect("set-cookie was not utf-8");
            let pair = header.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    self.cookies.remove(name);
                } else {
                    self.cookies.insert(name.to_string(), value.to_string());
                }
            }
        }

        response
    }
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("expected a Location header")
        .to_str()
        .expect("location was not utf-8")
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

const REGISTER_ALICE: &str =
    "name=Alice&username=alice&email=alice%40example.com&password=alicepw&confirm=alicepw";
const LOGIN_ALICE: &str = "username=alice&password=alicepw";
const ARTICLE_T: &str =
    "title=T&title_uk=T-uk&body=twenty-plus-characters-long-body&body_uk=another-twenty-plus-characters-body";

async fn log_in_alice(site: &mut Site) {
    let response = site.post("/register", REGISTER_ALICE).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = site.post("/login", LOGIN_ALICE).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn full_publishing_scenario() {
    let mut site = Site::spawn().await;

    log_in_alice(&mut site).await;

    let response = site.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Signed in as alice"));
    assert!(page.contains("You are now logged in"), "flash should render once");

    let response = site.post("/add_article", ARTICLE_T).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let articles = site.db.list_articles().await.expect("list failed");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "T");
    assert_eq!(articles[0].author, "alice", "author must come from the session");
    let id = articles[0].id;

    let response = site.get("/articles").await;
    let page = body_string(response).await;
    assert!(page.contains(">T<"), "published article should be listed");

    let response = site.post(&format!("/delete_article/{id}"), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(site.db.list_articles().await.expect("list failed").is_empty());

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn protected_routes_redirect_without_session() {
    let mut site = Site::spawn().await;

    for uri in ["/dashboard", "/add_article", "/edit_article/1"] {
        let response = site.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location(&response), "/login", "GET {uri}");
    }

    // a valid form body must not help: the gate runs first
    let response = site.post("/add_article", ARTICLE_T).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(site.db.list_articles().await.expect("list failed").is_empty());

    let response = site.post("/delete_article/1", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn forged_session_cookie_does_not_log_in() {
    let mut site = Site::spawn().await;

    site.cookies.insert(
        "blog_session".to_string(),
        "bm90LWEtcmVhbC1zZXNzaW9u".to_string(),
    );

    let response = site.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn register_password_mismatch_rerenders_and_inserts_nothing() {
    let mut site = Site::spawn().await;

    let response = site
        .post(
            "/register",
            "name=Bob&username=bobby&email=bob%40example.com&password=one&confirm=two",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Passwords do not match"));
    assert!(page.contains("value=\"bobby\""), "entered values re-render");

    assert!(site.db.find_user("bobby").await.expect("find failed").is_none());

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn duplicate_registration_rerenders_with_error() {
    let mut site = Site::spawn().await;

    let response = site.post("/register", REGISTER_ALICE).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = site.post("/register", REGISTER_ALICE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("already taken"));

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn login_error_branches() {
    let mut site = Site::spawn().await;

    let response = site.post("/login", "username=ghost&password=whatever").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Username not found"));

    let response = site.post("/register", REGISTER_ALICE).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = site.post("/login", "username=alice&password=wrong").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Invalid login"));

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut site = Site::spawn().await;

    log_in_alice(&mut site).await;

    let response = site.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = site.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn edit_updates_exactly_the_submitted_fields() {
    let mut site = Site::spawn().await;

    log_in_alice(&mut site).await;

    let response = site.post("/add_article", ARTICLE_T).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let id = site.db.list_articles().await.expect("list failed")[0].id;

    let response = site.get(&format!("/edit_article/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("value=\"T\""), "form pre-populates");

    let response = site
        .post(
            &format!("/edit_article/{id}"),
            "title=T2&title_uk=T2-uk&body=an-edited-body-over-twenty-characters&body_uk=an-edited-uk-body-over-twenty-chars",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let article = site
        .db
        .get_article(id)
        .await
        .expect("get failed")
        .expect("article should exist");
    assert_eq!(article.title, "T2");
    assert_eq!(article.body, "an-edited-body-over-twenty-characters");
    assert_eq!(article.author, "alice", "author is not an editable field");

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn invalid_article_form_rerenders_without_side_effect() {
    let mut site = Site::spawn().await;

    log_in_alice(&mut site).await;

    let response = site
        .post("/add_article", "title=T&title_uk=T-uk&body=short&body_uk=short")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("at least 20 characters"));
    assert!(site.db.list_articles().await.expect("list failed").is_empty());

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn missing_article_renders_not_found() {
    let mut site = Site::spawn().await;

    let response = site.get("/article/12345/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Article not found"));

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn change_language_sets_locale_cookie() {
    let mut site = Site::spawn().await;

    let response = site.get("/change-language/uk").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(site.cookies.get("blog_lang").map(String::as_str), Some("uk"));

    let response = site.get("/").await;
    assert!(body_string(response).await.contains("lang=\"uk\""));

    // unknown names leave the cookie untouched
    let response = site.get("/change-language/tlh").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(site.cookies.get("blog_lang").map(String::as_str), Some("uk"));

    let _ = fs::remove_file(&site.db_path);
}

#[tokio::test]
async fn localized_article_fields_render_per_locale() {
    let mut site = Site::spawn().await;

    log_in_alice(&mut site).await;
    let response = site
        .post(
            "/add_article",
            "title=English-title&title_uk=Ukrainian-title&body=twenty-plus-characters-long-body&body_uk=another-twenty-plus-characters-body",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let id = site.db.list_articles().await.expect("list failed")[0].id;

    let response = site.get(&format!("/article/{id}/")).await;
    assert!(body_string(response).await.contains("English-title"));

    let _ = site.get("/change-language/uk").await;
    let response = site.get(&format!("/article/{id}/")).await;
    let page = body_string(response).await;
    assert!(page.contains("Ukrainian-title"));
    assert!(!page.contains("English-title"));

    let _ = fs::remove_file(&site.db_path);
}
