//! HTTP front end with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Create account, account lists, selector suggestions
//! - routes::details: Account balance lookup
//! - routes::transfer: Funds transfer and confirmation modal
//! - routes::forms: Per-keystroke field edits and notification polling

pub mod error;
pub mod routes;

use axum::http::{Method, StatusCode};
use axum::response::Html;
use axum::{
    routing::{get, post},
    Router,
};
use financeflow_config::Config;
use financeflow_core::{
    shared_form, AccountStore, LookupDraft, NewAccountDraft, SharedForm, TransferDraft, Transport, Workflows,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// The three forms of the single client session
#[derive(Clone)]
pub struct Forms {
    pub create: SharedForm<NewAccountDraft>,
    pub lookup: SharedForm<LookupDraft>,
    pub transfer: SharedForm<TransferDraft>,
}

impl Forms {
    pub fn new(config: &Config) -> Self {
        let ttl = config.notification_ttl();
        Self {
            create: shared_form(ttl),
            lookup: shared_form(ttl),
            transfer: shared_form(ttl),
        }
    }
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub workflows: Workflows,
    pub forms: Forms,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let workflows = Workflows::new(transport, Arc::new(AccountStore::new()));
        Self {
            forms: Forms::new(&config),
            config: Arc::new(config),
            workflows,
        }
    }

    pub fn store(&self) -> &Arc<AccountStore> {
        self.workflows.store()
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, htmx_account_suggest, htmx_create_account, page_add_account};
    use routes::details::{htmx_lookup_account, page_account_details};
    use routes::forms::{htmx_field_edit, htmx_notification};
    use routes::transfer::{htmx_transfer, htmx_transfer_dismiss, page_transfer};

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .layer(create_cors_layer());

    Router::new()
        // HTMX page routes
        .route("/", get(page_add_account))
        .route("/add-account", get(page_add_account).post(htmx_create_account))
        .route("/account-details", get(page_account_details).post(htmx_lookup_account))
        .route("/transfer", get(page_transfer).post(htmx_transfer))
        // HTMX partial routes
        .route("/transfer/dismiss", post(htmx_transfer_dismiss))
        .route("/forms/:form/edit", post(htmx_field_edit))
        .route("/notifications/:form", get(htmx_notification))
        .route("/accounts/suggest", get(htmx_account_suggest))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Anything without a route
async fn not_found(headers: axum::http::HeaderMap) -> (StatusCode, Html<String>) {
    let inner_content = r#"<div class='flex flex-col items-center justify-center py-24 text-gray-600'>
        <h2 class='text-2xl font-bold mb-2'>Page not found</h2>
        <a href='/add-account' class='text-indigo-600 hover:underline'>Back to Add Account</a>
    </div>"#;
    (StatusCode::NOT_FOUND, Html(page_response(&headers, "Not Found", "", inner_content)))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - FinanceFlow</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
        #loader {{ pointer-events: none; }}
        #loader.htmx-request {{ pointer-events: auto; }}
        .busy-label {{ display: none; }}
        .htmx-request .busy-label {{ display: inline; }}
        .htmx-request .idle-label {{ display: none; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    {}
</body>
</html>"#,
        title,
        content,
        selector_script()
    )
}

/// Header with the product name
pub fn header_bar() -> String {
    r#"<header class='border-b border-gray-200 bg-white'>
        <div class='px-4 sm:px-6 lg:px-8'>
            <div class='flex h-16 items-center'>
                <div class='flex items-center space-x-3'>
                    <div class='flex h-10 w-10 items-center justify-center rounded-lg text-2xl'>&#127970;</div>
                    <div>
                        <h1 class='text-xl font-bold'>FinanceFlow</h1>
                        <p class='text-xs hidden sm:block'>Internal Transfer System</p>
                    </div>
                </div>
            </div>
        </div>
    </header>"#
        .to_string()
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/add-account", "Add Account", "&#128179;"),
        ("/account-details", "Account Details", "&#128196;"),
        ("/transfer", "Transfer Funds", "&#8644;"),
    ];

    let mut nav = String::from("<nav class='w-64 bg-white border-r border-gray-200 min-h-[calc(100vh-4rem)] flex-shrink-0'><div class='py-8 px-4'><div class='space-y-2'>");

    for (path, label, icon) in &links {
        let is_active = current_path == *path || (current_path == "/" && *path == "/add-account");
        let active_class = if is_active { "bg-gray-100" } else { "text-gray-700" };
        nav.push_str(&format!(
            r#"<a href='{}' class='flex items-center space-x-4 px-4 py-3 hover:bg-gray-50 rounded-lg {}'><span class='h-5 w-5'>{}</span><span class='text-sm font-medium'>{}</span></a>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</div></div></nav>");
    nav
}

/// Busy overlay shown while any form request is in flight
pub fn loader_overlay() -> &'static str {
    r#"<div id='loader' class='htmx-indicator fixed inset-0 bg-black bg-opacity-30 z-40 flex items-center justify-center'>
        <div class='bg-white rounded-lg p-6 flex items-center gap-3 shadow-lg'>
            <div class='animate-spin rounded-full h-8 w-8 border-b-2 border-indigo-600'></div>
            <span class='text-gray-700'>Loading...</span>
        </div>
    </div>"#
}

/// Client-side behaviour of account selectors
fn selector_script() -> &'static str {
    r#"<script>
        function selectorPopup(inputId) {
            return document.getElementById(inputId + '-suggest');
        }
        function selectorPick(inputId, value) {
            const input = document.getElementById(inputId);
            input.value = value;
            selectorPopup(inputId).innerHTML = '';
            input.dispatchEvent(new Event('change', { bubbles: true }));
        }
        function selectorKey(event, inputId) {
            const popup = selectorPopup(inputId);
            if (event.key === 'Escape') {
                popup.innerHTML = '';
            } else if (event.key === 'Enter') {
                const options = popup.querySelectorAll('[data-value]');
                if (options.length === 1) {
                    event.preventDefault();
                    selectorPick(inputId, options[0].dataset.value);
                }
            } else if (event.key === 'ArrowDown' && !popup.innerHTML.trim()) {
                htmx.trigger(popup, 'selector-open');
            }
        }
        function selectorToggle(inputId) {
            const popup = selectorPopup(inputId);
            if (popup.innerHTML.trim()) {
                popup.innerHTML = '';
            } else {
                htmx.trigger(popup, 'selector-open');
            }
        }
        function selectorClear(inputId) {
            const input = document.getElementById(inputId);
            input.value = '';
            selectorPopup(inputId).innerHTML = '';
            input.dispatchEvent(new Event('change', { bubbles: true }));
        }
        document.addEventListener('mousedown', function(e) {
            document.querySelectorAll('[data-selector]').forEach(function(selector) {
                if (!selector.contains(e.target)) {
                    const popup = selector.querySelector('[data-popup]');
                    if (popup) { popup.innerHTML = ''; }
                }
            });
        });
    </script>"#
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 p-4 sm:p-6 lg:p-8'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='min-h-screen w-screen'>
    {}
    <div class='flex w-full'>
        {}
        <main class='flex-1 p-4 sm:p-6 lg:p-8 min-h-[calc(100vh-4rem)]'>{}</main>
    </div>
    {}
</div>"#,
            header_bar(), nav_sidebar(current_path), inner_content, loader_overlay()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Start the HTTP server
///
/// Binds `server.host:server.port`, serves until Ctrl-C and returns once
/// in-flight requests have drained.
pub async fn start_server(config: Config, transport: Arc<dyn Transport>) -> std::io::Result<()> {
    let addr = config.bind_address();
    let backend = config.backend.base_url.clone();
    let router = create_router(AppState::new(config, transport));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting FinanceFlow on http://{}", addr);
    log::info!("Ledger backend: {}", backend);
    log::info!("Available routes:");
    log::info!("  - /add-account (Create account)");
    log::info!("  - /account-details (Balance lookup)");
    log::info!("  - /transfer (Funds transfer)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use financeflow_core::{lock_form, ApiResponse, Method as HttpMethod};
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Replays canned backend responses in order
    #[derive(Default)]
    struct StubTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn request(&self, _method: HttpMethod, _path: &str, _body: Option<Value>) -> ApiResponse {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| ApiResponse::network_error("no stubbed response"))
        }
    }

    fn app_state(responses: Vec<ApiResponse>) -> AppState {
        let transport = StubTransport { responses: Mutex::new(responses.into()) };
        AppState::new(Config::default(), Arc::new(transport))
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_page(state: &AppState, uri: &str) -> (StatusCode, String) {
        send(state, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(state: &AppState, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(state, request).await
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = app_state(vec![]);
        assert_eq!(get_page(&state, "/api/health").await, (StatusCode::OK, "OK".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_route_is_page_not_found() {
        let state = app_state(vec![]);
        let (status, body) = get_page(&state, "/reports").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_index_renders_layout() {
        let state = app_state(vec![]);
        let (status, body) = get_page(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("FinanceFlow"));
        assert!(body.contains("Internal Transfer System"));
        assert!(body.contains("Create New Account"));
        assert!(body.contains("Recently Added Accounts"));
        assert!(body.contains("No accounts available"));
        assert!(body.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_create_account_flow() {
        let state = app_state(vec![ApiResponse::ok(201, json!("created"))]);
        let (status, body) = post_form(&state, "/add-account", "account_id=12345&initial_balance=1000").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Account 12345 created successfully!"));
        assert!(body.contains("Account Id #12345"));
        assert!(body.contains("hx-swap-oob='true'"));

        let (_, json) = get_page(&state, "/api/accounts").await;
        let accounts: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(accounts[0]["account_id"], 12345);
        assert_eq!(accounts[0]["sync"], "projected");

        let (_, transfer_page) = get_page(&state, "/transfer").await;
        assert!(transfer_page.contains("Available Accounts"));
        assert!(transfer_page.contains("Account Id #12345"));
    }

    #[tokio::test]
    async fn test_create_account_validation_errors() {
        let state = app_state(vec![]);
        let (_, body) = post_form(&state, "/add-account", "account_id=12&initial_balance=-5").await;
        assert!(body.contains("Account ID should be greater then or equal to 3 digit"));
        assert!(body.contains("Initial Balance cannot be negative"));
    }

    #[tokio::test]
    async fn test_lookup_requires_account_id() {
        let state = app_state(vec![]);
        let (_, body) = post_form(&state, "/account-details", "account_id=").await;
        assert!(body.contains("Please enter Account ID"));
    }

    #[tokio::test]
    async fn test_lookup_shows_formatted_balance() {
        let state = app_state(vec![ApiResponse::ok(200, json!({ "account_id": 123, "balance": "5000.50" }))]);
        let (_, body) = post_form(&state, "/account-details", "account_id=123").await;
        assert!(body.contains("Current Balance:"));
        assert!(body.contains("$5,000.5"));
    }

    #[tokio::test]
    async fn test_account_details_preselects_id() {
        let state = app_state(vec![]);
        let (_, body) = get_page(&state, "/account-details?account_id=777").await;
        assert!(body.contains("value='777'"));
        assert_eq!(lock_form(&state.forms.lookup).draft().account_id, "777");
    }

    #[tokio::test]
    async fn test_transfer_failure_message() {
        let state = app_state(vec![ApiResponse::rejected(400, json!("insufficient balance"))]);
        let (_, body) = post_form(
            &state,
            "/transfer",
            "source_account_id=111&destination_account_id=222&amount=50",
        )
        .await;
        assert!(body.contains("Insufficient balance"));
        assert!(!body.contains("transfer-modal"));
    }

    #[tokio::test]
    async fn test_transfer_success_and_dismiss() {
        let state = app_state(vec![ApiResponse::ok(200, json!(""))]);
        let (_, body) = post_form(
            &state,
            "/transfer",
            "source_account_id=111&destination_account_id=222&amount=50",
        )
        .await;
        assert!(body.contains("Transfer Successful"));
        assert!(body.contains("From Account:"));

        let (status, body) = post_form(&state, "/transfer/dismiss", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("transfer-modal"));
    }

    #[tokio::test]
    async fn test_field_edit_filters_digits() {
        let state = app_state(vec![]);
        let (status, body) = post_form(
            &state,
            "/forms/transfer/edit",
            "field=source_account_id&source_account_id=12a3",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("transfer-source_account_id-error"));
        assert_eq!(lock_form(&state.forms.transfer).draft().source_account_id, "123");

        let (status, _) = post_form(&state, "/forms/lookup/edit", "field=amount&amount=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_form(&state, "/forms/settings/edit", "field=amount").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lookup_edit_clears_balance() {
        let state = app_state(vec![]);
        let (_, body) = post_form(&state, "/forms/lookup/edit", "field=account_id&account_id=9").await;
        assert!(body.contains("<div id='lookup-output' hx-swap-oob='true'></div>"));
    }

    #[tokio::test]
    async fn test_notification_endpoint() {
        let state = app_state(vec![]);
        let (status, body) = get_page(&state, "/notifications/lookup").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<div id='lookup-notification'></div>");

        let (status, _) = get_page(&state, "/notifications/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_account_suggestions() {
        let state = app_state(vec![]);
        state.store().record_created(12345, chrono::Utc::now());
        state.store().record_created(777, chrono::Utc::now());

        let (_, body) = get_page(
            &state,
            "/accounts/suggest?form=transfer&field=source_account_id&source_account_id=123",
        )
        .await;
        assert!(body.contains("data-value='12345'"));
        assert!(body.contains("selectorPick('transfer-source_account_id', '12345')"));
        assert!(!body.contains("data-value='777'"));

        let (_, body) = get_page(&state, "/accounts/suggest?form=lookup&field=account_id&account_id=9").await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_account_suggestions_ignore_client_input_id() {
        let state = app_state(vec![]);
        state.store().record_created(12345, chrono::Utc::now());

        let (status, body) = get_page(
            &state,
            "/accounts/suggest?form=lookup&field=account_id&account_id=1&input=x%27)%3Balert(document.cookie)%3B(%27",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("selectorPick('lookup-account_id', '12345')"));
        assert!(!body.contains("alert"));
        assert!(!body.contains("x'"));
        assert!(!body.contains("&#39;"));
    }

    #[tokio::test]
    async fn test_account_suggestions_reject_unknown_selector() {
        let state = app_state(vec![]);
        let (status, _) = get_page(&state, "/accounts/suggest?form=lookup&field=amount&amount=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_page(&state, "/accounts/suggest?form=x%27&field=account_id&account_id=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_page(&state, "/accounts/suggest?field=account_id&account_id=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
