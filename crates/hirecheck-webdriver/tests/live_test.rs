//! Live WebDriver integration tests
//!
//! These tests require a running chromedriver (default port 9515) and
//! network access. Run sequentially via `#[serial]` to avoid session
//! contention.

use hirecheck_core::Locator;
use hirecheck_engine::driver::Driver;
use hirecheck_webdriver::WebDriverSession;
use serial_test::serial;

const WEBDRIVER_URL: &str = "http://localhost:9515";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
#[serial]
#[ignore] // Requires chromedriver on :9515
async fn session_lifecycle() {
    init_tracing();
    let mut session = WebDriverSession::new(WEBDRIVER_URL);

    session.launch().await.expect("Failed to launch session");

    session
        .navigate("https://example.com")
        .await
        .expect("Navigation failed");
    let url = session.current_url().await.expect("current_url failed");
    assert!(url.contains("example.com"));

    session.close().await.expect("Close failed");
}

#[tokio::test]
#[serial]
#[ignore] // Requires chromedriver on :9515
async fn resolves_heading_and_text() {
    init_tracing();
    let mut session = WebDriverSession::new(WEBDRIVER_URL);
    session.launch().await.expect("Failed to launch session");
    session
        .navigate("https://example.com")
        .await
        .expect("Navigation failed");

    let heading = Locator::role("heading", "Example Domain");
    assert!(session.is_visible(&heading).await.expect("is_visible failed"));

    let text = session
        .text_of(&Locator::text("Example Domain"))
        .await
        .expect("text_of failed");
    assert!(text.contains("Example Domain"));

    // Nothing on the page matches this.
    let missing = Locator::text("Inscrição enviada com sucesso!");
    assert!(!session.is_visible(&missing).await.expect("is_visible failed"));

    let _ = session.close().await;
}

#[tokio::test]
#[serial]
#[ignore] // Requires chromedriver on :9515
async fn screenshot_returns_png_bytes() {
    init_tracing();
    let mut session = WebDriverSession::new(WEBDRIVER_URL);
    session.launch().await.expect("Failed to launch session");
    session
        .navigate("https://example.com")
        .await
        .expect("Navigation failed");

    let bytes = session.screenshot().await.expect("Screenshot failed");
    assert!(!bytes.is_empty(), "Screenshot was empty");
    assert_eq!(&bytes[1..4], b"PNG");

    let _ = session.close().await;
}

#[tokio::test]
#[serial]
#[ignore] // Requires chromedriver on :9515
async fn close_is_safe_without_launch() {
    init_tracing();
    let mut session = WebDriverSession::new(WEBDRIVER_URL);
    session.close().await.expect("Close without launch failed");
}
