use axum_storefront::routes::health::health;

#[tokio::test]
async fn health_check_returns_ok() {
    assert_eq!(health().await, "ok");
}
