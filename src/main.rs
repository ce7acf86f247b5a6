use anyhow::{Context, Result};
use axum::Router;
use axum::http::{header, HeaderValue, Method};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cryptotax_api::create_router;
use cryptotax_api::shared::config::AppConfig;
use cryptotax_api::shared::database::Database;
use cryptotax_api::shared::services::AppState;

// Import models for OpenAPI schema
use cryptotax_api::domains::auth::models::*;
use cryptotax_api::domains::pix::models::*;
use cryptotax_api::domains::subscription::models::*;
use cryptotax_api::domains::wallet::models::*;
use cryptotax_api::domains::portfolio::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        cryptotax_api::domains::auth::handlers::auth_handler::get_me,
        cryptotax_api::domains::pix::handlers::charge_handler::create_charge,
        cryptotax_api::domains::pix::handlers::charge_handler::get_pending_charge,
        cryptotax_api::domains::pix::handlers::charge_handler::get_charge,
        cryptotax_api::domains::pix::handlers::charge_handler::verify_charge,
        cryptotax_api::domains::pix::handlers::webhook_handler::pix_webhook,
        cryptotax_api::domains::subscription::handlers::subscription_handler::get_my_subscription,
        cryptotax_api::domains::wallet::handlers::wallet_handler::create_wallet,
        cryptotax_api::domains::wallet::handlers::wallet_handler::get_user_wallets,
        cryptotax_api::domains::wallet::handlers::wallet_handler::delete_wallet,
        cryptotax_api::domains::portfolio::handlers::transaction_handler::list_transactions,
        cryptotax_api::domains::portfolio::handlers::transaction_handler::create_transaction,
        cryptotax_api::domains::portfolio::handlers::transaction_handler::delete_transaction,
        cryptotax_api::domains::portfolio::handlers::transaction_handler::get_stats
    ),
    components(schemas(
        UserResponse,
        PixCharge,
        PixChargeStatus,
        CreateChargeResponse,
        PendingChargeResponse,
        ChargeResponse,
        VerifyChargeResponse,
        PixWebhookPayload,
        PixWebhookEntry,
        WebhookReport,
        WebhookAckResponse,
        Subscription,
        SubscriptionResponse,
        PlanType,
        SubscriptionStatus,
        Wallet,
        WalletType,
        CreateWalletRequest,
        CreateWalletResponse,
        WalletsResponse,
        DeleteWalletResponse,
        Transaction,
        TransactionType,
        CreateTransactionRequest,
        CreateTransactionResponse,
        TransactionsResponse,
        DeleteTransactionResponse,
        PortfolioStats
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Identity from the auth provider's JWT"),
        (name = "PIX", description = "PIX charges for the premium plan"),
        (name = "Webhooks", description = "Gateway notifications (HMAC signed)"),
        (name = "Subscriptions", description = "Premium subscription status"),
        (name = "Wallets", description = "Tracked crypto wallets"),
        (name = "Transactions", description = "Crypto transactions and tax stats")
    ),
    info(
        title = "Crypto Tax API",
        description = "Crypto-tax tracker backend with PIX premium billing",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 로깅 초기화 (가장 먼저)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. .env 로드 (없어도 됨)
    dotenv().ok();

    // 3. 설정 로드
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // 4. DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let bind_addr = config.bind_addr.clone();
    let cors_origin = config.cors_origin.clone();
    let app_state = AppState::new(db, config)?;

    // 구독 만료 스케줄러 시작
    app_state.subscription_state.expiry_scheduler.start();

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS_ORIGIN: {}", cors_origin))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!(addr = %bind_addr, "Server running");
    info!("Swagger UI available at http://{}/api", bind_addr);

    // 서버 실행
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
