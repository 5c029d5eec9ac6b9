//! HTTP API server with observability for the management service.
//!
//! Provides REST endpoints for customers, products, suppliers, supplier
//! orders and employees, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use entity_store::EntityStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EntityStore>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    cors_origin: &str,
) -> Router {
    use routes::{customers, employees, products, supplier_orders, suppliers};

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/customers",
            get(customers::list::<S>).post(customers::create::<S>),
        )
        .route(
            "/customers/new-loyalty-customers",
            get(customers::new_this_week::<S>),
        )
        .route(
            "/customers/{id}",
            get(customers::get::<S>)
                .put(customers::update::<S>)
                .delete(customers::delete::<S>),
        )
        .route(
            "/products",
            get(products::list::<S>).post(products::create::<S>),
        )
        .route(
            "/products/{id}",
            get(products::get::<S>)
                .put(products::update::<S>)
                .delete(products::delete::<S>),
        )
        .route(
            "/suppliers",
            get(suppliers::list::<S>).post(suppliers::create::<S>),
        )
        .route("/suppliers/search", get(suppliers::search::<S>))
        .route("/suppliers/by-name", get(suppliers::by_name::<S>))
        .route(
            "/suppliers/{id}",
            get(suppliers::get::<S>)
                .put(suppliers::update::<S>)
                .delete(suppliers::delete::<S>),
        )
        .route(
            "/supplier-orders",
            get(supplier_orders::list::<S>).post(supplier_orders::create::<S>),
        )
        .route(
            "/supplier-orders/{id}",
            axum::routing::delete(supplier_orders::delete::<S>),
        )
        .route(
            "/api/employees",
            get(employees::list::<S>).post(employees::create::<S>),
        )
        .route("/api/employees/search", get(employees::search::<S>))
        .route("/api/employees/by-salary", get(employees::by_salary::<S>))
        .route(
            "/api/employees/department/{department}",
            get(employees::by_department::<S>),
        )
        .route(
            "/api/employees/{id}",
            get(employees::get::<S>)
                .put(employees::update::<S>)
                .delete(employees::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer for the configured client origin; `*` allows any.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "invalid CORS origin, allowing any");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the default application state with every service wired to `store`.
pub fn create_default_state<S: EntityStore>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState::new(&store))
}
