// Axum API Server Module
//
// REST API + server-rendered pages for the crop recommendation engine.
// JSON endpoints mirror the form-driven frontend contract: every response
// carries a "success" flag, failures answer 400 with an error message.

#[cfg(feature = "api")]
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::path::Path;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::chart::ChartRegistry;

#[cfg(feature = "api")]
use crate::metrics::{analyze_soil_health, predict_yield, rank_suitable_crops};

#[cfg(feature = "api")]
use crate::params::SoilReading;

#[cfg(feature = "api")]
use crate::recommender::CropRecommender;

#[cfg(feature = "api")]
use crate::web::handlers::pages;

/// Entries served by POST /api/suitable_crops.
#[cfg(feature = "api")]
const SUITABLE_CROPS_LIMIT: usize = 10;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<CropRecommender>,
    pub charts: ChartRegistry,
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(data_dir: &Path) -> anyhow::Result<Self> {
        tracing::info!("Initializing crop recommender...");
        let recommender = Arc::new(CropRecommender::new(data_dir)?);

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000) // 10K entries
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Ok(Self {
            recommender,
            charts: ChartRegistry::new(),
            cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Server-rendered pages
        .route("/", get(pages::index_page).post(pages::recommend_page))
        .route("/about", get(pages::about_page))
        .route("/crop_encyclopedia", get(pages::encyclopedia_page))
        .route(
            "/reverse_lookup",
            get(pages::reverse_lookup_page).post(pages::reverse_lookup_results),
        )
        // Recommendation endpoints (JSON API)
        .route("/api/recommend", post(recommend))
        .route("/api/crops", get(list_crops))
        .route("/api/crop_conditions", get(crop_conditions))
        // Analysis endpoints (JSON API)
        .route("/api/suitable_crops", post(suitable_crops))
        .route("/api/analyze_soil", post(analyze_soil))
        .route("/api/predict_yield", post(predict_yield_handler))
        // Health check
        .route("/health", get(health_check))
        // Static assets
        .nest_service("/static", ServeDir::new("static"))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn recommend(
    State(state): State<AppState>,
    Form(form): Form<ReadingForm>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reading = form.into_reading()?;
    let cache_key = format!("recommend:{:?}", reading.values);

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for recommendation");
        return Ok(Json(cached));
    }

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let recommendation = tokio::task::spawn_blocking(move || recommender.recommend(&reading))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    tracing::debug!(
        "Recommended '{}' ({} scored crops)",
        recommendation.crop,
        recommendation.confidence_scores.len()
    );

    // Confidence map keeps ranked order in the serialized response
    let mut confidence_scores = serde_json::Map::new();
    for (crop, percent) in &recommendation.confidence_scores {
        confidence_scores.insert(crop.clone(), serde_json::json!(percent));
    }

    let result = serde_json::json!({
        "success": true,
        "crop": recommendation.crop,
        "confidence_scores": confidence_scores,
    });

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn list_crops(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = "crops:all".to_string();

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let result = serde_json::json!({
        "success": true,
        "crops": state.recommender.data().crop_names(),
    });

    // Cache result (long-lived: the crop table does not change at runtime)
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn crop_conditions(
    State(state): State<AppState>,
    Query(params): Query<CropQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crop = params
        .crop
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing query parameter 'crop'".to_string()))?;
    let cache_key = format!("conditions:{}", crop.to_lowercase());

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for conditions '{}'", crop);
        return Ok(Json(cached));
    }

    let conditions = state
        .recommender
        .data()
        .get(crop)
        .ok_or_else(|| AppError::BadRequest(format!("No condition data for crop '{}'", crop)))?;

    let result = serde_json::json!({
        "success": true,
        "conditions": conditions,
    });

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn suitable_crops(
    State(state): State<AppState>,
    Form(form): Form<ReadingForm>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reading = form.into_reading()?;

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let mut ranked = tokio::task::spawn_blocking(move || {
        rank_suitable_crops(&reading, recommender.data().conditions())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;
    ranked.truncate(SUITABLE_CROPS_LIMIT);

    Ok(Json(serde_json::json!({
        "success": true,
        "suitable_crops": ranked,
    })))
}

#[cfg(feature = "api")]
async fn analyze_soil(
    Form(form): Form<SoilHealthForm>,
) -> Result<Json<serde_json::Value>, AppError> {
    let n = parse_field(&form.nitrogen, "nitrogen")?;
    let p = parse_field(&form.phosphorus, "phosphorus")?;
    let k = parse_field(&form.potassium, "potassium")?;
    let ph = parse_field(&form.ph, "ph")?;

    let report = analyze_soil_health(n, p, k, ph);

    Ok(Json(serde_json::json!({
        "success": true,
        "health_report": report,
    })))
}

#[cfg(feature = "api")]
async fn predict_yield_handler(
    State(state): State<AppState>,
    Form(form): Form<YieldForm>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (crop, reading_form) = form.into_parts();
    let crop = crop
        .ok_or_else(|| AppError::BadRequest("Missing form field 'crop'".to_string()))?;
    let reading = reading_form.into_reading()?;

    let conditions = state
        .recommender
        .data()
        .get(&crop)
        .ok_or_else(|| AppError::BadRequest(format!("No condition data for crop '{}'", crop)))?;

    let prediction = predict_yield(&reading, conditions);

    Ok(Json(serde_json::json!({
        "success": true,
        "yield_potential": prediction.yield_potential,
        "parameter_scores": prediction.parameter_scores,
        "limiting_factors": prediction.limiting_factors,
    })))
}

// ============================================================================
// Request Types
// ============================================================================

/// The seven soil and climate fields every analysis form submits.
///
/// Fields arrive as strings so that missing and malformed values can be
/// reported per field instead of failing extraction wholesale.
#[cfg(feature = "api")]
#[derive(Debug, Default, serde::Deserialize)]
pub struct ReadingForm {
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub ph: Option<String>,
    pub rainfall: Option<String>,
}

#[cfg(feature = "api")]
impl ReadingForm {
    pub fn into_reading(self) -> Result<SoilReading, AppError> {
        Ok(SoilReading::new([
            parse_field(&self.nitrogen, "nitrogen")?,
            parse_field(&self.phosphorus, "phosphorus")?,
            parse_field(&self.potassium, "potassium")?,
            parse_field(&self.temperature, "temperature")?,
            parse_field(&self.humidity, "humidity")?,
            parse_field(&self.ph, "ph")?,
            parse_field(&self.rainfall, "rainfall")?,
        ]))
    }
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct CropQuery {
    crop: Option<String>,
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct SoilHealthForm {
    nitrogen: Option<String>,
    phosphorus: Option<String>,
    potassium: Option<String>,
    ph: Option<String>,
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct YieldForm {
    crop: Option<String>,
    nitrogen: Option<String>,
    phosphorus: Option<String>,
    potassium: Option<String>,
    temperature: Option<String>,
    humidity: Option<String>,
    ph: Option<String>,
    rainfall: Option<String>,
}

#[cfg(feature = "api")]
impl YieldForm {
    fn into_parts(self) -> (Option<String>, ReadingForm) {
        let reading = ReadingForm {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
            rainfall: self.rainfall,
        };
        (self.crop, reading)
    }
}

#[cfg(feature = "api")]
fn parse_field(raw: &Option<String>, name: &str) -> Result<f64, AppError> {
    let raw = raw
        .as_deref()
        .ok_or_else(|| AppError::BadRequest(format!("Missing form field '{}'", name)))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid value '{}' for field '{}'", raw, name)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
