// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Form;

use crate::api_server::{AppState, ReadingForm};
use crate::chart::{build_confidence_chart, build_parameter_bars, ConfidenceChart, ParameterBar};
use crate::crop_table::CropConditions;
use crate::metrics::rank_suitable_crops;
use crate::params::{SoilParameter, SoilReading};

/// Ranked entries shown on the reverse lookup results page.
const REVERSE_LOOKUP_LIMIT: usize = 10;

// ============================================================================
// Index Page (recommendation form)
// ============================================================================

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub crops: Vec<String>,
    pub result: Option<RecommendationView>,
    pub error: Option<String>,
}

/// Rendered recommendation: winning crop plus its charts.
pub struct RecommendationView {
    pub crop: String,
    pub description: String,
    pub confidence: ConfidenceChart,
    pub bars: Vec<ParameterBar>,
}

pub async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    render_index(&state, None, None)
}

pub async fn recommend_page(
    State(state): State<AppState>,
    Form(form): Form<ReadingForm>,
) -> impl IntoResponse {
    let reading = match form.into_reading() {
        Ok(reading) => reading,
        Err(e) => return render_index(&state, None, Some(e.to_string())),
    };

    let recommender = state.recommender.clone();
    let recommendation =
        match tokio::task::spawn_blocking(move || recommender.recommend(&reading)).await {
            Ok(recommendation) => recommendation,
            Err(e) => {
                return render_index(&state, None, Some(format!("Recommendation failed: {}", e)))
            }
        };

    // One live chart per canvas: reacquiring the slots retires the charts
    // from the previous render before these go live
    let _confidence_slot = state.charts.acquire("confidence-chart");
    let _conditions_slot = state.charts.acquire("conditions-chart");

    let conditions = state.recommender.data().get(&recommendation.crop);
    let view = RecommendationView {
        crop: recommendation.crop.clone(),
        description: conditions.map(|c| c.description.clone()).unwrap_or_default(),
        confidence: build_confidence_chart(&recommendation.confidence_scores),
        bars: conditions
            .map(|c| build_parameter_bars(&reading, c))
            .unwrap_or_default(),
    };

    render_index(&state, Some(view), None)
}

fn render_index(
    state: &AppState,
    result: Option<RecommendationView>,
    error: Option<String>,
) -> Html<String> {
    let template = IndexTemplate {
        title: "Crop Recommender".to_string(),
        crops: state.recommender.data().crop_names(),
        result,
        error,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// About Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub title: String,
}

pub async fn about_page() -> impl IntoResponse {
    let template = AboutTemplate {
        title: "About".to_string(),
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Crop Encyclopedia Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/crop_encyclopedia.html")]
pub struct EncyclopediaTemplate {
    pub title: String,
    pub crops: Vec<CropCard>,
}

/// One crop entry: description plus its optimal ranges, display-formatted.
pub struct CropCard {
    pub name: String,
    pub description: String,
    pub rows: Vec<ConditionRow>,
}

pub struct ConditionRow {
    pub label: &'static str,
    pub range: String,
}

pub async fn encyclopedia_page(State(state): State<AppState>) -> impl IntoResponse {
    let crops = state
        .recommender
        .data()
        .conditions()
        .iter()
        .map(crop_card)
        .collect();

    let template = EncyclopediaTemplate {
        title: "Crop Encyclopedia".to_string(),
        crops,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

fn crop_card(conditions: &CropConditions) -> CropCard {
    let rows = SoilParameter::ALL
        .iter()
        .map(|&param| {
            let (min_val, max_val) = conditions.interval(param);
            let range = if param.unit().is_empty() {
                format!("{:.1} - {:.1}", min_val, max_val)
            } else {
                format!("{:.1} - {:.1} {}", min_val, max_val, param.unit())
            };
            ConditionRow {
                label: param.label(),
                range,
            }
        })
        .collect();

    CropCard {
        name: conditions.name.clone(),
        description: conditions.description.clone(),
        rows,
    }
}

// ============================================================================
// Reverse Lookup Page (conditions -> suitable crops)
// ============================================================================

#[derive(Template)]
#[template(path = "pages/reverse_lookup.html")]
pub struct ReverseLookupTemplate {
    pub title: String,
    pub result: Option<ReverseLookupView>,
    pub error: Option<String>,
}

pub struct ReverseLookupView {
    pub entries: Vec<RankedCrop>,
    pub top_crop: String,
    pub top_bars: Vec<ParameterBar>,
}

pub struct RankedCrop {
    pub crop: String,
    pub score: f64,
}

impl RankedCrop {
    pub fn score_display(&self) -> String {
        format!("{:.1}", self.score)
    }
}

pub async fn reverse_lookup_page() -> impl IntoResponse {
    render_reverse_lookup(None, None)
}

pub async fn reverse_lookup_results(
    State(state): State<AppState>,
    Form(form): Form<ReadingForm>,
) -> impl IntoResponse {
    let reading = match form.into_reading() {
        Ok(reading) => reading,
        Err(e) => return render_reverse_lookup(None, Some(e.to_string())),
    };

    let view = build_reverse_lookup_view(&state, &reading);
    let _suitability_slot = state.charts.acquire("suitability-chart");

    render_reverse_lookup(view, None)
}

fn build_reverse_lookup_view(state: &AppState, reading: &SoilReading) -> Option<ReverseLookupView> {
    let mut ranked = rank_suitable_crops(reading, state.recommender.data().conditions());
    ranked.truncate(REVERSE_LOOKUP_LIMIT);

    let top = ranked.first()?;
    let top_crop = top.crop.clone();
    let top_bars = state
        .recommender
        .data()
        .get(&top_crop)
        .map(|c| build_parameter_bars(reading, c))
        .unwrap_or_default();

    let entries = ranked
        .into_iter()
        .map(|entry| RankedCrop {
            crop: entry.crop,
            score: entry.score,
        })
        .collect();

    Some(ReverseLookupView {
        entries,
        top_crop,
        top_bars,
    })
}

fn render_reverse_lookup(result: Option<ReverseLookupView>, error: Option<String>) -> Html<String> {
    let template = ReverseLookupTemplate {
        title: "Reverse Lookup".to_string(),
        result,
        error,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}
