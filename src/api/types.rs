use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleFavoriteRequest {
    pub item_name: String,
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleFavoriteResponse {
    pub success: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FavoriteRecord {
    pub item_name: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub hotel_name: String,
    pub city: String,
    pub check_in: String,
    pub check_out: String,
    pub price: f64,
    pub hotel_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookingResponse {
    #[serde(default)]
    pub booking_id: Option<i64>,
}

/// Server-owned booking record; the client only ever holds fetched copies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub hotel_name: String,
    pub city: String,
    pub check_in: String,
    pub check_out: String,
    pub price: f64,
    #[serde(default)]
    pub hotel_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub booking_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivitySuggestion {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingAnalysis {
    pub title: String,
    pub price_analysis: String,
    #[serde(default)]
    pub activity_suggestions: Vec<ActivitySuggestion>,
    pub summary: String,
}
