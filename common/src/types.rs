use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandsResponse {
    #[serde(default)]
    pub brands: Vec<Brand>,
}

/// Body of `GET /health`. Only `laravel_api` drives the connection badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub laravel_api: Option<String>,
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        self.laravel_api.as_deref() == Some("connected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_chat_request() {
        let req = ChatRequest { question: "Do you have iPhone in stock?".to_string() };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"question":"Do you have iPhone in stock?"}"#);
    }

    #[test]
    fn missing_catalog_list_is_empty() {
        let cats: CategoriesResponse = serde_json::from_str("{}").unwrap();
        assert!(cats.categories.is_empty());
        let brands: BrandsResponse =
            serde_json::from_str(r#"{"brands":[{"id":3,"name":"Acme"}]}"#).unwrap();
        assert_eq!(brands.brands[0].name, "Acme");
        assert_eq!(brands.brands[0].product_count, 0);
    }

    #[test]
    fn health_connection() {
        let up: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","laravel_api":"connected"}"#).unwrap();
        assert!(up.is_connected());
        let down: HealthStatus = serde_json::from_str(r#"{"laravel_api":"error"}"#).unwrap();
        assert!(!down.is_connected());
        assert!(!HealthStatus::default().is_connected());
    }
}
