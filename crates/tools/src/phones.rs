//! Catalog tools for the shopping assistant.
//!
//! Five read-only tools over the phone catalog. "Not found" and invalid
//! input are ordinary outcomes and come back as structured
//! `success: false` payloads; only store failures that survive the retry
//! budget surface as tool errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use shop_agent_catalog::{compare, resolve, search, CompareError, FilterCriteria};
use shop_agent_core::{FeatureGlossary, PhoneStore};

use crate::flex;
use crate::mcp::{Tool, ToolError, ToolInput, ToolOutput, ToolSchema};
use crate::registry::ToolRegistry;

/// Register the full catalog tool set.
pub fn catalog_tools(store: Arc<dyn PhoneStore>, glossary: Arc<FeatureGlossary>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchPhonesTool::new(store.clone())));
    registry.register(Arc::new(GetPhoneDetailsTool::new(store.clone())));
    registry.register(Arc::new(ListAllPhonesTool::new(store.clone())));
    registry.register(Arc::new(ComparePhonesTool::new(store)));
    registry.register(Arc::new(ExplainFeatureTool::new(glossary)));
    registry
}

fn invalid_input(detail: &str) -> ToolOutput {
    ToolOutput::json(json!({
        "success": false,
        "error": detail,
        "message": "Please check the request arguments and try again",
    }))
}

fn phone_not_found(identifier: &str) -> ToolOutput {
    ToolOutput::json(json!({
        "success": false,
        "error": format!("Phone '{identifier}' not found in catalog"),
        "message": "Please check the phone ID and try again",
    }))
}

/// Search for phones matching optional filter criteria.
pub struct SearchPhonesTool {
    store: Arc<dyn PhoneStore>,
}

impl SearchPhonesTool {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchArgs {
    #[serde(default)]
    brand: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    max_price: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    min_price: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_u32")]
    min_ram: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_u32")]
    battery_threshold: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_u32")]
    refresh_rate: Option<u32>,
}

#[async_trait]
impl Tool for SearchPhonesTool {
    fn name(&self) -> &str {
        "search_phones_by_filters"
    }

    fn description(&self) -> &str {
        "Search for phones by price range, brand, RAM, battery capacity and display refresh rate"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "max_price": {"type": "number", "description": "Maximum price in rupees"},
                    "min_price": {"type": "number", "description": "Minimum price in rupees"},
                    "brand": {"type": "string", "description": "Brand name, e.g. \"Samsung\""},
                    "min_ram": {"type": "integer", "description": "Minimum RAM in GB"},
                    "battery_threshold": {"type": "integer", "description": "Minimum battery capacity in mAh"},
                    "refresh_rate": {"type": "integer", "description": "Minimum display refresh rate in Hz"}
                }
            }),
        }
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let args: SearchArgs = input.parse()?;
        let criteria = FilterCriteria {
            brand: args.brand.filter(|b| !b.trim().is_empty()),
            max_price: args.max_price,
            min_price: args.min_price,
            min_ram: args.min_ram,
            min_battery: args.battery_threshold,
            min_refresh_rate: args.refresh_rate,
        };

        let phones = search(self.store.as_ref(), &criteria).await?;

        Ok(ToolOutput::json(json!({
            "success": true,
            "count": phones.len(),
            "filters_applied": criteria.applied(),
            "phones": phones,
            "message": format!("Found {} phone(s) matching your criteria", phones.len()),
        })))
    }
}

/// Detailed record for a single phone, by id or name fragment.
pub struct GetPhoneDetailsTool {
    store: Arc<dyn PhoneStore>,
}

impl GetPhoneDetailsTool {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DetailsArgs {
    #[serde(default)]
    phone_id: String,
}

#[async_trait]
impl Tool for GetPhoneDetailsTool {
    fn name(&self) -> &str {
        "get_phone_details"
    }

    fn description(&self) -> &str {
        "Get the full catalog record for a specific phone"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "phone_id": {"type": "string", "description": "Phone id (e.g. \"pixel-8a\") or part of the name"}
                },
                "required": ["phone_id"]
            }),
        }
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let args: DetailsArgs = input.parse()?;
        let identifier = args.phone_id.trim();
        if identifier.is_empty() {
            return Ok(invalid_input("phone_id must not be empty"));
        }

        match resolve(self.store.as_ref(), identifier).await? {
            Some(phone) => {
                let message = format!("Details for {}", phone.phone_name);
                Ok(ToolOutput::json(json!({
                    "success": true,
                    "phone": phone,
                    "message": message,
                })))
            }
            None => Ok(phone_not_found(identifier)),
        }
    }
}

/// Every phone in the catalog.
pub struct ListAllPhonesTool {
    store: Arc<dyn PhoneStore>,
}

impl ListAllPhonesTool {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListAllPhonesTool {
    fn name(&self) -> &str {
        "list_all_phones"
    }

    fn description(&self) -> &str {
        "List all phones currently available in the catalog"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        }
    }

    async fn execute(&self, _input: ToolInput) -> Result<ToolOutput, ToolError> {
        let phones = self.store.fetch_all().await?;

        Ok(ToolOutput::json(json!({
            "success": true,
            "total": phones.len(),
            "phones": phones,
            "message": format!("Here are all {} available phones", phones.len()),
        })))
    }
}

/// Side-by-side comparison of two or three phones.
pub struct ComparePhonesTool {
    store: Arc<dyn PhoneStore>,
}

impl ComparePhonesTool {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CompareArgs {
    #[serde(default)]
    phone_id_1: String,
    #[serde(default)]
    phone_id_2: String,
    #[serde(default)]
    phone_id_3: Option<String>,
}

#[async_trait]
impl Tool for ComparePhonesTool {
    fn name(&self) -> &str {
        "compare_phones"
    }

    fn description(&self) -> &str {
        "Compare two or three phones side-by-side"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "phone_id_1": {"type": "string", "description": "First phone id"},
                    "phone_id_2": {"type": "string", "description": "Second phone id"},
                    "phone_id_3": {"type": "string", "description": "Optional third phone id"}
                },
                "required": ["phone_id_1", "phone_id_2"]
            }),
        }
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let args: CompareArgs = input.parse()?;
        let first = args.phone_id_1.trim();
        let second = args.phone_id_2.trim();
        if first.is_empty() || second.is_empty() {
            return Ok(invalid_input("phone_id_1 and phone_id_2 are required"));
        }
        let third = args
            .phone_id_3
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match compare(self.store.as_ref(), first, second, third).await {
            Ok(set) => {
                let names: Vec<&str> = set.records.iter().map(|r| r.phone_name.as_str()).collect();
                let message = format!("Comparing {}", names.join(" vs "));
                Ok(ToolOutput::json(json!({
                    "success": true,
                    "phones": set.records,
                    "message": message,
                })))
            }
            Err(CompareError::NotFound(identifier)) => {
                let payload = json!({
                    "success": false,
                    "error": format!("Phone '{identifier}' not found in catalog"),
                    "message": "Please check the phone IDs and try again",
                });
                Ok(ToolOutput::json(payload))
            }
            Err(CompareError::Store(err)) => Err(err.into()),
        }
    }
}

/// Explain a technical phone feature from the glossary.
pub struct ExplainFeatureTool {
    glossary: Arc<FeatureGlossary>,
}

impl ExplainFeatureTool {
    pub fn new(glossary: Arc<FeatureGlossary>) -> Self {
        Self { glossary }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ExplainArgs {
    #[serde(default)]
    feature: String,
}

#[async_trait]
impl Tool for ExplainFeatureTool {
    fn name(&self) -> &str {
        "explain_phone_feature"
    }

    fn description(&self) -> &str {
        "Explain technical phone features and terminology (OIS, OLED, refresh rate, ...)"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "feature": {"type": "string", "description": "Feature to explain, e.g. \"OIS\" or \"OIS vs EIS\""}
                },
                "required": ["feature"]
            }),
        }
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let args: ExplainArgs = input.parse()?;
        let term = args.feature.trim();
        if term.is_empty() {
            return Ok(invalid_input("feature must not be empty"));
        }

        match self.glossary.explain(term) {
            Some(explanation) => Ok(ToolOutput::json(json!({
                "success": true,
                "feature": explanation,
            }))),
            None => {
                let known = self.glossary.known_features();
                Ok(ToolOutput::json(json!({
                    "success": false,
                    "error": format!("Feature '{term}' explanation not found"),
                    "message": format!("Available explanations: {}", known.join(", ")),
                    "available_features": known,
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use shop_agent_catalog::StaticStore;
    use shop_agent_core::CatalogRecord;

    fn fixture_store() -> Arc<dyn PhoneStore> {
        let record = |id: &str, brand: &str, name: &str, price: &str, ram: &str| {
            let mut record = CatalogRecord {
                id: id.to_string(),
                brand_name: brand.to_string(),
                phone_name: name.to_string(),
                price: Some(price.to_string()),
                ..CatalogRecord::default()
            };
            record
                .spotlight
                .insert("ram_size".to_string(), ram.to_string());
            record
        };
        Arc::new(StaticStore::new(vec![
            record(
                "pixel-8a",
                "Google",
                "Google Pixel 8a",
                "128GB 8GB RAM: ₹29,999",
                "8 GB",
            ),
            record(
                "oneplus-12r",
                "OnePlus",
                "OnePlus 12R",
                "256GB 12GB RAM: ₹39,999",
                "12 GB",
            ),
            record(
                "iphone-15",
                "Apple",
                "Apple iPhone 15",
                "128GB: ₹79,999",
                "6 GB",
            ),
        ]))
    }

    fn payload(output: &ToolOutput) -> &Value {
        output.first_json().expect("tool returned a JSON payload")
    }

    #[tokio::test]
    async fn test_search_reports_filters_and_count() {
        let tool = SearchPhonesTool::new(fixture_store());
        let output = tool
            .execute(ToolInput::new(json!({"min_ram": "8", "max_price": 50000})))
            .await
            .unwrap();
        let body = payload(&output);

        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["filters_applied"]["min_ram"], 8);
        assert_eq!(body["filters_applied"]["max_price"], 50000.0);
        let ids: Vec<&str> = body["phones"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["pixel-8a", "oneplus-12r"]);
    }

    #[tokio::test]
    async fn test_details_resolves_by_name_fragment() {
        let tool = GetPhoneDetailsTool::new(fixture_store());
        let output = tool
            .execute(ToolInput::new(json!({"phone_id": "iphone"})))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], true);
        assert_eq!(body["phone"]["id"], "iphone-15");
    }

    #[tokio::test]
    async fn test_details_not_found_and_empty_id() {
        let tool = GetPhoneDetailsTool::new(fixture_store());

        let output = tool
            .execute(ToolInput::new(json!({"phone_id": "galaxy-z"})))
            .await
            .unwrap();
        assert_eq!(payload(&output)["success"], false);

        let output = tool
            .execute(ToolInput::new(json!({"phone_id": "  "})))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("phone_id"));
    }

    #[tokio::test]
    async fn test_list_all_reports_total() {
        let tool = ListAllPhonesTool::new(fixture_store());
        let output = tool.execute(ToolInput::default()).await.unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn test_compare_mandatory_miss_fails() {
        let tool = ComparePhonesTool::new(fixture_store());
        let output = tool
            .execute(ToolInput::new(json!({
                "phone_id_1": "pixel-8a",
                "phone_id_2": "zzz-missing"
            })))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("zzz-missing"));
    }

    #[tokio::test]
    async fn test_compare_optional_miss_is_omitted() {
        let tool = ComparePhonesTool::new(fixture_store());
        let output = tool
            .execute(ToolInput::new(json!({
                "phone_id_1": "pixel-8a",
                "phone_id_2": "oneplus-12r",
                "phone_id_3": "zzz-missing"
            })))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], true);
        assert_eq!(body["phones"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_explain_prefers_most_specific_key() {
        let tool = ExplainFeatureTool::new(Arc::new(FeatureGlossary::default()));
        let output = tool
            .execute(ToolInput::new(json!({"feature": "What is OIS vs EIS"})))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], true);
        assert_eq!(body["feature"]["name"], "OIS vs EIS Comparison");
    }

    #[tokio::test]
    async fn test_explain_miss_lists_known_features() {
        let tool = ExplainFeatureTool::new(Arc::new(FeatureGlossary::default()));
        let output = tool
            .execute(ToolInput::new(json!({"feature": "teleportation"})))
            .await
            .unwrap();
        let body = payload(&output);
        assert_eq!(body["success"], false);
        assert!(!body["available_features"].as_array().unwrap().is_empty());
    }
}
