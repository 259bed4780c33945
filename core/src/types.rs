//! Domain DTOs for the credit card API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Field
//! names follow the camelCase JSON the API speaks.

use serde::{Deserialize, Serialize};

/// A single credit card product returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: i64,
    pub external_product_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub description: String,
    pub logo_url: String,
    pub deep_link: String,
    pub incentive_amount: Money,
    pub cost: Money,
    pub bank: Bank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_features: Option<Vec<Feature>>,
}

impl CreditCard {
    /// Shallow merge: every field present in `patch` replaces the local one,
    /// absent fields keep their current value.
    pub fn apply(&mut self, patch: &CardPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(v) = &patch.external_product_id {
            self.external_product_id = v.clone();
        }
        if let Some(v) = &patch.title {
            self.title = v.clone();
        }
        if let Some(v) = &patch.card_type {
            self.card_type = v.clone();
        }
        if let Some(v) = &patch.description {
            self.description = v.clone();
        }
        if let Some(v) = &patch.logo_url {
            self.logo_url = v.clone();
        }
        if let Some(v) = &patch.deep_link {
            self.deep_link = v.clone();
        }
        if let Some(v) = &patch.incentive_amount {
            self.incentive_amount = v.clone();
        }
        if let Some(v) = &patch.cost {
            self.cost = v.clone();
        }
        if let Some(v) = &patch.bank {
            self.bank = v.clone();
        }
        if let Some(v) = &patch.processed_features {
            self.processed_features = Some(v.clone());
        }
    }
}

/// A monetary amount. Used for both the incentive and the cost of a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bank {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Positive,
    Warning,
    Normal,
}

/// A tagged annotation shown next to a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            pages: 0,
        }
    }
}

/// Envelope returned by `GET /cards`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCardResponse {
    pub data: Vec<CreditCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query inputs for a list fetch. Every field is optional; absent fields are
/// left out of the query string entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardFilters {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Sparse credit card record. Sent as the body of a partial update and used
/// to decode the server's echo of the updated record, which may itself be
/// partial. Only the fields present in the JSON are populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incentive_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_features: Option<Vec<Feature>>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_card(id: i64) -> CreditCard {
        CreditCard {
            id,
            external_product_id: format!("ext-{id}"),
            title: "Gold".to_string(),
            card_type: "credit".to_string(),
            description: "A card".to_string(),
            logo_url: "https://cdn.example.com/gold.png".to_string(),
            deep_link: "https://bank.example.com/apply".to_string(),
            incentive_amount: Money {
                amount: 100.0,
                currency_code: "EUR".to_string(),
            },
            cost: Money {
                amount: 25.5,
                currency_code: "EUR".to_string(),
            },
            bank: Bank {
                id: 7,
                name: "Example Bank".to_string(),
            },
            processed_features: None,
        }
    }

    #[test]
    fn credit_card_uses_camel_case_and_type_keys() {
        let json = serde_json::to_value(sample_card(1)).unwrap();
        assert_eq!(json["externalProductId"], "ext-1");
        assert_eq!(json["type"], "credit");
        assert_eq!(json["incentiveAmount"]["currencyCode"], "EUR");
        assert!(json.get("processedFeatures").is_none());
    }

    #[test]
    fn feature_kind_parses_lowercase_tags() {
        let feature: Feature = serde_json::from_str(r#"{"type":"warning","text":"High APR"}"#).unwrap();
        assert_eq!(feature.kind, FeatureKind::Warning);
        assert_eq!(feature.text, "High APR");
    }

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        let p = Pagination::default();
        assert_eq!((p.total, p.page, p.limit, p.pages), (0, 1, 10, 0));
    }

    #[test]
    fn card_patch_serializes_only_present_fields() {
        let patch = CardPatch {
            title: Some("Platinum".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Platinum"}));
    }

    #[test]
    fn apply_overrides_present_fields_only() {
        let mut card = sample_card(3);
        let patch: CardPatch =
            serde_json::from_str(r#"{"title":"Platinum","cost":{"amount":0,"currencyCode":"EUR"}}"#).unwrap();
        card.apply(&patch);

        let mut expected = sample_card(3);
        expected.title = "Platinum".to_string();
        expected.cost.amount = 0.0;
        assert_eq!(card, expected);
    }

    #[test]
    fn apply_replaces_feature_list() {
        let mut card = sample_card(3);
        let patch: CardPatch =
            serde_json::from_str(r#"{"processedFeatures":[{"type":"positive","text":"No fee"}]}"#).unwrap();
        card.apply(&patch);
        let features = card.processed_features.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, FeatureKind::Positive);
    }
}
