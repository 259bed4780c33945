use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const PAGE_LIMIT: u64 = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: f64,
    pub currency_code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bank {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardPage {
    pub data: Vec<CreditCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u64>,
}

/// Partial update body. Only the fields present in the JSON are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    pub external_product_id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub deep_link: Option<String>,
    pub incentive_amount: Option<Money>,
    pub cost: Option<Money>,
    pub bank: Option<Bank>,
    pub processed_features: Option<Vec<Feature>>,
}

pub type Db = Arc<RwLock<BTreeMap<i64, CreditCard>>>;

/// Router seeded with the demo catalogue.
pub fn app() -> Router {
    app_with(seed_cards())
}

/// Router serving exactly `cards`, mounted under `/api`.
pub fn app_with(cards: Vec<CreditCard>) -> Router {
    let db: Db = Arc::new(RwLock::new(cards.into_iter().map(|c| (c.id, c)).collect()));
    let api = Router::new()
        .route("/cards", get(list_cards))
        .route("/cards/{id}", get(get_card).patch(update_card))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_cards(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<CardPage> {
    let cards = db.read().await;
    let mut all: Vec<CreditCard> = cards.values().cloned().collect();
    sort_cards(&mut all, params.sort_by.as_deref(), params.sort_order.as_deref());

    let total = all.len() as u64;
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let offset = (page - 1).saturating_mul(PAGE_LIMIT) as usize;
    let data: Vec<CreditCard> = all.into_iter().skip(offset).take(PAGE_LIMIT as usize).collect();
    debug!(page, total, returned = data.len(), "list cards");

    Json(CardPage {
        data,
        pagination: Pagination {
            total,
            page,
            limit: PAGE_LIMIT,
            pages: total.div_ceil(PAGE_LIMIT),
        },
    })
}

/// Unknown sort keys fall back to `id`; anything but `desc` sorts ascending.
fn sort_cards(cards: &mut [CreditCard], sort_by: Option<&str>, sort_order: Option<&str>) {
    match sort_by.unwrap_or("id") {
        "title" => cards.sort_by(|a, b| a.title.cmp(&b.title)),
        "cost" => cards.sort_by(|a, b| a.cost.amount.total_cmp(&b.cost.amount)),
        "incentive_amount" => {
            cards.sort_by(|a, b| a.incentive_amount.amount.total_cmp(&b.incentive_amount.amount))
        }
        "bank" => cards.sort_by(|a, b| a.bank.name.cmp(&b.bank.name)),
        _ => cards.sort_by_key(|c| c.id),
    }
    if sort_order == Some("desc") {
        cards.reverse();
    }
}

async fn get_card(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<CreditCard>, StatusCode> {
    let cards = db.read().await;
    cards.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_card(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCard>,
) -> Result<Json<CreditCard>, StatusCode> {
    let mut cards = db.write().await;
    let card = cards.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(v) = input.external_product_id {
        card.external_product_id = v;
    }
    if let Some(v) = input.title {
        card.title = v;
    }
    if let Some(v) = input.card_type {
        card.card_type = v;
    }
    if let Some(v) = input.description {
        card.description = v;
    }
    if let Some(v) = input.logo_url {
        card.logo_url = v;
    }
    if let Some(v) = input.deep_link {
        card.deep_link = v;
    }
    if let Some(v) = input.incentive_amount {
        card.incentive_amount = v;
    }
    if let Some(v) = input.cost {
        card.cost = v;
    }
    if let Some(v) = input.bank {
        card.bank = v;
    }
    if let Some(v) = input.processed_features {
        card.processed_features = Some(v);
    }
    debug!(id, "card updated");
    Ok(Json(card.clone()))
}

/// Twelve cards across three banks, enough for two pages.
pub fn seed_cards() -> Vec<CreditCard> {
    const CATALOGUE: [(&str, &str, f64, f64); 12] = [
        ("Classic", "Banco Norte", 0.0, 50.0),
        ("Gold", "Banco Norte", 45.0, 120.0),
        ("Platinum", "Banco Norte", 120.0, 300.0),
        ("Student", "Caja Sur", 0.0, 20.0),
        ("Travel", "Caja Sur", 80.0, 200.0),
        ("Cashback", "Caja Sur", 30.0, 150.0),
        ("Business", "Banco Este", 150.0, 400.0),
        ("Rewards", "Banco Este", 60.0, 180.0),
        ("Basic", "Banco Este", 10.0, 0.0),
        ("Premium", "Banco Norte", 200.0, 500.0),
        ("Fuel", "Caja Sur", 25.0, 75.0),
        ("Online", "Banco Este", 0.0, 30.0),
    ];

    CATALOGUE
        .iter()
        .enumerate()
        .map(|(i, (title, bank, cost, incentive))| {
            let id = i as i64 + 1;
            let bank_id = match *bank {
                "Banco Norte" => 1,
                "Caja Sur" => 2,
                _ => 3,
            };
            let processed_features = if *cost == 0.0 {
                Some(vec![Feature {
                    kind: "positive".to_string(),
                    text: "No annual fee".to_string(),
                }])
            } else {
                None
            };
            CreditCard {
                id,
                external_product_id: format!("card-{id:03}"),
                title: format!("{title} Card"),
                card_type: "credit".to_string(),
                description: format!("{title} credit card from {bank}"),
                logo_url: format!("https://cdn.example.com/logos/{id}.png"),
                deep_link: format!("https://apply.example.com/cards/{id}"),
                incentive_amount: Money {
                    amount: *incentive,
                    currency_code: "EUR".to_string(),
                },
                cost: Money {
                    amount: *cost,
                    currency_code: "EUR".to_string(),
                },
                bank: Bank {
                    id: bank_id,
                    name: bank.to_string(),
                },
                processed_features,
            }
        })
        .collect()
}
