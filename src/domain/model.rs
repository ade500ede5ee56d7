use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub store_address: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_price")]
    pub price: String,
    #[serde(rename = "product_size")]
    pub size: String,
    pub plu_number: String,
    #[serde(rename = "inventory_data")]
    pub inventory: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
}
