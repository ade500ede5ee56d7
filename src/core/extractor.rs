//! Search-results page to product records.
//!
//! The upstream page renders one container per product with a heading,
//! price/size labels, a small-print PLU and an optional collapsible
//! inventory panel listing per-store stock. Field locations come from
//! [`SelectorConfig`] so markup changes can be absorbed by configuration.

use crate::config::toml_config::SelectorConfig;
use crate::domain::model::{InventoryEntry, Product};
use crate::utils::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone)]
pub struct Extractor {
    product: Selector,
    name: Selector,
    price: Selector,
    size: Selector,
    plu_number: Selector,
    inventory_panel: Selector,
    inventory_entry: Selector,
    store_address: Selector,
    quantity: Selector,
    stock_suffix: String,
}

impl Extractor {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            product: compile(&selectors.product)?,
            name: compile(&selectors.name)?,
            price: compile(&selectors.price)?,
            size: compile(&selectors.size)?,
            plu_number: compile(&selectors.plu_number)?,
            inventory_panel: compile(&selectors.inventory_panel)?,
            inventory_entry: compile(&selectors.inventory_entry)?,
            store_address: compile(&selectors.store_address)?,
            quantity: compile(&selectors.quantity)?,
            stock_suffix: selectors.stock_suffix.clone(),
        })
    }

    /// Extracts every product container in document order.
    ///
    /// A container missing any required field fails the whole document
    /// with [`ScraperError::ExtractionError`]; a missing inventory panel
    /// is not an error and yields an empty inventory.
    pub fn extract(&self, html: &str) -> Result<Vec<Product>> {
        let document = Html::parse_document(html);

        document
            .select(&self.product)
            .enumerate()
            .map(|(index, container)| self.extract_product(index, container))
            .collect()
    }

    fn extract_product(&self, index: usize, container: ElementRef<'_>) -> Result<Product> {
        let name = required_text(container, &self.name, index, "product_name")?;
        let price = required_text(container, &self.price, index, "product_price")?;
        let size = required_text(container, &self.size, index, "product_size")?;
        let plu_number = required_text(container, &self.plu_number, index, "plu_number")?;

        let inventory = match container.select(&self.inventory_panel).next() {
            Some(panel) => panel
                .select(&self.inventory_entry)
                .map(|entry| self.extract_inventory_entry(index, entry))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        tracing::trace!(
            "Extracted product #{} `{}` with {} inventory entries",
            index,
            name,
            inventory.len()
        );

        Ok(Product {
            name,
            price,
            size,
            plu_number,
            inventory,
        })
    }

    fn extract_inventory_entry(&self, index: usize, entry: ElementRef<'_>) -> Result<InventoryEntry> {
        let address = first_match(entry, &self.store_address, index, "store_address")?;
        let quantity = first_match(entry, &self.quantity, index, "quantity")?;

        // each text node is its own line (`<br>`-separated address parts)
        let store_address = address.text().collect::<Vec<_>>().join("\n").trim().to_string();
        let quantity = quantity
            .text()
            .collect::<String>()
            .replace(self.stock_suffix.as_str(), "")
            .trim()
            .to_string();

        Ok(InventoryEntry {
            store_address,
            quantity,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn first_match<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    product_index: usize,
    field: &str,
) -> Result<ElementRef<'a>> {
    scope
        .select(selector)
        .next()
        .ok_or_else(|| ScraperError::ExtractionError {
            product_index,
            field: field.to_string(),
        })
}

fn required_text(
    scope: ElementRef<'_>,
    selector: &Selector,
    product_index: usize,
    field: &str,
) -> Result<String> {
    let element = first_match(scope, selector, product_index, field)?;
    Ok(element.text().collect::<String>().trim().to_string())
}
