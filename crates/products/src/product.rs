use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use catalog_core::{Entity, ProductId};

use crate::validation::{self, ValidationErrors};

/// A stored product.
///
/// Plain record: persistence lives behind the store abstraction in `catalog-infra`,
/// so this type never saves itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub color: String,
    pub category: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Assemble a record from store-owned metadata and validated fields.
    pub fn new(
        id: ProductId,
        fields: ProductFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_name: fields.product_name,
            color: fields.color,
            category: fields.category,
            price: fields.price,
            created_at,
            updated_at,
        }
    }

    /// Full replace of the four writable fields.
    pub fn apply(&mut self, fields: ProductFields, updated_at: DateTime<Utc>) {
        self.product_name = fields.product_name;
        self.color = fields.color;
        self.category = fields.category;
        self.price = fields.price;
        self.updated_at = updated_at;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The four writable product fields, already validated.
///
/// The only ways to obtain one are [`ProductFields::from_input`] and
/// [`ProductFields::new`], both of which run the full rule set, so a value of this
/// type always satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFields {
    #[serde(rename = "productName")]
    product_name: String,
    color: String,
    category: String,
    price: f64,
}

impl ProductFields {
    /// Validate typed values.
    pub fn new(
        product_name: impl Into<String>,
        color: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Result<Self, ValidationErrors> {
        let mut raw = Map::new();
        raw.insert("productName".into(), Value::String(product_name.into()));
        raw.insert("color".into(), Value::String(color.into()));
        raw.insert("category".into(), Value::String(category.into()));
        raw.insert(
            "price".into(),
            serde_json::Number::from_f64(price).map_or(Value::Null, Value::Number),
        );
        Self::from_input(&ProductInput(raw))
    }

    /// Validate an untyped request payload, reporting every failing field.
    pub fn from_input(input: &ProductInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let product_name = validation::text(
            &mut errors,
            input.get("productName"),
            "productName",
            validation::PRODUCT_NAME_MAX_CHARS,
        );
        let color = validation::text(
            &mut errors,
            input.get("color"),
            "color",
            validation::COLOR_MAX_CHARS,
        );
        let category = validation::text(
            &mut errors,
            input.get("category"),
            "category",
            validation::CATEGORY_MAX_CHARS,
        );
        let price = validation::non_negative_number(&mut errors, input.get("price"), "price");

        match (product_name, color, category, price) {
            (Some(product_name), Some(color), Some(category), Some(price)) if errors.is_empty() => {
                Ok(Self {
                    product_name,
                    color,
                    category,
                    price,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Raw request payload for create/update, before validation.
///
/// Anything that is not a JSON object is treated as an empty payload so it fails
/// the `required` rules instead of being rejected by the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductInput(Map<String, Value>);

impl ProductInput {
    pub fn from_json_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for ProductInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for ProductInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl core::fmt::Display for ProductInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("{}"),
        }
    }
}
