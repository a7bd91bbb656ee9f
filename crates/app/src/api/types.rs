//! Wire types for the remote REST API.
//!
//! Order submission uses the server's Spanish field names; everything else
//! is camelCase. Monetary amounts go over the wire as JSON numbers.

use bluefruit_core::{
    CustomerId, CustomerRole, Email, Money, OrderStatus, ProductId, ServerOrderId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DraftOrder, Product, Session};

// =============================================================================
// Login
// =============================================================================

/// `POST /login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /login` success response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: UserDto,
}

/// Account data as the server sends it.
#[derive(Debug, Deserialize)]
pub struct UserDto {
    #[serde(alias = "_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub role: CustomerRole,
}

impl From<UserDto> for Session {
    fn from(user: UserDto) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// `POST /orders` request body.
///
/// Exactly the fields the order API accepts - nothing presentation-only
/// may appear here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    #[serde(rename = "numeroOrden")]
    pub order_number: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "total", with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub items: Vec<OrderPayloadLine>,
    #[serde(rename = "estado")]
    pub status: String,
}

/// One sanitized order line on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayloadLine {
    pub id: String,
    pub name: String,
    #[serde(rename = "unitPrice", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<&DraftOrder> for OrderPayload {
    fn from(draft: &DraftOrder) -> Self {
        Self {
            order_number: draft.order_number.as_str().to_owned(),
            date: draft.created_at.to_rfc3339(),
            total: draft.total.amount(),
            items: draft
                .items
                .iter()
                .map(|line| OrderPayloadLine {
                    id: line.id.as_str().to_owned(),
                    name: line.name.clone(),
                    unit_price: line.unit_price.amount(),
                    quantity: line.quantity,
                })
                .collect(),
            status: OrderStatus::WIRE_NEW.to_owned(),
        }
    }
}

/// `POST /orders` success response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrder {
    #[serde(alias = "_id")]
    pub id: ServerOrderId,
}

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product as the server sends it.
#[derive(Debug, Deserialize)]
pub struct ProductDto {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub flavor: serde_json::Value,
    #[serde(default)]
    pub image: String,
}

impl ProductDto {
    /// Convert to the domain product, normalizing flavor labels.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            flavors: normalize_flavor_labels(&self.flavor),
            image: self.image,
        }
    }
}

/// How many times a flavor value may be JSON-decoded before we give up and
/// treat it as a literal label.
const MAX_UNESCAPE_PASSES: usize = 4;

/// Normalize the catalog's flavor field into a clean, de-duplicated list of
/// labels.
///
/// Historical product records carry flavors in several shapes: a plain
/// label (`"Naranja"`), a JSON array, an array serialized into a string
/// (`"[\"Naranja\",\"Fresa\"]"`), and the same string escaped one more
/// time. All of them decode here, once, at the ingestion boundary.
#[must_use]
pub fn normalize_flavor_labels(raw: &serde_json::Value) -> Vec<String> {
    let mut labels = Vec::new();
    collect_labels(raw, &mut labels, 0);
    labels
}

fn collect_labels(value: &serde_json::Value, out: &mut Vec<String>, depth: usize) {
    match value {
        serde_json::Value::Array(values) => {
            for value in values {
                collect_labels(value, out, depth);
            }
        }
        serde_json::Value::String(s) => collect_label_str(s, out, depth),
        _ => {}
    }
}

fn collect_label_str(s: &str, out: &mut Vec<String>, depth: usize) {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return;
    }

    // A label that looks like embedded JSON gets decoded and re-examined
    if depth < MAX_UNESCAPE_PASSES && (trimmed.starts_with('[') || trimmed.starts_with('"')) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
            collect_labels(&value, out, depth + 1);
            return;
        }
    }

    if !out.iter().any(|existing| existing == trimmed) {
        out.push(trimmed.to_owned());
    }
}

// =============================================================================
// Account flows
// =============================================================================

/// `POST /registerCustomers` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub date_birth: NaiveDate,
}

/// Body for recovery/verification endpoints that take only an email.
#[derive(Debug, Serialize)]
pub struct EmailBody<'a> {
    pub email: &'a str,
}

/// Body for endpoints that take an email plus a mailed code.
#[derive(Debug, Serialize)]
pub struct EmailCodeBody<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// `POST /passwordRecovery/newPassword` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPasswordBody<'a> {
    pub email: &'a str,
    pub code: &'a str,
    pub new_password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Cart, NewLineItem};
    use serde_json::json;

    #[test]
    fn test_order_payload_wire_shape() {
        let mut cart = Cart::default();
        cart.items.push(
            NewLineItem {
                product_id: ProductId::new("P1"),
                name: "Ener Kik".to_owned(),
                unit_price: Money::new("4.50".parse::<Decimal>().unwrap()),
                quantity: 2,
                variant_label: "Naranja".to_owned(),
                image_ref: "https://img.example/gel.png".to_owned(),
            }
            .into_line_item(),
        );

        let draft = DraftOrder::from_cart(&cart);
        let payload = OrderPayload::from(&draft);
        let json = serde_json::to_value(&payload).unwrap();

        let mut keys: Vec<&str> =
            json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["estado", "fecha", "items", "numeroOrden", "total"]);

        assert_eq!(json["estado"], "En proceso");
        assert_eq!(json["total"], json!(9.0));
        assert_eq!(json["items"][0]["unitPrice"], json!(4.5));

        // Sanitization: variant/image never reach the wire
        let mut line_keys: Vec<&str> = json["items"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        line_keys.sort_unstable();
        assert_eq!(line_keys, ["id", "name", "quantity", "unitPrice"]);
    }

    #[test]
    fn test_user_dto_accepts_mongo_id() {
        let user: UserDto = serde_json::from_value(json!({
            "_id": "C1",
            "name": "Juan",
            "email": "juan@correo.com",
            "role": "customer",
        }))
        .unwrap();
        assert_eq!(user.id, CustomerId::new("C1"));

        let session = Session::from(user);
        assert_eq!(session.role, CustomerRole::Customer);
    }

    #[test]
    fn test_product_dto_plain_flavor() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": "P1",
            "name": "Ener Balance",
            "price": 2.5,
            "flavor": "Naranja",
        }))
        .unwrap();
        assert_eq!(dto.into_product().flavors, vec!["Naranja"]);
    }

    #[test]
    fn test_normalize_array() {
        let labels = normalize_flavor_labels(&json!(["Naranja", "Fresa"]));
        assert_eq!(labels, vec!["Naranja", "Fresa"]);
    }

    #[test]
    fn test_normalize_array_in_string() {
        let labels = normalize_flavor_labels(&json!("[\"Naranja\",\"Fresa\"]"));
        assert_eq!(labels, vec!["Naranja", "Fresa"]);
    }

    #[test]
    fn test_normalize_double_escaped_string() {
        // The array was serialized, then serialized again
        let doubly = serde_json::to_string("[\"Naranja\",\"Fresa\"]").unwrap();
        let labels = normalize_flavor_labels(&serde_json::Value::String(doubly));
        assert_eq!(labels, vec!["Naranja", "Fresa"]);
    }

    #[test]
    fn test_normalize_dedupes_and_trims() {
        let labels = normalize_flavor_labels(&json!([" Naranja ", "Naranja", "", "Fresa"]));
        assert_eq!(labels, vec!["Naranja", "Fresa"]);
    }

    #[test]
    fn test_normalize_null_and_numbers() {
        assert!(normalize_flavor_labels(&serde_json::Value::Null).is_empty());
        assert!(normalize_flavor_labels(&json!(42)).is_empty());
    }

    #[test]
    fn test_registration_wire_shape() {
        let registration = Registration {
            name: "Juan".to_owned(),
            last_name: "Pérez".to_owned(),
            email: Email::parse("juan@correo.com").unwrap(),
            password: "secreta123".to_owned(),
            date_birth: NaiveDate::from_ymd_opt(2000, 1, 15).unwrap(),
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["lastName"], "Pérez");
        assert_eq!(json["dateBirth"], "2000-01-15");
    }

    #[test]
    fn test_created_order_accepts_both_id_fields() {
        let a: CreatedOrder = serde_json::from_value(json!({"id": "O1"})).unwrap();
        let b: CreatedOrder = serde_json::from_value(json!({"_id": "O2"})).unwrap();
        assert_eq!(a.id, ServerOrderId::new("O1"));
        assert_eq!(b.id, ServerOrderId::new("O2"));
    }
}
