use chrono::{DateTime, Utc};

/// Placeholder substituted with the token id in icon URL templates.
pub const CURRENCY_PLACEHOLDER: &str = "{currency}";

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: String,
    pub price: f64,
    pub icon_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(id: &str, price: f64, icon_template: &str) -> Self {
        Token {
            id: id.to_string(),
            price,
            icon_url: icon_url(icon_template, id),
            updated_at: None,
        }
    }
}

/// Expands an icon URL template for a token id.
pub fn icon_url(template: &str, id: &str) -> String {
    template.replace(CURRENCY_PLACEHOLDER, id)
}
