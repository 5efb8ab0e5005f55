use serde_json::{Map, Value};

pub const CANCELLATION_FLOW: &str = "remove";

pub const CANCEL_FORM_START: &str = "purchases_cancel_form_start";
pub const CANCEL_FORM_CLOSE: &str = "purchases_cancel_form_close";
pub const CANCEL_FORM_STEP: &str = "purchases_cancel_form_step";
pub const CANCEL_FORM_SUBMIT: &str = "purchases_cancel_form_submit";
pub const PRECANCELLATION_CHAT_CLICK: &str = "precancellation_chat_click";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackEvent {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl TrackEvent {
    pub fn new(name: &str, properties: Map<String, Value>) -> Self {
        Self {
            name: name.to_string(),
            properties,
        }
    }

    /// Cancel-form event tagged with the flow and the product being removed.
    pub(crate) fn cancel_form(name: &str, product_slug: &str, extra: Map<String, Value>) -> Self {
        let mut properties = Map::new();
        properties.insert(
            "cancellation_flow".to_string(),
            Value::from(CANCELLATION_FLOW),
        );
        properties.insert("product_slug".to_string(), Value::from(product_slug));
        properties.extend(extra);
        Self::new(name, properties)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
