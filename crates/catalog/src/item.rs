use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 20;
pub const DESCRIPTION_MIN_LEN: usize = 3;
pub const DESCRIPTION_MAX_LEN: usize = 10_240;

/// Price in smallest currency unit (e.g., cents).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}$", self.0 / 100, self.0 % 100)
    }
}

/// Binary product image plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ValueObject for ItemImage {}

/// A purchasable catalog item.
///
/// Owned by the catalog. The cart engine holds items only as read-only
/// references when validating a draft against `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    id: ItemId,
    title: String,
    description: String,
    price: Price,
    count: i64,
    image: Option<ItemImage>,
}

impl Item {
    /// Build a validated item.
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        count: i64,
    ) -> DomainResult<Self> {
        let title = title.into().trim().to_string();
        let description = description.into();

        let title_len = title.chars().count();
        if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&title_len) {
            return Err(DomainError::validation(format!(
                "title must be {TITLE_MIN_LEN}..={TITLE_MAX_LEN} characters (got {title_len})"
            )));
        }

        let description_len = description.chars().count();
        if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&description_len) {
            return Err(DomainError::validation(format!(
                "description must be {DESCRIPTION_MIN_LEN}..={DESCRIPTION_MAX_LEN} characters (got {description_len})"
            )));
        }

        if count < 0 {
            return Err(DomainError::validation("count cannot be negative"));
        }

        Ok(Self {
            id,
            title,
            description,
            price,
            count,
            image: None,
        })
    }

    /// Attach an image. The content type must be non-empty.
    pub fn with_image(mut self, content_type: impl Into<String>, data: Vec<u8>) -> DomainResult<Self> {
        let content_type = content_type.into();
        if content_type.trim().is_empty() {
            return Err(DomainError::validation("image content type cannot be empty"));
        }
        self.image = Some(ItemImage { content_type, data });
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Available stock.
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn image(&self) -> Option<&ItemImage> {
        self.image.as_ref()
    }

    pub fn in_stock(&self) -> bool {
        self.count > 0
    }

    /// Same item with a different stock level. Used by the catalog when the
    /// backend settles a submission.
    pub(crate) fn with_count(&self, count: i64) -> Self {
        Self {
            count,
            ..self.clone()
        }
    }
}

/// Wire shape of [`Item`]; deserialized items go through [`Item::new`].
#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    title: String,
    description: String,
    price: Price,
    count: i64,
    #[serde(default)]
    image: Option<ItemImage>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let item = Item::new(record.id, record.title, record.description, record.price, record.count)?;
        match record.image {
            Some(image) => item.with_image(image.content_type, image.data),
            None => Ok(item),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(count: i64) -> DomainResult<Item> {
        Item::new(ItemId::new(1), "Widget", "A useful widget", Price::from_cents(1999), count)
    }

    #[test]
    fn builds_valid_item() {
        let item = widget(10).unwrap();
        assert_eq!(item.id(), &ItemId::new(1));
        assert_eq!(item.title(), "Widget");
        assert_eq!(item.count(), 10);
        assert!(item.in_stock());
        assert!(item.image().is_none());
    }

    #[test]
    fn title_is_trimmed_and_length_checked() {
        let item = Item::new(ItemId::new(2), "  Lamp  ", "Desk lamp", Price::default(), 0).unwrap();
        assert_eq!(item.title(), "Lamp");
        assert!(!item.in_stock());

        let err = Item::new(ItemId::new(3), "ab", "too short title", Price::default(), 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("title")));

        let long = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(Item::new(ItemId::new(4), long, "desc", Price::default(), 1).is_err());
    }

    #[test]
    fn description_bounds() {
        assert!(Item::new(ItemId::new(1), "Widget", "ab", Price::default(), 1).is_err());
        let max = "d".repeat(DESCRIPTION_MAX_LEN);
        assert!(Item::new(ItemId::new(1), "Widget", max, Price::default(), 1).is_ok());
    }

    #[test]
    fn negative_count_rejected() {
        let err = widget(-1).unwrap_err();
        assert_eq!(err, DomainError::validation("count cannot be negative"));
    }

    #[test]
    fn image_requires_content_type() {
        let item = widget(1).unwrap();
        assert!(item.clone().with_image("", vec![1, 2]).is_err());

        let item = item.with_image("image/png", vec![0x89, 0x50]).unwrap();
        assert_eq!(item.image().map(|i| i.content_type.as_str()), Some("image/png"));
    }

    #[test]
    fn deserialized_items_are_validated() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "id": 1, "title": " Widget ", "description": "A useful widget",
            "price": 1999, "count": 10
        }))
        .unwrap();
        assert_eq!(item, widget(10).unwrap());

        let negative = serde_json::from_value::<Item>(serde_json::json!({
            "id": 1, "title": "Widget", "description": "A useful widget",
            "price": 1999, "count": -3
        }));
        assert!(negative.unwrap_err().to_string().contains("count cannot be negative"));

        let short_title = serde_json::from_value::<Item>(serde_json::json!({
            "id": 1, "title": "ab", "description": "A useful widget",
            "price": 1999, "count": 1
        }));
        assert!(short_title.is_err());
    }

    #[test]
    fn price_display() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99$");
        assert_eq!(Price::from_cents(5).to_string(), "0.05$");
    }
}
