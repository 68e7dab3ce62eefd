use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ResidenceType {
    Hotel,
    Apartment,
    Villa,
    Studio,
    Suite,
    Room,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ResidenceStatus {
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

fn default_media_kind() -> MediaKind {
    MediaKind::Image
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    #[serde(default = "default_media_kind")]
    pub kind: MediaKind,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Residence {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ResidenceType,
    pub price: i64,
    pub location: String,
    pub address: Option<String>,
    pub reference: Option<String>,
    pub media: Json<Vec<MediaItem>>,
    pub amenities: Json<Vec<String>>,
    /// Identity reference of the owning actor; set at creation, never
    /// changed afterwards.
    pub owner: String,
    pub status: ResidenceStatus,
    pub rating: f32,
    pub reviews_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Trimmed projection of a residence embedded into reservation views.
#[derive(Debug, Clone, Serialize)]
pub struct ResidenceSummary {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: i64,
    pub owner: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateResidence {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResidenceType,
    #[validate(range(min = 1000, max = 1000000))]
    pub price: i64,
    #[validate(length(min = 1))]
    pub location: String,
    pub address: Option<String>,
    pub reference: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Optional owner override (an admin listing on someone's behalf);
    /// defaults to the acting identity.
    pub owner: Option<String>,
}

impl CreateResidence {
    /// Trim free-text fields and drop empty optionals before validation.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.location = self.location.trim().to_owned();
        self.description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        self.address = self
            .address
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());
        self.reference = self
            .reference
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());
        self.owner = self
            .owner
            .map(|o| o.trim().to_owned())
            .filter(|o| !o.is_empty());
        self
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateResidence {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ResidenceType>,
    #[validate(range(min = 1000, max = 1000000))]
    pub price: Option<i64>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub address: Option<String>,
    pub reference: Option<String>,
    /// Wholesale replacement when provided; untouched otherwise.
    pub amenities: Option<Vec<String>>,
    /// Urls of existing media entries to drop.
    #[serde(default)]
    pub media_to_delete: Vec<String>,
    /// Freshly uploaded media descriptors, appended after the kept ones.
    #[serde(default)]
    pub new_media: Vec<MediaItem>,
}

impl Residence {
    /// Merge a partial update into the stored entity. Owner, status and
    /// the review aggregates are not reachable through this path.
    pub fn apply_update(mut self, update: UpdateResidence) -> Self {
        if let Some(title) = update.title {
            self.title = title.trim().to_owned();
        }
        if let Some(description) = update.description {
            let description = description.trim().to_owned();
            self.description = (!description.is_empty()).then_some(description);
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(location) = update.location {
            self.location = location.trim().to_owned();
        }
        if let Some(address) = update.address {
            let address = address.trim().to_owned();
            self.address = (!address.is_empty()).then_some(address);
        }
        if let Some(reference) = update.reference {
            let reference = reference.trim().to_owned();
            self.reference = (!reference.is_empty()).then_some(reference);
        }
        if let Some(amenities) = update.amenities {
            self.amenities = Json(amenities);
        }

        // kept-existing entries keep their order, new ones go after
        let mut media: Vec<MediaItem> = self
            .media
            .0
            .into_iter()
            .filter(|item| !update.media_to_delete.contains(&item.url))
            .collect();
        media.extend(update.new_media);
        self.media = Json(media);

        self
    }
}

/// Public listing filters: substring match on location/title plus a price
/// ceiling.
#[derive(Debug, Default, Deserialize)]
pub struct ResidenceFilter {
    pub city: Option<String>,
    pub title: Option<String>,
    pub max_price: Option<i64>,
}
