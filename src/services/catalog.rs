use std::collections::HashSet;
use std::path::Path;
use serde::Deserialize;
use thiserror::Error;
use crate::models::{GeoPoint, ListingFeedItem, SkillOffer, DISTANCE_UNKNOWN};

/// Offset applied to a feed id that collides with one already taken
pub const ID_COLLISION_OFFSET: u64 = 1_000_000;

const DEFAULT_TITLE: &str = "Untitled Skill";
const DEFAULT_CATEGORY: &str = "education";
const DEFAULT_OWNER: &str = "Unknown";
const DEFAULT_RATING: f64 = 5.0;
const DEFAULT_RATE: u32 = 1;

/// Errors that can occur while loading a listing feed
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported feed format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    List(Vec<ListingFeedItem>),
    Table { skills: Vec<ListingFeedItem> },
}

impl FeedDocument {
    fn into_items(self) -> Vec<ListingFeedItem> {
        match self {
            FeedDocument::List(items) | FeedDocument::Table { skills: items } => items,
        }
    }
}

/// Every offer the nearby search can show
#[derive(Debug, Clone, Default)]
pub struct OfferCatalog {
    offers: Vec<SkillOffer>,
}

impl OfferCatalog {
    pub fn new(offers: Vec<SkillOffer>) -> Self {
        Self { offers }
    }

    pub fn with_samples() -> Self {
        Self::new(sample_offers())
    }

    pub fn offers(&self) -> &[SkillOffer] {
        &self.offers
    }

    /// Owned copy of the offers, for handing to the search pipeline
    pub fn snapshot(&self) -> Vec<SkillOffer> {
        self.offers.clone()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&SkillOffer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    /// Normalize and append feed records, returning how many were added
    ///
    /// Records belonging to `current_member_id` are skipped so members do
    /// not see their own offers.
    pub fn extend_from_feed(&mut self, items: Vec<ListingFeedItem>, current_member_id: Option<i64>) -> usize {
        let mut taken: HashSet<u64> = self.offers.iter().map(|offer| offer.id).collect();
        let before = self.offers.len();

        for item in items {
            if is_owned_by(&item, current_member_id) {
                tracing::debug!("Skipping own listing {:?}", item.skill_name);
                continue;
            }
            self.offers.push(normalize_feed_item(item, &mut taken));
        }

        self.offers.len() - before
    }
}

/// Read feed records from a JSON or TOML file, chosen by extension
///
/// JSON files hold either an array of records or `{"skills": [...]}`;
/// TOML files hold `[[skills]]` tables.
pub fn load_feed_file<P: AsRef<Path>>(path: P) -> Result<Vec<ListingFeedItem>, CatalogError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;

    let document: FeedDocument = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw)?,
        Some("toml") => toml::from_str(&raw)?,
        other => {
            return Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };

    Ok(document.into_items())
}

fn is_owned_by(item: &ListingFeedItem, current_member_id: Option<i64>) -> bool {
    match (current_member_id, item.member_id.as_ref().and_then(|m| m.as_f64())) {
        (Some(current), Some(owner)) => owner == current as f64,
        _ => false,
    }
}

/// Turn a feed record into an offer, defaulting whatever is missing
///
/// `taken` holds ids already in use and receives the id chosen here.
pub fn normalize_feed_item(item: ListingFeedItem, taken: &mut HashSet<u64>) -> SkillOffer {
    let mut id = item
        .id
        .as_ref()
        .and_then(|id| id.as_f64())
        .filter(|id| *id >= 0.0 && id.fract() == 0.0 && *id < u64::MAX as f64)
        .map(|id| id as u64)
        .unwrap_or_else(generated_id);
    while taken.contains(&id) {
        // Shifting past u64::MAX restarts from a generated id
        id = id.checked_add(ID_COLLISION_OFFSET).unwrap_or_else(generated_id);
    }
    taken.insert(id);

    let owner_name = item
        .member_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_OWNER.to_string());

    let location = match (
        item.latitude.as_ref().and_then(|l| l.as_f64()),
        item.longitude.as_ref().and_then(|l| l.as_f64()),
    ) {
        (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude)
            .map_err(|e| tracing::warn!("Listing {} has invalid coordinates: {}", id, e))
            .ok(),
        _ => None,
    };

    let rating = item
        .rating
        .as_ref()
        .and_then(|r| r.as_f64())
        .map(|r| r.clamp(0.0, 5.0))
        .unwrap_or(DEFAULT_RATING);

    let rate_per_hour = item
        .rate
        .as_ref()
        .and_then(|r| r.as_f64())
        .map(|r| r.max(0.0).round().min(u32::MAX as f64) as u32)
        .unwrap_or(DEFAULT_RATE);

    SkillOffer {
        id,
        title: item
            .skill_name
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        category: item
            .category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        description: item.description.unwrap_or_default(),
        rating,
        rate_per_hour,
        owner_name,
        available: true,
        location,
        distance_km: None,
        distance: DISTANCE_UNKNOWN.to_string(),
    }
}

fn generated_id() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

fn sample(
    id: u64,
    title: &str,
    category: &str,
    description: &str,
    rating: f64,
    rate_per_hour: u32,
    owner_name: &str,
    available: bool,
    latitude: f64,
    longitude: f64,
) -> SkillOffer {
    SkillOffer {
        id,
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        rating,
        rate_per_hour,
        owner_name: owner_name.to_string(),
        available,
        location: Some(GeoPoint { latitude, longitude }),
        distance_km: None,
        distance: DISTANCE_UNKNOWN.to_string(),
    }
}

/// Built-in demo offers around Mumbai
pub fn sample_offers() -> Vec<SkillOffer> {
    vec![
        sample(
            1,
            "Guitar Lessons",
            "arts",
            "Learn acoustic and electric guitar basics to intermediate techniques.",
            4.8,
            1,
            "Sarah M.",
            true,
            19.076, // Dadar
            72.8777,
        ),
        sample(
            2,
            "Web Development",
            "technology",
            "HTML, CSS, JavaScript and modern frameworks like React.",
            4.9,
            2,
            "Mike T.",
            true,
            19.1136, // Andheri
            72.8697,
        ),
        sample(
            3,
            "Yoga & Meditation",
            "wellness",
            "Relaxation techniques and beginner-friendly yoga sessions.",
            5.0,
            1,
            "Emma L.",
            false,
            19.0176, // Colaba
            72.8562,
        ),
        sample(
            4,
            "French Language",
            "education",
            "Conversational French for beginners to advanced learners.",
            4.7,
            1,
            "Pierre D.",
            true,
            19.0896, // Bandra
            72.8347,
        ),
        sample(
            5,
            "Home Repairs",
            "home",
            "Basic plumbing, electrical work, and general fixes.",
            4.6,
            2,
            "Bob K.",
            true,
            19.2183, // Borivali
            72.9781,
        ),
        sample(
            6,
            "Digital Photography",
            "arts",
            "Camera settings, composition, and photo editing basics.",
            4.9,
            1,
            "Lisa R.",
            true,
            19.033, // Worli
            72.8162,
        ),
    ]
}
