// Plain value types passed between the API layer and the post store

/// Categories the client offers. The server stores any string.
pub const KNOWN_CATEGORIES: &[&str] = &["convention", "festival", "exhibition", "fair"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub category: String,
    pub time: String,
    pub location: String,
}

/// Partial update. `None` leaves the stored value untouched; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.time.is_none()
            && self.location.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact match on the free-form time field.
    pub time: Option<String>,
}

impl PostFilter {
    pub fn by_time(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
        }
    }
}

pub fn is_known_category(category: &str) -> bool {
    KNOWN_CATEGORIES.contains(&category)
}
