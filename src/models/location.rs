use serde::Serialize;

/// Body parts shipped as defaults. Anything else is a user-defined location.
pub const CANONICAL_BODY_PARTS: [&str; 4] = ["Abdomen", "Thigh", "Arm", "Buttock"];

/// True when `body_part` is not one of the canonical defaults.
pub fn classify(body_part: &str) -> bool {
    !CANONICAL_BODY_PARTS.contains(&body_part)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Laterality {
    Left,  // L
    Right, // R
}

impl Laterality {
    /// Short label used in display names.
    pub fn code(&self) -> &str {
        match self {
            Laterality::Left => "L",
            Laterality::Right => "R",
        }
    }

    /// Long label used by files written before the short form existed.
    pub fn legacy_label(&self) -> &str {
        match self {
            Laterality::Left => "Left",
            Laterality::Right => "Right",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &str {
        match self {
            Laterality::Left => "left",
            Laterality::Right => "right",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Laterality::Left),
            "right" => Some(Laterality::Right),
            _ => None,
        }
    }
}

/// Structured form of a location display name.
///
/// Equality covers `(body_part, sub_area, laterality)` only; whether the
/// location is custom is derived from `body_part` and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocationIdentity {
    pub body_part: String,
    pub sub_area: Option<String>,
    pub laterality: Option<Laterality>,
}

impl LocationIdentity {
    pub fn new(body_part: &str, sub_area: Option<&str>, laterality: Option<Laterality>) -> Self {
        Self {
            body_part: body_part.to_string(),
            sub_area: sub_area.map(str::to_string),
            laterality,
        }
    }

    pub fn is_custom(&self) -> bool {
        classify(&self.body_part)
    }

    /// Legacy "zone" text: sub-area words followed by the body part.
    pub fn zone(&self) -> String {
        match &self.sub_area {
            Some(sub) => format!("{} {}", sub, self.body_part),
            None => self.body_part.clone(),
        }
    }
}

/// A persisted location row.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: i64,
    pub identity: LocationIdentity,
    pub is_enabled: bool,
    pub sort_order: i32,
}

impl Location {
    pub fn is_custom(&self) -> bool {
        self.identity.is_custom()
    }

    pub fn display_name(&self) -> String {
        crate::core::location_name::encode(&self.identity)
    }
}
