use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_NAME: &str = "Unnamed Business";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_ADDRESS: &str = "Address not available";
pub const DEFAULT_PHONE: &str = "Phone not available";
/// Null-navigation marker used when a member has no website
pub const DEFAULT_WEBSITE: &str = "#";
pub const DEFAULT_IMAGE: &str = "placeholder-logo.jpg";

/// Membership tier of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    /// A membership value outside the known tiers; shown with the generic label
    Unranked,
}

impl Tier {
    /// Map a numeric tier (1 = Bronze, 2 = Silver, 3 = Gold)
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => Tier::Bronze,
            2 => Tier::Silver,
            3 => Tier::Gold,
            _ => Tier::Unranked,
        }
    }

    /// Numeric level, `0` for [`Tier::Unranked`]
    pub fn level(self) -> u8 {
        match self {
            Tier::Bronze => 1,
            Tier::Silver => 2,
            Tier::Gold => 3,
            Tier::Unranked => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Unranked => "Member",
        }
    }

    /// Badge text shown on cards
    pub fn badge(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze Member",
            Tier::Silver => "Silver Member",
            Tier::Gold => "Gold Member",
            Tier::Unranked => "Member",
        }
    }

    /// CSS class for the badge, e.g. `level-3`
    pub fn css_class(self) -> String {
        format!("level-{}", self.level())
    }

    /// Silver and Gold members are eligible for the spotlight
    pub fn qualifies_for_spotlight(self) -> bool {
        matches!(self, Tier::Silver | Tier::Gold)
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Bronze
    }
}

/// A member record as it appears in the external document.
///
/// Every field is optional and loosely typed; [`crate::normalize`] turns it
/// into a complete [`Member`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMember {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub membership: Option<Value>,
}

/// Top-level shape of a member document: a bare array or `{ "members": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberDocument {
    List(Vec<Value>),
    Wrapped { members: Vec<Value> },
}

impl MemberDocument {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            MemberDocument::List(entries) => entries,
            MemberDocument::Wrapped { members } => members,
        }
    }
}

/// A fully populated member; every field holds a displayable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image: String,
    pub tier: Tier,
}

impl Default for Member {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            website: DEFAULT_WEBSITE.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            tier: Tier::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_levels() {
        assert_eq!(Tier::from_level(3), Tier::Gold);
        assert_eq!(Tier::from_level(2), Tier::Silver);
        assert_eq!(Tier::from_level(1), Tier::Bronze);
        assert_eq!(Tier::from_level(0), Tier::Unranked);
        assert_eq!(Tier::from_level(7), Tier::Unranked);
        assert_eq!(Tier::Unranked.badge(), "Member");
        assert_eq!(Tier::Gold.css_class(), "level-3");
    }

    #[test]
    fn test_document_shapes() {
        let bare: MemberDocument = serde_json::from_value(serde_json::json!([{"name": "A"}])).unwrap();
        assert_eq!(bare.into_entries().len(), 1);

        let wrapped: MemberDocument =
            serde_json::from_value(serde_json::json!({"members": [{"name": "A"}, {"name": "B"}]}))
                .unwrap();
        assert_eq!(wrapped.into_entries().len(), 2);

        let bad = serde_json::from_value::<MemberDocument>(serde_json::json!({"members": "nope"}));
        assert!(bad.is_err());
    }
}
