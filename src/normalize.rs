//! Mapping of loosely typed member records to complete [`Member`] values.

use crate::types::{
    Member, RawMember, Tier, DEFAULT_ADDRESS, DEFAULT_DESCRIPTION, DEFAULT_IMAGE, DEFAULT_NAME,
    DEFAULT_PHONE, DEFAULT_WEBSITE,
};
use serde_json::Value;

/// Normalize a single record. Records that are not objects become a member
/// made entirely of defaults.
pub fn normalize_member(value: &Value) -> Member {
    let raw: RawMember = match value {
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::debug!("Unreadable member record ({}), using defaults", e);
            RawMember::default()
        }),
        other => {
            tracing::debug!("Member record is not an object: {}", other);
            RawMember::default()
        }
    };

    Member {
        name: text_field(raw.name.as_ref(), DEFAULT_NAME),
        description: text_field(raw.description.as_ref(), DEFAULT_DESCRIPTION),
        address: text_field(raw.address.as_ref(), DEFAULT_ADDRESS),
        phone: text_field(raw.phone.as_ref(), DEFAULT_PHONE),
        website: text_field(raw.website.as_ref(), DEFAULT_WEBSITE),
        image: text_field(raw.image.as_ref(), DEFAULT_IMAGE),
        tier: parse_tier(raw.membership.as_ref()),
    }
}

/// Normalize every record, preserving order
pub fn normalize_members(values: &[Value]) -> Vec<Member> {
    values.iter().map(normalize_member).collect()
}

/// Resolve a displayable string, substituting `default` for missing, null,
/// blank or structured values
fn text_field(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

/// Resolve the membership tier.
///
/// Missing values default to Bronze. Known numeric levels map directly; legacy
/// string labels (`"Gold"`, `"silver"`) and numeric strings (`"3"`) are
/// accepted. Anything else is [`Tier::Unranked`].
pub fn parse_tier(value: Option<&Value>) -> Tier {
    match value {
        None | Some(Value::Null) => Tier::Bronze,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => Tier::from_level(f as i64),
            _ => {
                tracing::warn!("Unrecognized membership level: {}", n);
                Tier::Unranked
            }
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if let Ok(level) = trimmed.parse::<i64>() {
                return Tier::from_level(level);
            }
            let tier = match trimmed.to_lowercase().as_str() {
                "gold" => Tier::Gold,
                "silver" => Tier::Silver,
                "bronze" => Tier::Bronze,
                _ => Tier::Unranked,
            };
            if tier == Tier::Unranked {
                tracing::warn!("Unrecognized membership label: {:?}", s);
            } else {
                tracing::debug!("Legacy membership label {:?} normalized to level {}", s, tier.level());
            }
            tier
        }
        Some(other) => {
            tracing::warn!("Unrecognized membership value: {}", other);
            Tier::Unranked
        }
    }
}
