//! Filter selections.

use serde::Serialize;

use crate::model::Entity;

/// Value used by clients to mean "do not filter on this dimension".
pub const ALL: &str = "all";

/// One filter dimension: everything, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `None`, empty and `"all"` select everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(v) => v,
        }
    }
}

/// Active filters. All dimensions are independent and combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub service: Selection,
    pub provider: Selection,
    pub channel: Selection,
    pub category: Selection,
}

impl Filters {
    /// Filters that let every entity through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        self.service.matches(Some(&entity.service))
            && self.provider.matches(Some(&entity.provider))
            && self.channel.matches(entity.channel.as_deref())
            && self.category.matches(entity.category.as_ref().map(|c| c.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("all")), Selection::All);
        assert_eq!(Selection::parse(Some(" ")), Selection::All);
        assert_eq!(Selection::parse(Some("vip")), Selection::Only("vip".to_string()));
    }

    #[test]
    fn test_selection_matches() {
        let only = Selection::Only("cc".to_string());
        assert!(only.matches(Some("cc")));
        assert!(!only.matches(Some("cx")));
        assert!(!only.matches(None));
        assert!(Selection::All.matches(None));
    }
}
