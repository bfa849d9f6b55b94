//! Accessibility records handed through to the host platform.

use crate::config::ResolvedAccessibility;

/// Merged accessibility description for one node, in the shape the host's
/// accessibility tree consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemanticsConfiguration {
    pub content_description: Option<String>,
    pub hint: Option<String>,
    pub role: Option<String>,
    pub is_button: bool,
}

impl SemanticsConfiguration {
    pub fn merge(&mut self, other: &SemanticsConfiguration) {
        if let Some(description) = &other.content_description {
            self.content_description = Some(description.clone());
        }
        if let Some(hint) = &other.hint {
            self.hint = Some(hint.clone());
        }
        if let Some(role) = &other.role {
            self.role = Some(role.clone());
        }
        self.is_button |= other.is_button;
    }
}

/// Semantics for the stack container.
pub(crate) fn container_semantics(accessibility: &ResolvedAccessibility) -> SemanticsConfiguration {
    SemanticsConfiguration {
        content_description: Some(accessibility.label.clone()),
        hint: Some(accessibility.hint.clone()),
        role: accessibility.role.clone(),
        is_button: false,
    }
}

/// Semantics for one card; the label counts from 1 the way a screen reader
/// announces position.
pub(crate) fn card_semantics(index: usize, hint: &str) -> SemanticsConfiguration {
    SemanticsConfiguration {
        content_description: Some(format!("Card {}", index + 1)),
        hint: Some(hint.to_string()),
        role: Some("button".to_string()),
        is_button: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlays_present_fields() {
        let mut base = SemanticsConfiguration {
            content_description: Some("deck".into()),
            ..Default::default()
        };
        base.merge(&SemanticsConfiguration {
            hint: Some("swipe".into()),
            is_button: true,
            ..Default::default()
        });

        assert_eq!(base.content_description.as_deref(), Some("deck"));
        assert_eq!(base.hint.as_deref(), Some("swipe"));
        assert!(base.is_button);
    }

    #[test]
    fn card_semantics_count_from_one() {
        let semantics = card_semantics(0, "hint");
        assert_eq!(semantics.content_description.as_deref(), Some("Card 1"));
        assert_eq!(semantics.role.as_deref(), Some("button"));
    }
}
