//! Document-appearance contracts: the theme attribute and the desktop background layer.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
/// Resolved desktop background, ready to be written to the background element.
///
/// Exactly one rendering path applies per variant.
pub enum DesktopBackground {
    /// CSS gradient image (for example `linear-gradient(...)`).
    Gradient(String),
    /// Flat CSS color; any background image is cleared.
    Flat(String),
    /// Image URL (typically a `data:` URL) rendered cover/center/no-repeat.
    Image(String),
}

/// Host service that applies appearance changes to the document.
pub trait DocumentAppearance {
    /// Sets the document-wide theme attribute (`light` or `dark`).
    fn set_theme_attribute(&self, theme: &str) -> Result<(), String>;

    /// Replaces the desktop background.
    fn set_desktop_background(&self, background: &DesktopBackground) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Appearance service that ignores every change.
pub struct NoopDocumentAppearance;

impl DocumentAppearance for NoopDocumentAppearance {
    fn set_theme_attribute(&self, _theme: &str) -> Result<(), String> {
        Ok(())
    }

    fn set_desktop_background(&self, _background: &DesktopBackground) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Last values written through a [`MemoryDocumentAppearance`].
pub struct AppliedAppearance {
    /// Last theme attribute.
    pub theme: Option<String>,
    /// Last background.
    pub background: Option<DesktopBackground>,
    /// Number of writes of either kind.
    pub writes: usize,
}

#[derive(Debug, Clone, Default)]
/// Appearance service that records what it was asked to apply. Clones share the record.
pub struct MemoryDocumentAppearance {
    inner: Rc<RefCell<AppliedAppearance>>,
}

impl MemoryDocumentAppearance {
    /// Returns a copy of the recorded appearance.
    pub fn applied(&self) -> AppliedAppearance {
        self.inner.borrow().clone()
    }
}

impl DocumentAppearance for MemoryDocumentAppearance {
    fn set_theme_attribute(&self, theme: &str) -> Result<(), String> {
        let mut applied = self.inner.borrow_mut();
        applied.theme = Some(theme.to_string());
        applied.writes += 1;
        Ok(())
    }

    fn set_desktop_background(&self, background: &DesktopBackground) -> Result<(), String> {
        let mut applied = self.inner.borrow_mut();
        applied.background = Some(background.clone());
        applied.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn memory_appearance_records_last_write() {
        let appearance = MemoryDocumentAppearance::default();
        let handle = appearance.clone();
        appearance.set_theme_attribute("dark").expect("theme");
        appearance
            .set_desktop_background(&DesktopBackground::Flat("#112233".to_string()))
            .expect("background");

        let applied = handle.applied();
        assert_eq!(applied.theme.as_deref(), Some("dark"));
        assert_eq!(
            applied.background,
            Some(DesktopBackground::Flat("#112233".to_string()))
        );
        assert_eq!(applied.writes, 2);
    }

    #[test]
    fn background_serializes_with_kind_tag() {
        let value = serde_json::to_value(DesktopBackground::Image("data:x".to_string()))
            .expect("serialize");
        assert_eq!(value, json!({"kind": "image", "value": "data:x"}));
    }
}
