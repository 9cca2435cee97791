//! Document-appearance adapter writing the theme attribute and desktop background to the DOM.

use platform_host::{DesktopBackground, DocumentAppearance};

/// Element id of the desktop background layer.
pub const DESKTOP_BACKGROUND_ELEMENT_ID: &str = "desktopBg";

#[derive(Debug, Clone, Copy, Default)]
/// Browser appearance service: `data-theme` on `<body>` and inline styles on the background layer.
pub struct WebDocumentAppearance;

#[cfg(target_arch = "wasm32")]
fn document() -> Result<web_sys::Document, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn background_style() -> Result<web_sys::CssStyleDeclaration, String> {
    use wasm_bindgen::JsCast;

    let element = document()?
        .get_element_by_id(DESKTOP_BACKGROUND_ELEMENT_ID)
        .ok_or_else(|| format!("#{DESKTOP_BACKGROUND_ELEMENT_ID} not found"))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| "desktop background is not an HTML element".to_string())?;
    Ok(element.style())
}

/// CSS property/value pairs written for a background, in write order.
pub fn background_declarations(background: &DesktopBackground) -> Vec<(&'static str, String)> {
    match background {
        DesktopBackground::Gradient(css) => vec![
            ("background", css.clone()),
            ("background-image", css.clone()),
        ],
        DesktopBackground::Flat(color) => vec![
            ("background", color.clone()),
            ("background-image", "none".to_string()),
        ],
        DesktopBackground::Image(url) => vec![
            ("background-image", format!("url({url})")),
            ("background-size", "cover".to_string()),
            ("background-position", "center".to_string()),
            ("background-repeat", "no-repeat".to_string()),
        ],
    }
}

impl DocumentAppearance for WebDocumentAppearance {
    fn set_theme_attribute(&self, theme: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let body = document()?
                .body()
                .ok_or_else(|| "document body unavailable".to_string())?;
            body.set_attribute("data-theme", theme)
                .map_err(|e| format!("set data-theme failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = theme;
            Ok(())
        }
    }

    fn set_desktop_background(&self, background: &DesktopBackground) -> Result<(), String> {
        let declarations = background_declarations(background);

        #[cfg(target_arch = "wasm32")]
        {
            let style = background_style()?;
            for (property, value) in declarations {
                style
                    .set_property(property, &value)
                    .map_err(|e| format!("set {property} failed: {e:?}"))?;
            }
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = declarations;
            Ok(())
        }
    }
}
