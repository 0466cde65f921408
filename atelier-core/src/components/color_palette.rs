use serde::Serialize;

/// Ordered row of colour swatches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    pub title: Option<String>,
    pub colors: Vec<String>,
}

impl ColorPalette {
    pub fn new(colors: Vec<String>) -> Self {
        Self {
            title: None,
            colors,
        }
    }

    pub fn titled(title: &str, colors: Vec<String>) -> Self {
        Self {
            title: Some(title.to_string()),
            colors,
        }
    }

    /// The colour under swatch `index`, if there is one
    pub fn click(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_returns_swatch_colour() {
        let palette = ColorPalette::titled(
            "Color Palette",
            vec!["#F5F1EB".to_string(), "#8B7355".to_string()],
        );
        assert_eq!(palette.click(1), Some("#8B7355"));
        assert_eq!(palette.click(2), None);
    }
}
