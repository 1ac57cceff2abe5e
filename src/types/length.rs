use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A size as given in options or forced by the synchronizer.
///
/// Numbers and `"<n>px"` strings become [`Length::Px`]; anything else is kept
/// verbatim as a CSS length (percentages resolve against the parent).
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    Px(f32),
    Css(String),
}

impl Length {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match number.parse::<f32>() {
            Ok(px) if px.is_finite() => Self::Px(px),
            _ => Self::Css(trimmed.to_string()),
        }
    }

    /// Pixel value, resolving percentages against `basis` when available.
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Px(px) => Some(*px),
            Self::Css(css) => {
                let pct = css.strip_suffix('%')?.trim().parse::<f32>().ok()?;
                basis.map(|b| b * pct / 100.0)
            }
        }
    }

    pub fn as_px(&self) -> Option<f32> {
        self.resolve(None)
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Self::Px(px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Css(css) => f.write_str(css),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Number(f32),
    Text(String),
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLength::deserialize(deserializer)? {
            RawLength::Number(px) => Self::Px(px),
            RawLength::Text(text) => Self::parse(&text),
        })
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(px) => serializer.serialize_f32(*px),
            Self::Css(css) => serializer.serialize_str(css),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px_and_numbers() {
        assert_eq!(Length::parse("120px"), Length::Px(120.0));
        assert_eq!(Length::parse(" 42 "), Length::Px(42.0));
        assert_eq!(Length::parse("50%"), Length::Css("50%".into()));
    }

    #[test]
    fn test_resolve_percentage() {
        let half = Length::parse("50%");
        assert_eq!(half.resolve(Some(300.0)), Some(150.0));
        assert_eq!(half.resolve(None), None);
        assert_eq!(Length::Css("auto".into()).resolve(Some(300.0)), None);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let n: Length = serde_json::from_str("300").unwrap();
        let s: Length = serde_json::from_str("\"20em\"").unwrap();
        assert_eq!(n, Length::Px(300.0));
        assert_eq!(s, Length::Css("20em".into()));
    }
}
