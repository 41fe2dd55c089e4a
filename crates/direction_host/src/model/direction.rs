use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Text direction forced onto a page.
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl TextDirection {
    /// Maps a record's `isRTL` flag to a direction.
    pub const fn from_is_rtl(is_rtl: bool) -> Self {
        if is_rtl {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    /// Returns `true` for [`TextDirection::Rtl`].
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Value of the `dir` attribute and the CSS `direction` property.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Value of the CSS `text-align` property paired with this direction.
    pub const fn text_align(self) -> &'static str {
        match self {
            Self::Ltr => "left",
            Self::Rtl => "right",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            other => Err(format!("unknown text direction `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtl_flag_maps_to_attribute_and_alignment() {
        let rtl = TextDirection::from_is_rtl(true);
        assert_eq!(rtl.as_str(), "rtl");
        assert_eq!(rtl.text_align(), "right");
        assert!(rtl.is_rtl());

        let ltr = TextDirection::from_is_rtl(false);
        assert_eq!(ltr.as_str(), "ltr");
        assert_eq!(ltr.text_align(), "left");
    }

    #[test]
    fn parses_attribute_values_case_insensitively() {
        assert_eq!("RTL".parse::<TextDirection>(), Ok(TextDirection::Rtl));
        assert_eq!(" ltr ".parse::<TextDirection>(), Ok(TextDirection::Ltr));
        assert!("auto".parse::<TextDirection>().is_err());
    }
}
