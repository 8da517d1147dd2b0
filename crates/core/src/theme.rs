//! Theme vocabulary and the theme normalizer.
//!
//! The theme API hands over whatever JSON the dashboard last persisted, which
//! may be partial, stale, or hand-edited. [`normalize`] turns any such input
//! into a fully resolved [`ThemeConfig`] and never fails: missing, null,
//! blank, or wrongly typed fields take their documented default, as do
//! colours that are not hex and font values unsafe for inline CSS. Enum
//! values this engine does not know are carried through as `Other(..)` so
//! the style resolver can route them to its fallback branch.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/* --------------------------------------------------------------------------
Defaults
-------------------------------------------------------------------------- */

/// Page background (white).
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Button fill (green).
pub const DEFAULT_PRIMARY_COLOR: &str = "#16a34a";

/// Button border and second gradient stop (dark green).
pub const DEFAULT_SECONDARY_COLOR: &str = "#15803d";

/// Body text (slate).
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";

/// Highlights such as the active tab (blue).
pub const DEFAULT_ACCENT_COLOR: &str = "#3b82f6";

/// Page font stack.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Buttons render with a drop shadow unless turned off.
pub const DEFAULT_BUTTON_SHADOW: bool = true;

/// Button border width in pixels.
pub const DEFAULT_BUTTON_BORDER_WIDTH: u32 = 0;

/// Solid background unless a gradient is requested.
pub const DEFAULT_BACKGROUND_GRADIENT: bool = false;

/// Frosted-glass container backdrop.
pub const DEFAULT_BACKDROP_BLUR: bool = false;

/// Platform branding footer is shown by default.
pub const DEFAULT_HIDE_BRANDING: bool = false;

/// Characters that would let a font value escape its CSS declaration or the
/// surrounding `style` attribute.
const FONT_FAMILY_FORBIDDEN: &[char] = &[';', '"', '<', '>', '{', '}', '\\'];

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid regex")
});

/// Whether `value` is a hex color the renderers accept.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Whether `value` can be written into a `font-family` declaration as is.
pub fn is_safe_font_family(value: &str) -> bool {
    !value.contains(FONT_FAMILY_FORBIDDEN)
}

/* --------------------------------------------------------------------------
Enumerated theme fields
-------------------------------------------------------------------------- */

/// Declares a theme enum whose wire form is a kebab-case string.
///
/// Unrecognized strings become `Other(value)` instead of a deserialization
/// error, and serialize back to the same string.
macro_rules! theme_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value outside the known set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Every recognized wire value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

theme_enum! {
    /// Base text size. Drives the shared type scale.
    FontSize {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

theme_enum! {
    FontWeight {
        Light => "light",
        Normal => "normal",
        Medium => "medium",
        Semibold => "semibold",
        Bold => "bold",
    }
}

theme_enum! {
    /// Corner shape shared by buttons and link cards.
    ButtonShape {
        Square => "square",
        Pill => "pill",
        Rounded => "rounded",
    }
}

theme_enum! {
    ButtonAnimation {
        None => "none",
        HoverLift => "hover-lift",
        HoverScale => "hover-scale",
        HoverGlow => "hover-glow",
    }
}

theme_enum! {
    ProfileImageShape {
        Square => "square",
        RoundedSquare => "rounded-square",
        Circle => "circle",
    }
}

theme_enum! {
    /// Three-step size used for the profile image and the page width.
    SizeStep {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

theme_enum! {
    LinkSpacing {
        Compact => "compact",
        Normal => "normal",
        Relaxed => "relaxed",
    }
}

theme_enum! {
    GradientDirection {
        Horizontal => "horizontal",
        Vertical => "vertical",
        Diagonal => "diagonal",
    }
}

/* --------------------------------------------------------------------------
Resolved theme
-------------------------------------------------------------------------- */

/// A theme with every field resolved to a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeConfig {
    pub background_color: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub font_family: String,
    #[ts(type = "string")]
    pub font_size: FontSize,
    #[ts(type = "string")]
    pub font_weight: FontWeight,
    #[ts(type = "string")]
    pub button_style: ButtonShape,
    pub button_shadow: bool,
    pub button_border_width: u32,
    #[ts(type = "string")]
    pub button_animation: ButtonAnimation,
    #[ts(type = "string")]
    pub profile_image_shape: ProfileImageShape,
    #[ts(type = "string")]
    pub profile_image_size: SizeStep,
    #[ts(type = "string")]
    pub link_spacing: LinkSpacing,
    #[ts(type = "string")]
    pub max_width: SizeStep,
    pub background_gradient: bool,
    #[ts(type = "string")]
    pub gradient_direction: GradientDirection,
    pub backdrop_blur: bool,
    pub hide_branding: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: FontSize::Medium,
            font_weight: FontWeight::Normal,
            button_style: ButtonShape::Rounded,
            button_shadow: DEFAULT_BUTTON_SHADOW,
            button_border_width: DEFAULT_BUTTON_BORDER_WIDTH,
            button_animation: ButtonAnimation::HoverScale,
            profile_image_shape: ProfileImageShape::Circle,
            profile_image_size: SizeStep::Medium,
            link_spacing: LinkSpacing::Normal,
            max_width: SizeStep::Medium,
            background_gradient: DEFAULT_BACKGROUND_GRADIENT,
            gradient_direction: GradientDirection::Vertical,
            backdrop_blur: DEFAULT_BACKDROP_BLUR,
            hide_branding: DEFAULT_HIDE_BRANDING,
        }
    }
}

/* --------------------------------------------------------------------------
Raw (persisted) theme
-------------------------------------------------------------------------- */

/// Theme JSON as persisted by the dashboard. Every field is optional.
///
/// Deserialization is lenient per field: a value of the wrong JSON type is
/// read as absent rather than rejecting the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThemeConfig {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub button_style: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub button_shadow: Option<bool>,
    #[serde(default, deserialize_with = "lenient::pixels", skip_serializing_if = "Option::is_none")]
    pub button_border_width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub button_animation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub profile_image_shape: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub profile_image_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub link_spacing: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gradient_direction: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub backdrop_blur: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub hide_branding: Option<bool>,
}

impl From<ThemeConfig> for RawThemeConfig {
    fn from(theme: ThemeConfig) -> Self {
        Self {
            background_color: Some(theme.background_color),
            primary_color: Some(theme.primary_color),
            secondary_color: Some(theme.secondary_color),
            text_color: Some(theme.text_color),
            accent_color: Some(theme.accent_color),
            font_family: Some(theme.font_family),
            font_size: Some(theme.font_size.into()),
            font_weight: Some(theme.font_weight.into()),
            button_style: Some(theme.button_style.into()),
            button_shadow: Some(theme.button_shadow),
            button_border_width: Some(theme.button_border_width),
            button_animation: Some(theme.button_animation.into()),
            profile_image_shape: Some(theme.profile_image_shape.into()),
            profile_image_size: Some(theme.profile_image_size.into()),
            link_spacing: Some(theme.link_spacing.into()),
            max_width: Some(theme.max_width.into()),
            background_gradient: Some(theme.background_gradient),
            gradient_direction: Some(theme.gradient_direction.into()),
            backdrop_blur: Some(theme.backdrop_blur),
            hide_branding: Some(theme.hide_branding),
        }
    }
}

/// Per-field deserializers that read a wrong-typed value as absent.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    /// Non-negative whole pixel counts, given as a number or a numeric string.
    pub fn pixels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v as u32),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

/* --------------------------------------------------------------------------
Normalization
-------------------------------------------------------------------------- */

/// A normalized theme plus the wire names of the fields that fell back to
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTheme {
    pub theme: ThemeConfig,
    pub fallbacks: Vec<&'static str>,
}

/// Fill every missing theme field with its default.
pub fn normalize(raw: &RawThemeConfig) -> ThemeConfig {
    normalize_with_report(raw).theme
}

/// Same as [`normalize`], also reporting which fields took their default.
pub fn normalize_with_report(raw: &RawThemeConfig) -> NormalizedTheme {
    let mut r = FieldResolver::default();

    let theme = ThemeConfig {
        background_color: r.color("backgroundColor", &raw.background_color, DEFAULT_BACKGROUND_COLOR),
        primary_color: r.color("primaryColor", &raw.primary_color, DEFAULT_PRIMARY_COLOR),
        secondary_color: r.color("secondaryColor", &raw.secondary_color, DEFAULT_SECONDARY_COLOR),
        text_color: r.color("textColor", &raw.text_color, DEFAULT_TEXT_COLOR),
        accent_color: r.color("accentColor", &raw.accent_color, DEFAULT_ACCENT_COLOR),
        font_family: r.text(
            "fontFamily",
            &raw.font_family,
            DEFAULT_FONT_FAMILY,
            is_safe_font_family,
        ),
        font_size: r.choice("fontSize", &raw.font_size, FontSize::Medium),
        font_weight: r.choice("fontWeight", &raw.font_weight, FontWeight::Normal),
        button_style: r.choice("buttonStyle", &raw.button_style, ButtonShape::Rounded),
        button_shadow: r.value("buttonShadow", raw.button_shadow, DEFAULT_BUTTON_SHADOW),
        button_border_width: r.value(
            "buttonBorderWidth",
            raw.button_border_width,
            DEFAULT_BUTTON_BORDER_WIDTH,
        ),
        button_animation: r.choice(
            "buttonAnimation",
            &raw.button_animation,
            ButtonAnimation::HoverScale,
        ),
        profile_image_shape: r.choice(
            "profileImageShape",
            &raw.profile_image_shape,
            ProfileImageShape::Circle,
        ),
        profile_image_size: r.choice("profileImageSize", &raw.profile_image_size, SizeStep::Medium),
        link_spacing: r.choice("linkSpacing", &raw.link_spacing, LinkSpacing::Normal),
        max_width: r.choice("maxWidth", &raw.max_width, SizeStep::Medium),
        background_gradient: r.value(
            "backgroundGradient",
            raw.background_gradient,
            DEFAULT_BACKGROUND_GRADIENT,
        ),
        gradient_direction: r.choice(
            "gradientDirection",
            &raw.gradient_direction,
            GradientDirection::Vertical,
        ),
        backdrop_blur: r.value("backdropBlur", raw.backdrop_blur, DEFAULT_BACKDROP_BLUR),
        hide_branding: r.value("hideBranding", raw.hide_branding, DEFAULT_HIDE_BRANDING),
    };

    NormalizedTheme {
        theme,
        fallbacks: r.fallbacks,
    }
}

/// Collects the names of fields that were resolved to their default.
#[derive(Default)]
struct FieldResolver {
    fallbacks: Vec<&'static str>,
}

impl FieldResolver {
    /// Non-blank text that passes `accept`, else `default`.
    fn text(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        default: &str,
        accept: fn(&str) -> bool,
    ) -> String {
        match non_blank(value).filter(|v| accept(v)) {
            Some(v) => v.to_string(),
            None => {
                self.fallbacks.push(field);
                default.to_string()
            }
        }
    }

    fn color(&mut self, field: &'static str, value: &Option<String>, default: &str) -> String {
        self.text(field, value, default, is_hex_color)
    }

    fn choice<T: From<String>>(&mut self, field: &'static str, value: &Option<String>, default: T) -> T {
        match non_blank(value) {
            Some(v) => T::from(v.to_string()),
            None => {
                self.fallbacks.push(field);
                default
            }
        }
    }

    fn value<T>(&mut self, field: &'static str, value: Option<T>, default: T) -> T {
        value.unwrap_or_else(|| {
            self.fallbacks.push(field);
            default
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
