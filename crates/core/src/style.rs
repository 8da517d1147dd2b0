//! Style resolver: maps a normalized [`ThemeConfig`] to the concrete style
//! primitives every presentation surface renders from.
//!
//! Each enum-to-value mapping lives in exactly one named function here. Call
//! sites (body text, tab labels, button text, link cards, share buttons) must
//! go through these functions instead of re-deriving the mapping, so the
//! dashboard preview and both public pages cannot drift apart. Unknown enum
//! values always land on the documented default branch.

use serde::Serialize;
use ts_rs::TS;

use crate::theme::{
    ButtonAnimation, ButtonShape, FontSize, FontWeight, GradientDirection, LinkSpacing,
    ProfileImageShape, SizeStep, ThemeConfig,
};

/// Button text colour. Buttons sit on `primaryColor`, so text is always white.
pub const BUTTON_TEXT_COLOR: &str = "#ffffff";

/// Box shadow applied to buttons and link cards when `buttonShadow` is on.
pub const BUTTON_BOX_SHADOW: &str = "0 4px 6px -1px rgba(0, 0, 0, 0.1)";

/// Backdrop filter applied to the content container when `backdropBlur` is on.
pub const BACKDROP_FILTER: &str = "blur(12px)";

/// Translucent container background used together with the backdrop blur.
pub const BACKDROP_BACKGROUND: &str = "rgba(255, 255, 255, 0.7)";

/* --------------------------------------------------------------------------
CSS lengths
-------------------------------------------------------------------------- */

/// A CSS length as produced by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssLength {
    Px(u32),
    Percent(u32),
}

impl std::fmt::Display for CssLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CssLength::Px(v) => write!(f, "{v}px"),
            CssLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl Serialize for CssLength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/* --------------------------------------------------------------------------
Named mappings
-------------------------------------------------------------------------- */

/// The single font-size scale: 14 / 16 / 18 px. Unknown sizes read as medium.
pub fn font_size_px(size: &FontSize) -> u32 {
    match size {
        FontSize::Small => 14,
        FontSize::Large => 18,
        _ => 16,
    }
}

/// Numeric CSS font weight. Unknown weights read as normal (400).
pub fn font_weight_value(weight: &FontWeight) -> u32 {
    match weight {
        FontWeight::Light => 300,
        FontWeight::Medium => 500,
        FontWeight::Semibold => 600,
        FontWeight::Bold => 700,
        _ => 400,
    }
}

/// Corner radius for buttons: 8px square, 50px pill, else 12px.
pub fn button_radius(shape: &ButtonShape) -> CssLength {
    match shape {
        ButtonShape::Square => CssLength::Px(8),
        ButtonShape::Pill => CssLength::Px(50),
        _ => CssLength::Px(12),
    }
}

/// Corner radius for link cards.
///
/// Currently the same table as [`button_radius`], kept separate so link
/// cards and share buttons can diverge without touching each other.
pub fn link_card_radius(shape: &ButtonShape) -> CssLength {
    match shape {
        ButtonShape::Square => CssLength::Px(8),
        ButtonShape::Pill => CssLength::Px(50),
        _ => CssLength::Px(12),
    }
}

pub fn profile_image_radius(shape: &ProfileImageShape) -> CssLength {
    match shape {
        ProfileImageShape::Square => CssLength::Px(8),
        ProfileImageShape::RoundedSquare => CssLength::Px(16),
        _ => CssLength::Percent(50),
    }
}

pub fn profile_image_size_px(size: &SizeStep) -> u32 {
    match size {
        SizeStep::Small => 80,
        SizeStep::Large => 160,
        _ => 128,
    }
}

pub fn container_max_width_px(width: &SizeStep) -> u32 {
    match width {
        SizeStep::Small => 480,
        SizeStep::Large => 768,
        _ => 640,
    }
}

pub fn gradient_angle_deg(direction: &GradientDirection) -> u32 {
    match direction {
        GradientDirection::Horizontal => 90,
        GradientDirection::Diagonal => 135,
        _ => 180,
    }
}

/// Gap between link cards, in three discrete levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SpacingLevel {
    Small,
    Medium,
    Large,
}

impl SpacingLevel {
    /// Utility class used by the front-ends.
    pub fn class(self) -> &'static str {
        match self {
            SpacingLevel::Small => "space-y-2",
            SpacingLevel::Medium => "space-y-3",
            SpacingLevel::Large => "space-y-4",
        }
    }

    pub fn gap_px(self) -> u32 {
        match self {
            SpacingLevel::Small => 8,
            SpacingLevel::Medium => 12,
            SpacingLevel::Large => 16,
        }
    }
}

pub fn spacing_level(spacing: &LinkSpacing) -> SpacingLevel {
    match spacing {
        LinkSpacing::Compact => SpacingLevel::Small,
        LinkSpacing::Relaxed => SpacingLevel::Large,
        _ => SpacingLevel::Medium,
    }
}

/// Hover animation class. Unknown animations render without one.
pub fn animation_class(animation: &ButtonAnimation) -> Option<&'static str> {
    match animation {
        ButtonAnimation::HoverLift => Some("hover-lift"),
        ButtonAnimation::HoverScale => Some("hover-scale"),
        ButtonAnimation::HoverGlow => Some("hover-glow"),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
Resolved style
-------------------------------------------------------------------------- */

/// Text sizes for every text call site, all taken from [`font_size_px`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TypeScale {
    pub body_px: u32,
    pub tab_label_px: u32,
    pub button_text_px: u32,
}

impl TypeScale {
    pub fn for_size(size: &FontSize) -> Self {
        let px = font_size_px(size);
        Self {
            body_px: px,
            tab_label_px: px,
            button_text_px: px,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageStyle {
    pub background_color: String,
    pub background_image: Option<String>,
    pub color: String,
    pub font_family: String,
    pub font_size_px: u32,
    pub font_weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContainerStyle {
    pub max_width_px: u32,
    pub backdrop_filter: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileImageStyle {
    #[ts(type = "string")]
    pub border_radius: CssLength,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ButtonStyle {
    #[ts(type = "string")]
    pub border_radius: CssLength,
    pub border_width_px: u32,
    pub border_color: String,
    pub box_shadow: Option<String>,
    pub background_color: String,
    pub color: String,
    pub font_size_px: u32,
    pub animation_class: Option<String>,
}

/// Everything a surface needs to paint a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResolvedStyle {
    pub page_style: PageStyle,
    pub container_style: ContainerStyle,
    pub profile_image_style: ProfileImageStyle,
    pub button_style: ButtonStyle,
    #[ts(type = "string")]
    pub link_card_radius: CssLength,
    pub link_spacing: SpacingLevel,
    pub link_spacing_class: String,
    pub type_scale: TypeScale,
    pub accent_color: String,
}

/// Narrowest viewport width honoured when clamping; anything below is
/// treated as unknown.
pub const MIN_VIEWPORT_WIDTH_PX: u32 = 240;

/// Viewport the style is resolved for. `None` width means unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width_px: Option<u32>,
}

impl Viewport {
    /// The width to clamp against, ignoring widths below
    /// [`MIN_VIEWPORT_WIDTH_PX`].
    pub fn clamp_width(&self) -> Option<u32> {
        self.width_px.filter(|w| *w >= MIN_VIEWPORT_WIDTH_PX)
    }
}

/// Resolve the style for an unconstrained viewport.
pub fn resolve_style(theme: &ThemeConfig) -> ResolvedStyle {
    resolve_style_for_viewport(theme, Viewport::default())
}

/// Resolve the style, clamping the container to the viewport width (the
/// dashboard preview pane renders inside a phone-sized frame).
pub fn resolve_style_for_viewport(theme: &ThemeConfig, viewport: Viewport) -> ResolvedStyle {
    let type_scale = TypeScale::for_size(&theme.font_size);
    let spacing = spacing_level(&theme.link_spacing);

    let background_image = theme.background_gradient.then(|| {
        format!(
            "linear-gradient({}deg, {}, {})",
            gradient_angle_deg(&theme.gradient_direction),
            theme.background_color,
            theme.secondary_color
        )
    });

    let mut max_width_px = container_max_width_px(&theme.max_width);
    if let Some(width) = viewport.clamp_width() {
        max_width_px = max_width_px.min(width);
    }

    let profile_size = profile_image_size_px(&theme.profile_image_size);

    ResolvedStyle {
        page_style: PageStyle {
            background_color: theme.background_color.clone(),
            background_image,
            color: theme.text_color.clone(),
            font_family: theme.font_family.clone(),
            font_size_px: type_scale.body_px,
            font_weight: font_weight_value(&theme.font_weight),
        },
        container_style: ContainerStyle {
            max_width_px,
            backdrop_filter: theme.backdrop_blur.then(|| BACKDROP_FILTER.to_string()),
            background_color: theme.backdrop_blur.then(|| BACKDROP_BACKGROUND.to_string()),
        },
        profile_image_style: ProfileImageStyle {
            border_radius: profile_image_radius(&theme.profile_image_shape),
            width_px: profile_size,
            height_px: profile_size,
        },
        button_style: ButtonStyle {
            border_radius: button_radius(&theme.button_style),
            border_width_px: theme.button_border_width,
            border_color: theme.secondary_color.clone(),
            box_shadow: theme.button_shadow.then(|| BUTTON_BOX_SHADOW.to_string()),
            background_color: theme.primary_color.clone(),
            color: BUTTON_TEXT_COLOR.to_string(),
            font_size_px: type_scale.button_text_px,
            animation_class: animation_class(&theme.button_animation).map(str::to_string),
        },
        link_card_radius: link_card_radius(&theme.button_style),
        link_spacing: spacing,
        link_spacing_class: spacing.class().to_string(),
        type_scale,
        accent_color: theme.accent_color.clone(),
    }
}

/* --------------------------------------------------------------------------
Inline CSS for server-rendered surfaces
-------------------------------------------------------------------------- */

fn join_declarations(declarations: Vec<String>) -> String {
    declarations.join("; ")
}

impl PageStyle {
    pub fn css_declarations(&self) -> String {
        let mut out = vec![
            format!("background-color: {}", self.background_color),
            format!("color: {}", self.color),
            format!("font-family: {}", self.font_family),
            format!("font-size: {}px", self.font_size_px),
            format!("font-weight: {}", self.font_weight),
        ];
        if let Some(image) = &self.background_image {
            out.insert(1, format!("background-image: {image}"));
        }
        join_declarations(out)
    }
}

impl ContainerStyle {
    pub fn css_declarations(&self) -> String {
        let mut out = vec![format!("max-width: {}px", self.max_width_px)];
        if let Some(filter) = &self.backdrop_filter {
            out.push(format!("backdrop-filter: {filter}"));
        }
        if let Some(background) = &self.background_color {
            out.push(format!("background-color: {background}"));
        }
        join_declarations(out)
    }
}

impl ProfileImageStyle {
    pub fn css_declarations(&self) -> String {
        join_declarations(vec![
            format!("border-radius: {}", self.border_radius),
            format!("width: {}px", self.width_px),
            format!("height: {}px", self.height_px),
        ])
    }
}

impl ButtonStyle {
    pub fn css_declarations(&self) -> String {
        let mut out = vec![
            format!("border-radius: {}", self.border_radius),
            format!("border-width: {}px", self.border_width_px),
            format!("border-color: {}", self.border_color),
            format!("background-color: {}", self.background_color),
            format!("color: {}", self.color),
            format!("font-size: {}px", self.font_size_px),
        ];
        if let Some(shadow) = &self.box_shadow {
            out.push(format!("box-shadow: {shadow}"));
        }
        join_declarations(out)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
