// quickmagick/src/command/color.rs
//! Color literals for settings such as `fill`, `stroke` and `background`.
//!
//! Every channel is a [`ColorComponent`], which may be given as an 8-bit
//! integer, a fraction in `0.0..=1.0`, or a percentage string like `"25%"`.
//!
//! ```
//! use quickmagick::command::color::{rgb, hsla};
//!
//! assert_eq!(rgb(0, 255, 0).unwrap(), "#00ff00ff");
//! assert_eq!(hsla(30, 127, 127, 1.0).unwrap(), "hsla(30,50%,50%,1)");
//! ```

use crate::core::{MagickError, Result};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub enum ColorComponent {
    /// Integer value, `0..=255` for channels.
    Fixed(i64),
    /// Fractional value, `0.0..=1.0` for channels.
    Fraction(f64),
    /// Percentage string such as `"50%"`.
    Percent(String),
}

impl From<i64> for ColorComponent {
    fn from(value: i64) -> Self {
        ColorComponent::Fixed(value)
    }
}

impl From<i32> for ColorComponent {
    fn from(value: i32) -> Self {
        ColorComponent::Fixed(value.into())
    }
}

impl From<u8> for ColorComponent {
    fn from(value: u8) -> Self {
        ColorComponent::Fixed(value.into())
    }
}

impl From<f64> for ColorComponent {
    fn from(value: f64) -> Self {
        ColorComponent::Fraction(value)
    }
}

impl From<f32> for ColorComponent {
    fn from(value: f32) -> Self {
        ColorComponent::Fraction(value.into())
    }
}

impl From<&str> for ColorComponent {
    fn from(value: &str) -> Self {
        ColorComponent::Percent(value.to_string())
    }
}

impl From<String> for ColorComponent {
    fn from(value: String) -> Self {
        ColorComponent::Percent(value)
    }
}

fn invalid(component: &ColorComponent) -> MagickError {
    MagickError::InvalidColorComponent(format!("{:?}", component))
}

fn percent_value(component: &ColorComponent, text: &str) -> Result<i64> {
    text.trim()
        .strip_suffix('%')
        .and_then(|digits| digits.trim().parse::<i64>().ok())
        .filter(|value| (0..=100).contains(value))
        .ok_or_else(|| invalid(component))
}

/// Scales a channel to `0..=255`. Fractions and percentages truncate.
fn channel_byte(component: &ColorComponent) -> Result<u8> {
    let value = match component {
        ColorComponent::Fixed(value) => *value,
        ColorComponent::Fraction(value) if (0.0..=1.0).contains(value) => {
            (value * 255.0) as i64
        }
        ColorComponent::Percent(text) => percent_value(component, text)? * 255 / 100,
        ColorComponent::Fraction(_) => return Err(invalid(component)),
    };

    u8::try_from(value).map_err(|_| invalid(component))
}

/// Hue in whole degrees. Fractions are radians and are truncated.
fn hue_degrees(component: &ColorComponent) -> Result<i64> {
    match component {
        ColorComponent::Fixed(degrees) => Ok(*degrees),
        ColorComponent::Fraction(radians) => Ok((radians * 360.0 / (2.0 * PI)) as i64),
        ColorComponent::Percent(_) => Err(invalid(component)),
    }
}

/// Saturation or lightness on a `0..=100` scale. Integers are rescaled from
/// `0..=255` and rounded; fractions are truncated; percentages are literal.
fn percentage_points(component: &ColorComponent) -> Result<i64> {
    match component {
        ColorComponent::Fixed(value) if (0..=255).contains(value) => {
            Ok((*value as f64 * 100.0 / 255.0).round() as i64)
        }
        ColorComponent::Fraction(value) if (0.0..=1.0).contains(value) => {
            Ok((value * 100.0) as i64)
        }
        ColorComponent::Percent(text) => percent_value(component, text),
        _ => Err(invalid(component)),
    }
}

/// Alpha as an opacity fraction.
fn alpha_fraction(component: &ColorComponent) -> Result<f64> {
    match component {
        ColorComponent::Fixed(value) if (0..=255).contains(value) => Ok(*value as f64 / 255.0),
        ColorComponent::Fraction(value) if (0.0..=1.0).contains(value) => Ok(*value),
        ColorComponent::Percent(text) => Ok(percent_value(component, text)? as f64 / 100.0),
        _ => Err(invalid(component)),
    }
}

pub fn rgba(
    red: impl Into<ColorComponent>,
    green: impl Into<ColorComponent>,
    blue: impl Into<ColorComponent>,
    alpha: impl Into<ColorComponent>,
) -> Result<String> {
    let red = channel_byte(&red.into())?;
    let green = channel_byte(&green.into())?;
    let blue = channel_byte(&blue.into())?;
    let alpha = channel_byte(&alpha.into())?;
    Ok(format!("#{:02x}{:02x}{:02x}{:02x}", red, green, blue, alpha))
}

pub fn rgb(
    red: impl Into<ColorComponent>,
    green: impl Into<ColorComponent>,
    blue: impl Into<ColorComponent>,
) -> Result<String> {
    rgba(red, green, blue, 255)
}

pub fn graya(level: impl Into<ColorComponent>, alpha: impl Into<ColorComponent>) -> Result<String> {
    let level = level.into();
    rgba(level.clone(), level.clone(), level, alpha)
}

pub fn gray(level: impl Into<ColorComponent>) -> Result<String> {
    graya(level, 255)
}

pub fn hsla(
    hue: impl Into<ColorComponent>,
    saturation: impl Into<ColorComponent>,
    lightness: impl Into<ColorComponent>,
    alpha: impl Into<ColorComponent>,
) -> Result<String> {
    let hue = hue_degrees(&hue.into())?;
    let saturation = percentage_points(&saturation.into())?;
    let lightness = percentage_points(&lightness.into())?;
    let alpha = alpha_fraction(&alpha.into())?;
    Ok(format!("hsla({},{}%,{}%,{})", hue, saturation, lightness, alpha))
}

pub fn hsl(
    hue: impl Into<ColorComponent>,
    saturation: impl Into<ColorComponent>,
    lightness: impl Into<ColorComponent>,
) -> Result<String> {
    hsla(hue, saturation, lightness, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_accepts_all_component_forms() {
        assert_eq!(rgb(0, 255, 0).unwrap(), "#00ff00ff");
        assert_eq!(rgb(0, 0, 0.5).unwrap(), "#00007fff");
        assert_eq!(rgb("25%", 0, 0).unwrap(), "#3f0000ff");
    }

    #[test]
    fn rgba_fraction_alpha() {
        assert_eq!(rgba(1.0, 0, 0, 0.5).unwrap(), "#ff00007f");
    }

    #[test]
    fn gray_wrappers_delegate_to_rgba() {
        assert_eq!(graya(0.5, 0.5).unwrap(), "#7f7f7f7f");
        assert_eq!(gray(255).unwrap(), "#ffffffff");
        assert_eq!(gray("100%").unwrap(), "#ffffffff");
    }

    #[test]
    fn hsl_rounds_integer_saturation() {
        assert_eq!(hsl(30, 127, 127).unwrap(), "hsla(30,50%,50%,1)");
    }

    #[test]
    fn hsla_radian_hue_and_mixed_components() {
        assert_eq!(
            hsla(PI, 0.5, "50%", 0.5).unwrap(),
            "hsla(180,50%,50%,0.5)"
        );
    }

    #[test]
    fn hsla_percent_alpha() {
        assert_eq!(hsla(0, 0, 0, "25%").unwrap(), "hsla(0,0%,0%,0.25)");
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert!(matches!(rgb(256, 0, 0), Err(MagickError::InvalidColorComponent(_))));
        assert!(matches!(rgb(-1, 0, 0), Err(MagickError::InvalidColorComponent(_))));
        assert!(matches!(rgb(1.5, 0, 0), Err(MagickError::InvalidColorComponent(_))));
    }

    #[test]
    fn malformed_percent_is_rejected() {
        assert!(matches!(rgb("half", 0, 0), Err(MagickError::InvalidColorComponent(_))));
        assert!(matches!(rgb("120%", 0, 0), Err(MagickError::InvalidColorComponent(_))));
        assert!(matches!(rgb("12.5%", 0, 0), Err(MagickError::InvalidColorComponent(_))));
    }

    #[test]
    fn percent_hue_is_rejected() {
        assert!(matches!(
            hsl("50%", 0, 0),
            Err(MagickError::InvalidColorComponent(_))
        ));
    }

    #[test]
    fn hsla_integer_alpha_is_scaled_from_255() {
        assert_eq!(hsla(0, 0, 0, 0).unwrap(), "hsla(0,0%,0%,0)");
        assert_eq!(hsla(0, 0, 0, 127).unwrap(), "hsla(0,0%,0%,0.4980392156862745)");
        assert_eq!(hsla(0, 0, 0, 255).unwrap(), "hsla(0,0%,0%,1)");
        assert!(matches!(
            hsla(0, 0, 0, 256),
            Err(MagickError::InvalidColorComponent(_))
        ));
    }
}
