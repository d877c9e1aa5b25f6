use tracing::debug;

use crate::{error::RenderError, model::PlaceReading};

/// Flag image CDN, keyed by lower-cased country code.
pub const FLAG_CDN_BASE: &str = "https://flagcdn.com/w320";

/// Weather icon base URL, keyed by the slugified condition label.
pub const ICON_BASE_URL: &str = "https://www.aqi.in/media/weather-icons/";

/// Icon slug substituted exactly once when the condition's own icon fails.
pub const DEFAULT_ICON_SLUG: &str = "sunny";

/// Named output slots a render target may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    City,
    Flag,
    Temperature,
    Condition,
    Updated,
    WeatherIcon,
    MetaDescription,
    MetaKeywords,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::City => "city",
            Slot::Flag => "flag",
            Slot::Temperature => "temperature",
            Slot::Condition => "condition",
            Slot::Updated => "updated",
            Slot::WeatherIcon => "weather-icon",
            Slot::MetaDescription => "meta-description",
            Slot::MetaKeywords => "meta-keywords",
        }
    }

    pub const fn all() -> &'static [Slot] {
        &[
            Slot::City,
            Slot::Flag,
            Slot::Temperature,
            Slot::Condition,
            Slot::Updated,
            Slot::WeatherIcon,
            Slot::MetaDescription,
            Slot::MetaKeywords,
        ]
    }

    /// Optional slots are silently skipped when the target lacks them;
    /// a missing required slot is a markup/target mismatch.
    pub fn is_optional(&self) -> bool {
        matches!(self, Slot::MetaDescription | Slot::MetaKeywords)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A headless stand-in for the document the widget writes to.
///
/// Implementations own the slot storage; the renderer never retains state
/// between calls, so rendering the same reading twice must leave every slot
/// with identical values.
pub trait RenderTarget {
    fn set_text(&mut self, slot: Slot, value: &str) -> Result<(), RenderError>;

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str) -> Result<(), RenderError>;

    /// Point an image slot at `src` with the given alt text. Returns
    /// [`RenderError::AssetUnavailable`] when the target knows the resource
    /// failed to load.
    fn set_image(&mut self, slot: Slot, src: &str, alt: &str) -> Result<(), RenderError>;

    fn set_title(&mut self, value: &str);

    /// Called once after a full reading has been applied; buffered targets
    /// flush here. Defaults to a no-op.
    fn commit(&mut self) {}
}

/// Lower-cased, URL-safe form of a condition label: whitespace runs become
/// a single hyphen.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn flag_url(country_code: &str) -> String {
    format!("{FLAG_CDN_BASE}/{}.webp", country_code.to_lowercase())
}

pub fn icon_url(slug: &str) -> String {
    format!("{ICON_BASE_URL}{slug}.svg")
}

pub fn page_title(reading: &PlaceReading) -> String {
    format!(
        "{} in {} - Hottest Place on Earth Right Now",
        reading.temperature, reading.city
    )
}

/// Apply a reading to the target, overwriting every slot it exposes.
///
/// Idempotent: the slot values are a pure function of the reading. Image
/// load failures are handled locally (one-shot icon fallback, flag shows
/// broken); a missing required slot propagates to the cycle boundary.
pub fn render(target: &mut dyn RenderTarget, reading: &PlaceReading) -> Result<(), RenderError> {
    target.set_text(Slot::City, &format!("{}, {}", reading.city, reading.country))?;

    match target.set_image(
        Slot::Flag,
        &flag_url(&reading.country_code),
        &format!("{} flag", reading.country),
    ) {
        // No fallback for the flag; it shows as broken.
        Err(RenderError::AssetUnavailable(src)) => {
            debug!(%src, "flag image failed to load");
        }
        other => other?,
    }

    target.set_text(Slot::Temperature, &reading.temperature)?;
    target.set_text(Slot::Condition, &reading.condition)?;
    target.set_text(Slot::Updated, &format!("Last updated: {} UTC", reading.last_updated))?;

    target.set_title(&page_title(reading));

    let icon_alt = format!("{} icon", reading.condition);
    match target.set_image(Slot::WeatherIcon, &icon_url(&slugify(&reading.condition)), &icon_alt) {
        Err(RenderError::AssetUnavailable(src)) => {
            debug!(%src, "weather icon failed to load, falling back");
            // One attempt only; a failing fallback is accepted as broken.
            if let Err(RenderError::MissingSlot(slot)) =
                target.set_image(Slot::WeatherIcon, &icon_url(DEFAULT_ICON_SLUG), &icon_alt)
            {
                return Err(RenderError::MissingSlot(slot));
            }
        }
        other => other?,
    }

    let description = format!(
        "{}, {} is currently the hottest place on Earth at {} with {} conditions.",
        reading.city, reading.country, reading.temperature, reading.condition
    );
    let keywords = format!(
        "hottest place on earth, {}, {}, weather, temperature",
        reading.city, reading.country
    );

    for (slot, content) in [
        (Slot::MetaDescription, description),
        (Slot::MetaKeywords, keywords),
    ] {
        match target.set_attribute(slot, "content", &content) {
            Err(RenderError::MissingSlot(s)) if s.is_optional() => {} // tag absent, not an error
            other => other?,
        }
    }

    target.commit();
    Ok(())
}
