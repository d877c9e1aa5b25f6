use hottest_core::{RenderError, RenderTarget, Slot};
use std::collections::BTreeMap;

/// Terminal-backed render target.
///
/// Slot writes land in an in-memory frame; `commit` paints the whole frame
/// at once, so a half-applied reading is never shown. A terminal has no
/// meta tags, so the meta slots are absent and the renderer skips them.
#[derive(Debug, Default)]
pub struct ConsoleTarget {
    texts: BTreeMap<&'static str, String>,
    attrs: BTreeMap<(&'static str, &'static str), String>,
    title: Option<String>,
}

impl ConsoleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(slot: Slot) -> Result<(), RenderError> {
        // A terminal has no meta tags, so exactly the optional slots are absent.
        if slot.is_optional() {
            return Err(RenderError::MissingSlot(slot));
        }
        Ok(())
    }

    fn text(&self, slot: Slot) -> &str {
        self.texts.get(slot.as_str()).map_or("", String::as_str)
    }

    fn attr(&self, slot: Slot, name: &'static str) -> &str {
        self.attrs
            .get(&(slot.as_str(), name))
            .map_or("", String::as_str)
    }
}

impl RenderTarget for ConsoleTarget {
    fn set_text(&mut self, slot: Slot, value: &str) -> Result<(), RenderError> {
        Self::check(slot)?;
        self.texts.insert(slot.as_str(), value.to_string());
        Ok(())
    }

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str) -> Result<(), RenderError> {
        Self::check(slot)?;
        // Only src/alt reach a console frame; other attributes are accepted
        // and dropped, as a document would accept unknown attributes.
        match name {
            "src" => self.attrs.insert((slot.as_str(), "src"), value.to_string()),
            "alt" => self.attrs.insert((slot.as_str(), "alt"), value.to_string()),
            _ => None,
        };
        Ok(())
    }

    fn set_image(&mut self, slot: Slot, src: &str, alt: &str) -> Result<(), RenderError> {
        Self::check(slot)?;
        self.set_attribute(slot, "src", src)?;
        self.set_attribute(slot, "alt", alt)?;
        Ok(())
    }

    fn set_title(&mut self, value: &str) {
        self.title = Some(value.to_string());
    }

    fn commit(&mut self) {
        if let Some(title) = &self.title {
            println!("== {title} ==");
        }
        println!("{}", self.text(Slot::City));
        println!(
            "{}  {}",
            self.text(Slot::Temperature),
            self.text(Slot::Condition)
        );
        println!("{}", self.text(Slot::Updated));
        println!("flag: {}", self.attr(Slot::Flag, "src"));
        println!("icon: {}", self.attr(Slot::WeatherIcon, "src"));
        println!();
    }
}
