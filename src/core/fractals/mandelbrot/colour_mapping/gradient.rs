use crate::core::data::colour::Colour;

/// Ordered anchor colours a palette is interpolated from, or a request for
/// a hue sweep instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    name: String,
    colours: Vec<Colour>,
    rainbow: bool,
}

impl Gradient {
    #[must_use]
    pub fn new(name: impl Into<String>, colours: Vec<Colour>) -> Self {
        Self {
            name: name.into(),
            colours,
            rainbow: false,
        }
    }

    #[must_use]
    pub fn rainbow(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: Vec::new(),
            rainbow: true,
        }
    }

    pub fn add_colour(&mut self, colour: Colour) {
        self.colours.push(colour);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_rainbow(&self) -> bool {
        self.rainbow
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Anchor at `index`, black when out of range.
    #[must_use]
    pub fn colour(&self, index: usize) -> Colour {
        match self.colours.get(index) {
            Some(&colour) => colour,
            None => {
                tracing::warn!(index, len = self.colours.len(), "gradient index out of bounds");
                Colour::BLACK
            }
        }
    }
}
