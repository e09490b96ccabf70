//! Domain models for decks, slides, and bullet items.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::errors::DomainError;

/// Source lines starting with this prefix are nested one level.
const NESTED_PREFIX: &str = "  ";

/// Indentation level of a bullet item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentLevel {
    Top,
    Nested,
}

impl IndentLevel {
    /// Paragraph level as written to the presentation (`0` or `1`).
    pub fn depth(self) -> u8 {
        match self {
            IndentLevel::Top => 0,
            IndentLevel::Nested => 1,
        }
    }
}

/// One line of slide body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletItem {
    pub text: String,
    pub level: IndentLevel,
}

impl BulletItem {
    /// Classify a source line by its leading whitespace and strip bullet markup.
    ///
    /// `"  - CO2"` becomes a nested item `"CO2"`; `"- CO2"` and `"CO2"` are top-level.
    pub fn parse(line: &str) -> Self {
        let (level, body) = if line.starts_with(NESTED_PREFIX) {
            (IndentLevel::Nested, line.trim())
        } else {
            (IndentLevel::Top, line)
        };

        Self {
            text: body.trim_start_matches(['-', ' ']).to_owned(),
            level,
        }
    }
}

/// An image file that existed when its slide was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    path: PathBuf,
}

impl Asset {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used as the picture description.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleSlide {
    title: String,
    subtitle: String,
}

impl TitleSlide {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            title: non_empty_title(title.into())?,
            subtitle: subtitle.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Subtitle split into paragraphs; blank lines are kept as empty paragraphs.
    pub fn subtitle_lines(&self) -> Vec<&str> {
        if self.subtitle.is_empty() {
            return Vec::new();
        }
        self.subtitle.split('\n').collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSlide {
    title: String,
    bullets: Vec<BulletItem>,
}

impl ContentSlide {
    pub fn new(title: impl Into<String>, bullets: Vec<BulletItem>) -> Result<Self, DomainError> {
        let title = non_empty_title(title.into())?;
        if bullets.is_empty() {
            return Err(DomainError::EmptyContent { title });
        }
        Ok(Self { title, bullets })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bullets(&self) -> &[BulletItem] {
        &self.bullets
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlide {
    title: String,
    image: Option<Asset>,
    caption: Option<String>,
}

impl ImageSlide {
    /// An empty caption is treated as no caption.
    pub fn new(
        title: impl Into<String>,
        image: Option<Asset>,
        caption: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let caption = caption.into();
        Ok(Self {
            title: non_empty_title(title.into())?,
            image,
            caption: (!caption.is_empty()).then_some(caption),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&Asset> {
        self.image.as_ref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

/// A single slide; position in the deck is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Slide {
    Title(TitleSlide),
    Content(ContentSlide),
    Image(ImageSlide),
}

impl Slide {
    pub fn title(&self) -> &str {
        match self {
            Slide::Title(slide) => slide.title(),
            Slide::Content(slide) => slide.title(),
            Slide::Image(slide) => slide.title(),
        }
    }

    pub fn bullets(&self) -> &[BulletItem] {
        match self {
            Slide::Content(slide) => slide.bullets(),
            _ => &[],
        }
    }

    pub fn image(&self) -> Option<&Asset> {
        match self {
            Slide::Image(slide) => slide.image(),
            _ => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Slide::Image(slide) => slide.caption(),
            _ => None,
        }
    }
}

/// A finalized, ordered slide collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    pub(crate) fn from_slides(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide by 1-based presentation number.
    pub fn slide(&self, number: usize) -> Option<&Slide> {
        number.checked_sub(1).and_then(|index| self.slides.get(index))
    }

    /// Document title, taken from the first title slide.
    pub fn title(&self) -> Option<&str> {
        self.slides.iter().find_map(|slide| match slide {
            Slide::Title(title) => Some(title.title()),
            _ => None,
        })
    }

    pub fn embedded_images(&self) -> impl Iterator<Item = &Asset> {
        self.slides.iter().filter_map(Slide::image)
    }
}

fn non_empty_title(title: String) -> Result<String, DomainError> {
    if title.trim().is_empty() {
        Err(DomainError::EmptyTitle)
    } else {
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_prefix_yields_level_one_and_strips_markup() {
        let item = BulletItem::parse("  - Alta presenza: Lunedì, Giovedì, Venerdì");
        assert_eq!(item.level, IndentLevel::Nested);
        assert_eq!(item.text, "Alta presenza: Lunedì, Giovedì, Venerdì");
    }

    #[test]
    fn other_lines_are_top_level() {
        let plain = BulletItem::parse("Approccio: Machine Learning");
        assert_eq!(plain.level, IndentLevel::Top);
        assert_eq!(plain.text, "Approccio: Machine Learning");

        let dashed = BulletItem::parse("- Tre file di dataset:");
        assert_eq!(dashed.level, IndentLevel::Top);
        assert_eq!(dashed.text, "Tre file di dataset:");

        let single_space = BulletItem::parse(" - CO2");
        assert_eq!(single_space.level, IndentLevel::Top);
        assert_eq!(single_space.text, "CO2");
    }

    #[test]
    fn hyphenated_words_are_kept() {
        let item = BulletItem::parse("  - n_estimators: [100, 200, 500]");
        assert_eq!(item.text, "n_estimators: [100, 200, 500]");

        let inner = BulletItem::parse("Ottimizzare gli iper-parametri");
        assert_eq!(inner.text, "Ottimizzare gli iper-parametri");
    }

    #[test]
    fn title_slide_requires_title() {
        assert_eq!(TitleSlide::new("  ", "sub"), Err(DomainError::EmptyTitle));
        let slide = TitleSlide::new("Grazie", "").unwrap();
        assert!(slide.subtitle_lines().is_empty());
    }

    #[test]
    fn subtitle_keeps_blank_paragraphs() {
        let slide = TitleSlide::new("T", "Riga uno\n\nRiga due").unwrap();
        assert_eq!(slide.subtitle_lines(), vec!["Riga uno", "", "Riga due"]);
    }

    #[test]
    fn content_slide_requires_bullets() {
        let err = ContentSlide::new("Vuota", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::EmptyContent {
                title: "Vuota".into()
            }
        );
    }

    #[test]
    fn empty_caption_is_dropped() {
        let slide = ImageSlide::new("Grafico", None, "").unwrap();
        assert_eq!(slide.caption(), None);
        assert!(slide.image().is_none());
    }

    #[test]
    fn deck_numbers_slides_from_one() {
        let deck = Deck::from_slides(vec![
            Slide::Title(TitleSlide::new("Primo", "").unwrap()),
            Slide::Content(
                ContentSlide::new("Secondo", vec![BulletItem::parse("punto")]).unwrap(),
            ),
        ]);
        assert_eq!(deck.slide(0), None);
        assert_eq!(deck.slide(1).map(Slide::title), Some("Primo"));
        assert_eq!(deck.slide(2).map(Slide::title), Some("Secondo"));
        assert_eq!(deck.title(), Some("Primo"));
    }
}
