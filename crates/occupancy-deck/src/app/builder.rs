//! Deck assembly: title, content, and image slide insertion.

use std::path::Path;

use crate::app::assets::{AssetProbe, FsProbe, resolve_asset};
use crate::domain::errors::DomainError;
use crate::domain::model::{BulletItem, ContentSlide, Deck, ImageSlide, Slide, TitleSlide};

/// A chart slide that falls back to a bulleted summary when its image is absent.
#[derive(Debug, Clone, Copy)]
pub struct Figure {
    /// Image file name, relative to the plots directory.
    pub file_name: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    pub fallback_title: &'static str,
    pub fallback_points: &'static [&'static str],
}

/// Appends slides in presentation order, then hands out the finished [`Deck`].
pub struct DeckBuilder<'p> {
    slides: Vec<Slide>,
    probe: &'p dyn AssetProbe,
}

impl Default for DeckBuilder<'static> {
    fn default() -> Self {
        Self::new(&FsProbe)
    }
}

impl<'p> DeckBuilder<'p> {
    pub fn new(probe: &'p dyn AssetProbe) -> Self {
        Self {
            slides: Vec::new(),
            probe,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn add_title_slide(&mut self, title: &str, subtitle: &str) -> Result<&Slide, DomainError> {
        let slide = TitleSlide::new(title, subtitle)?;
        Ok(self.push(Slide::Title(slide)))
    }

    /// Each line is classified by [`BulletItem::parse`]; order and count are preserved.
    pub fn add_content_slide<I, S>(&mut self, title: &str, lines: I) -> Result<&Slide, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bullets = lines
            .into_iter()
            .map(|line| BulletItem::parse(line.as_ref()))
            .collect();
        let slide = ContentSlide::new(title, bullets)?;
        Ok(self.push(Slide::Content(slide)))
    }

    /// The image is embedded only if `image_path` exists at call time.
    pub fn add_image_slide(
        &mut self,
        title: &str,
        image_path: &Path,
        caption: &str,
    ) -> Result<&Slide, DomainError> {
        let image = resolve_asset(self.probe, image_path);
        let slide = ImageSlide::new(title, image, caption)?;
        Ok(self.push(Slide::Image(slide)))
    }

    /// Image slide if the figure's file exists under `plots_dir`, its bulleted fallback otherwise.
    pub fn add_figure(&mut self, plots_dir: &Path, figure: &Figure) -> Result<&Slide, DomainError> {
        let path = plots_dir.join(figure.file_name);
        match resolve_asset(self.probe, &path) {
            Some(asset) => {
                let slide = ImageSlide::new(figure.title, Some(asset), figure.caption)?;
                Ok(self.push(Slide::Image(slide)))
            }
            None => self.add_content_slide(figure.fallback_title, figure.fallback_points),
        }
    }

    pub fn finish(self) -> Deck {
        Deck::from_slides(self.slides)
    }

    fn push(&mut self, slide: Slide) -> &Slide {
        tracing::debug!(
            number = self.slides.len() + 1,
            title = slide.title(),
            "slide added"
        );
        self.slides.push(slide);
        &self.slides[self.slides.len() - 1]
    }
}
