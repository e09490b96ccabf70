//! PowerPoint (Office Open XML) rendering of finished decks.

pub mod geometry;
pub mod media;
pub mod package;
pub mod templates;

use anyhow::{Context, Result, anyhow};
use minijinja::Environment;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::model::{Deck, ImageSlide, Slide};
use geometry::{
    BODY_FONT_SIZE, CAPTION_FONT_SIZE, CAPTION_FRAME, Frame, IMAGE_TITLE_FONT_SIZE,
    IMAGE_TITLE_FRAME, SLIDE_HEIGHT, SLIDE_WIDTH,
};
use media::{MediaPart, load_media};
use package::PackageWriter;

/// First relationship id available for slides in `presentation.xml.rels`.
const FIRST_SLIDE_REL: usize = 6;
const FIRST_SLIDE_ID: usize = 256;
const APPLICATION: &str = "occupancy-deck";

/// Layout part numbers, matching `templates::SLIDE_LAYOUTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Title = 1,
    TitleAndContent = 2,
    Blank = 3,
}

/// Document-level properties written to `docProps/core.xml`.
#[derive(Debug, Clone)]
pub struct DocumentProperties {
    pub creator: String,
    pub created_at: OffsetDateTime,
}

impl DocumentProperties {
    pub fn now(creator: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Output of a render pass.
#[derive(Debug, Clone)]
pub struct RenderedDeck {
    pub bytes: Vec<u8>,
    pub slide_count: usize,
    pub image_count: usize,
}

/// Serializes a [`Deck`] into a `.pptx` package.
pub struct PptxRenderer {
    env: Environment<'static>,
}

impl PptxRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: templates::environment()?,
        })
    }

    pub fn render(&self, deck: &Deck, props: &DocumentProperties) -> Result<RenderedDeck> {
        let mut package = PackageWriter::new();
        let mut media = Vec::new();
        let mut slide_parts = Vec::with_capacity(deck.len());

        for (index, slide) in deck.slides().iter().enumerate() {
            let (view, images) = self.slide_view(slide, &mut media)?;
            let xml = self.render_template(templates::SLIDE, &view)?;
            let rels = self.render_template(
                templates::SLIDE_RELS,
                &SlideRelsView {
                    layout: view.layout,
                    images,
                },
            )?;
            slide_parts.push((index + 1, xml, rels));
        }

        let slide_refs: Vec<SlideRef> = (1..=deck.len())
            .map(|number| SlideRef {
                number,
                id: FIRST_SLIDE_ID + number - 1,
                rel_id: format!("rId{}", FIRST_SLIDE_REL + number - 1),
            })
            .collect();

        let content_types = self.render_template(
            templates::CONTENT_TYPES,
            &ContentTypesView {
                media_types: media_types(&media),
                layouts: (1..=templates::SLIDE_LAYOUTS.len()).collect(),
                slides: (1..=deck.len()).collect(),
            },
        )?;
        package.add_part("[Content_Types].xml", content_types.as_bytes())?;

        let root_rels = self.render_template(templates::ROOT_RELS, &())?;
        package.add_part("_rels/.rels", root_rels.as_bytes())?;

        let created_at = props
            .created_at
            .replace_nanosecond(0)
            .context("invalid creation timestamp")?
            .format(&Rfc3339)
            .context("failed to format creation timestamp")?;
        let core = self.render_template(
            templates::CORE_PROPS,
            &CorePropsView {
                title: deck.title(),
                creator: &props.creator,
                created_at,
            },
        )?;
        package.add_part("docProps/core.xml", core.as_bytes())?;

        let app = self.render_template(
            templates::APP_PROPS,
            &AppPropsView {
                application: APPLICATION,
                slide_count: deck.len(),
            },
        )?;
        package.add_part("docProps/app.xml", app.as_bytes())?;

        let presentation = self.render_template(
            templates::PRESENTATION,
            &PresentationView {
                slides: &slide_refs,
                width: SLIDE_WIDTH,
                height: SLIDE_HEIGHT,
            },
        )?;
        package.add_part("ppt/presentation.xml", presentation.as_bytes())?;

        let presentation_rels = self.render_template(
            templates::PRESENTATION_RELS,
            &PresentationView {
                slides: &slide_refs,
                width: SLIDE_WIDTH,
                height: SLIDE_HEIGHT,
            },
        )?;
        package.add_part("ppt/_rels/presentation.xml.rels", presentation_rels.as_bytes())?;

        package.add_part("ppt/presProps.xml", templates::PRES_PROPS.as_bytes())?;
        package.add_part("ppt/viewProps.xml", templates::VIEW_PROPS.as_bytes())?;
        package.add_part("ppt/tableStyles.xml", templates::TABLE_STYLES.as_bytes())?;
        package.add_part("ppt/theme/theme1.xml", templates::THEME.as_bytes())?;
        package.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            templates::SLIDE_MASTER.as_bytes(),
        )?;
        package.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            templates::SLIDE_MASTER_RELS.as_bytes(),
        )?;

        for (index, layout) in templates::SLIDE_LAYOUTS.iter().enumerate() {
            let number = index + 1;
            package.add_part(
                &format!("ppt/slideLayouts/slideLayout{number}.xml"),
                layout.as_bytes(),
            )?;
            package.add_part(
                &format!("ppt/slideLayouts/_rels/slideLayout{number}.xml.rels"),
                templates::SLIDE_LAYOUT_RELS.as_bytes(),
            )?;
        }

        for (number, xml, rels) in &slide_parts {
            package.add_part(&format!("ppt/slides/slide{number}.xml"), xml.as_bytes())?;
            package.add_part(
                &format!("ppt/slides/_rels/slide{number}.xml.rels"),
                rels.as_bytes(),
            )?;
        }

        for part in &media {
            package.add_part(&format!("ppt/media/{}", part.file_name), &part.data)?;
        }

        tracing::debug!(parts = package.part_count(), "presentation package assembled");

        Ok(RenderedDeck {
            bytes: package.finish()?,
            slide_count: deck.len(),
            image_count: media.len(),
        })
    }

    fn render_template<S: Serialize>(&self, name: &str, context: &S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|err| anyhow!("template '{name}' not registered: {err}"))?;
        template
            .render(context)
            .map_err(|err| anyhow!("failed to render template '{name}': {err}"))
    }

    fn slide_view(
        &self,
        slide: &Slide,
        media: &mut Vec<MediaPart>,
    ) -> Result<(SlideView, Vec<ImageRelView>)> {
        match slide {
            Slide::Title(title) => {
                let subtitle = title
                    .subtitle_lines()
                    .into_iter()
                    .map(ParagraphView::plain)
                    .collect::<Vec<_>>();
                Ok((
                    SlideView {
                        layout: Layout::Title as usize,
                        shapes: vec![
                            ShapeView::placeholder(2, "Title 1", Some("ctrTitle"), None, vec![
                                ParagraphView::plain(title.title()),
                            ]),
                            ShapeView::placeholder(
                                3,
                                "Subtitle 2",
                                Some("subTitle"),
                                Some(1),
                                non_empty(subtitle),
                            ),
                        ],
                    },
                    Vec::new(),
                ))
            }
            Slide::Content(content) => {
                let bullets = content
                    .bullets()
                    .iter()
                    .map(|item| ParagraphView {
                        text: item.text.clone(),
                        level: item.level.depth(),
                        align: None,
                        size: Some(BODY_FONT_SIZE),
                        bold: false,
                        italic: false,
                    })
                    .collect();
                Ok((
                    SlideView {
                        layout: Layout::TitleAndContent as usize,
                        shapes: vec![
                            ShapeView::placeholder(2, "Title 1", Some("title"), None, vec![
                                ParagraphView::plain(content.title()),
                            ]),
                            ShapeView::placeholder(
                                3,
                                "Content Placeholder 2",
                                None,
                                Some(1),
                                non_empty(bullets),
                            ),
                        ],
                    },
                    Vec::new(),
                ))
            }
            Slide::Image(image) => self.image_slide_view(image, media),
        }
    }

    fn image_slide_view(
        &self,
        slide: &ImageSlide,
        media: &mut Vec<MediaPart>,
    ) -> Result<(SlideView, Vec<ImageRelView>)> {
        let mut shapes = vec![ShapeView::text_box(
            2,
            IMAGE_TITLE_FRAME,
            ParagraphView {
                text: slide.title().to_owned(),
                level: 0,
                align: Some("ctr"),
                size: Some(IMAGE_TITLE_FONT_SIZE),
                bold: true,
                italic: false,
            },
        )];
        let mut images = Vec::new();

        if let Some(asset) = slide.image() {
            let part = load_media(asset, media.len())?;
            let frame = geometry::picture_frame(part.width_px, part.height_px);
            let rel_id = "rId2".to_owned();
            let id = shapes.len() as u32 + 2;
            shapes.push(ShapeView::Picture {
                id,
                name: format!("Picture {}", id - 1),
                description: asset.file_name(),
                rel_id: rel_id.clone(),
                x: frame.x,
                y: frame.y,
                cx: frame.cx,
                cy: frame.cy,
            });
            images.push(ImageRelView {
                rel_id,
                file_name: part.file_name.clone(),
            });
            media.push(part);
        }

        if let Some(caption) = slide.caption() {
            let id = shapes.len() as u32 + 2;
            shapes.push(ShapeView::text_box(id, CAPTION_FRAME, ParagraphView {
                text: caption.to_owned(),
                level: 0,
                align: Some("ctr"),
                size: Some(CAPTION_FONT_SIZE),
                bold: false,
                italic: true,
            }));
        }

        Ok((
            SlideView {
                layout: Layout::Blank as usize,
                shapes,
            },
            images,
        ))
    }
}

fn non_empty(paragraphs: Vec<ParagraphView>) -> Vec<ParagraphView> {
    if paragraphs.is_empty() {
        vec![ParagraphView::plain("")]
    } else {
        paragraphs
    }
}

fn media_types(media: &[MediaPart]) -> Vec<MediaTypeView> {
    let mut types: Vec<MediaTypeView> = Vec::new();
    for part in media {
        if !types.iter().any(|known| known.extension == part.extension) {
            types.push(MediaTypeView {
                extension: part.extension,
                content_type: part.content_type,
            });
        }
    }
    types
}

#[derive(Serialize)]
struct SlideView {
    layout: usize,
    shapes: Vec<ShapeView>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ShapeView {
    Placeholder {
        id: u32,
        name: String,
        ph_type: Option<&'static str>,
        ph_idx: Option<u32>,
        paragraphs: Vec<ParagraphView>,
    },
    TextBox {
        id: u32,
        name: String,
        x: i64,
        y: i64,
        cx: i64,
        cy: i64,
        paragraphs: Vec<ParagraphView>,
    },
    Picture {
        id: u32,
        name: String,
        description: String,
        rel_id: String,
        x: i64,
        y: i64,
        cx: i64,
        cy: i64,
    },
}

impl ShapeView {
    fn placeholder(
        id: u32,
        name: &str,
        ph_type: Option<&'static str>,
        ph_idx: Option<u32>,
        paragraphs: Vec<ParagraphView>,
    ) -> Self {
        ShapeView::Placeholder {
            id,
            name: name.to_owned(),
            ph_type,
            ph_idx,
            paragraphs,
        }
    }

    fn text_box(id: u32, frame: Frame, paragraph: ParagraphView) -> Self {
        ShapeView::TextBox {
            id,
            name: format!("TextBox {}", id - 1),
            x: frame.x,
            y: frame.y,
            cx: frame.cx,
            cy: frame.cy,
            paragraphs: vec![paragraph],
        }
    }
}

#[derive(Serialize)]
struct ParagraphView {
    text: String,
    level: u8,
    align: Option<&'static str>,
    size: Option<u32>,
    bold: bool,
    italic: bool,
}

impl ParagraphView {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            level: 0,
            align: None,
            size: None,
            bold: false,
            italic: false,
        }
    }
}

#[derive(Serialize)]
struct ImageRelView {
    rel_id: String,
    file_name: String,
}

#[derive(Serialize)]
struct SlideRelsView {
    layout: usize,
    images: Vec<ImageRelView>,
}

#[derive(Serialize)]
struct SlideRef {
    number: usize,
    id: usize,
    rel_id: String,
}

#[derive(Serialize)]
struct PresentationView<'a> {
    slides: &'a [SlideRef],
    width: i64,
    height: i64,
}

#[derive(Serialize)]
struct MediaTypeView {
    extension: &'static str,
    content_type: &'static str,
}

#[derive(Serialize)]
struct ContentTypesView {
    media_types: Vec<MediaTypeView>,
    layouts: Vec<usize>,
    slides: Vec<usize>,
}

#[derive(Serialize)]
struct CorePropsView<'a> {
    title: Option<&'a str>,
    creator: &'a str,
    created_at: String,
}

#[derive(Serialize)]
struct AppPropsView {
    application: &'static str,
    slide_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::path::Path;

    use crate::app::assets::AssetProbe;
    use crate::app::builder::DeckBuilder;

    struct Everything;

    impl AssetProbe for Everything {
        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut contents = String::new();
        archive.by_name(name)?.read_to_string(&mut contents)?;
        Ok(contents)
    }

    fn props() -> DocumentProperties {
        DocumentProperties {
            creator: "Tester".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn renders_text_slides_with_their_layouts() -> Result<()> {
        let mut builder = DeckBuilder::default();
        builder.add_title_slide("Titolo & Co", "Riga uno\n\nRiga due")?;
        builder.add_content_slide("Punti", ["Primo", "  - Secondo"])?;
        let deck = builder.finish();

        let rendered = PptxRenderer::new()?.render(&deck, &props())?;
        assert_eq!(rendered.slide_count, 2);
        assert_eq!(rendered.image_count, 0);

        let title = read_part(&rendered.bytes, "ppt/slides/slide1.xml")?;
        assert!(title.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(title.contains("<a:t>Titolo &amp; Co</a:t>"));
        assert!(title.contains("<a:t>Riga due</a:t>"));
        assert!(title.contains("<a:endParaRPr"));

        let content = read_part(&rendered.bytes, "ppt/slides/slide2.xml")?;
        assert!(content.contains(r#"<a:pPr lvl="1"/>"#));
        assert!(content.contains(r#"sz="1800""#));
        assert!(content.contains("<a:t>Secondo</a:t>"));

        let rels = read_part(&rendered.bytes, "ppt/slides/_rels/slide2.xml.rels")?;
        assert!(rels.contains("slideLayout2.xml"));

        let core = read_part(&rendered.bytes, "docProps/core.xml")?;
        assert!(core.contains("<dc:title>Titolo &amp; Co</dc:title>"));
        assert!(core.contains("1970-01-01T00:00:00Z"));
        Ok(())
    }

    #[test]
    fn embeds_picture_scaled_to_aspect_ratio() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("chart.png");
        image::RgbImage::new(40, 20).save(&path)?;

        let mut builder = DeckBuilder::new(&Everything);
        builder.add_image_slide("Grafico", &path, "Didascalia")?;
        let deck = builder.finish();

        let rendered = PptxRenderer::new()?.render(&deck, &props())?;
        assert_eq!(rendered.image_count, 1);

        let slide = read_part(&rendered.bytes, "ppt/slides/slide1.xml")?;
        assert!(slide.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(slide.contains(r#"<a:ext cx="7315200" cy="3657600"/>"#));
        assert!(slide.contains(r#"sz="3200" b="1""#));
        assert!(slide.contains(r#"sz="1400" i="1""#));
        assert!(slide.contains("<a:t>Didascalia</a:t>"));

        let rels = read_part(&rendered.bytes, "ppt/slides/_rels/slide1.xml.rels")?;
        assert!(rels.contains("../media/image1.png"));
        assert!(rels.contains("slideLayout3.xml"));

        let types = read_part(&rendered.bytes, "[Content_Types].xml")?;
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));

        let media = read_part(&rendered.bytes, "docProps/app.xml")?;
        assert!(media.contains("<Slides>1</Slides>"));
        Ok(())
    }

    #[test]
    fn image_slide_without_asset_has_no_picture() -> Result<()> {
        let mut builder = DeckBuilder::default();
        builder.add_image_slide("Assente", Path::new("/nonexistent/plot.png"), "")?;
        let deck = builder.finish();

        let rendered = PptxRenderer::new()?.render(&deck, &props())?;
        let slide = read_part(&rendered.bytes, "ppt/slides/slide1.xml")?;
        assert!(!slide.contains("<p:pic>"));
        assert!(slide.contains("<a:t>Assente</a:t>"));
        assert!(!slide.contains(r#"i="1""#));
        Ok(())
    }

    #[test]
    fn presentation_lists_slides_in_order() -> Result<()> {
        let mut builder = DeckBuilder::default();
        builder.add_title_slide("Uno", "")?;
        builder.add_title_slide("Due", "")?;
        let deck = builder.finish();

        let rendered = PptxRenderer::new()?.render(&deck, &props())?;
        let presentation = read_part(&rendered.bytes, "ppt/presentation.xml")?;
        let first = presentation.find(r#"<p:sldId id="256" r:id="rId6"/>"#);
        let second = presentation.find(r#"<p:sldId id="257" r:id="rId7"/>"#);
        assert!(first.is_some() && second.is_some());
        assert!(first < second);
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));

        let rels = read_part(&rendered.bytes, "ppt/_rels/presentation.xml.rels")?;
        assert!(rels.contains(r#"Id="rId7""#));
        assert!(rels.contains("slides/slide2.xml"));
        Ok(())
    }
}
