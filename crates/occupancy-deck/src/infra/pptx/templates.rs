//! Templates for the generated parts of the presentation package.
//!
//! Static parts (theme, master, layouts) are shipped verbatim from `assets/pptx`.
//! Parts that depend on the deck are rendered through minijinja; every
//! interpolated string goes through the `xml` filter.

use anyhow::{Result, anyhow};
use minijinja::{AutoEscape, Environment};

pub const THEME: &str = include_str!("../../../assets/pptx/theme1.xml");
pub const SLIDE_MASTER: &str = include_str!("../../../assets/pptx/slideMaster1.xml");
pub const SLIDE_MASTER_RELS: &str = include_str!("../../../assets/pptx/slideMaster1.xml.rels");
pub const PRES_PROPS: &str = include_str!("../../../assets/pptx/presProps.xml");
pub const VIEW_PROPS: &str = include_str!("../../../assets/pptx/viewProps.xml");
pub const TABLE_STYLES: &str = include_str!("../../../assets/pptx/tableStyles.xml");
pub const SLIDE_LAYOUT_RELS: &str = include_str!("../../../assets/pptx/slideLayout.xml.rels");

/// Slide layouts in master order; the index + 1 is the layout part number.
pub const SLIDE_LAYOUTS: [&str; 3] = [
    include_str!("../../../assets/pptx/slideLayout1.xml"),
    include_str!("../../../assets/pptx/slideLayout2.xml"),
    include_str!("../../../assets/pptx/slideLayout3.xml"),
];

pub const CONTENT_TYPES: &str = "content_types";
pub const ROOT_RELS: &str = "root_rels";
pub const CORE_PROPS: &str = "core_props";
pub const APP_PROPS: &str = "app_props";
pub const PRESENTATION: &str = "presentation";
pub const PRESENTATION_RELS: &str = "presentation_rels";
pub const SLIDE: &str = "slide";
pub const SLIDE_RELS: &str = "slide_rels";

/// Build the environment with all package templates registered.
pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("xml", escape_xml);

    let templates = [
        (CONTENT_TYPES, CONTENT_TYPES_TEMPLATE),
        (ROOT_RELS, ROOT_RELS_TEMPLATE),
        (CORE_PROPS, CORE_PROPS_TEMPLATE),
        (APP_PROPS, APP_PROPS_TEMPLATE),
        (PRESENTATION, PRESENTATION_TEMPLATE),
        (PRESENTATION_RELS, PRESENTATION_RELS_TEMPLATE),
        (SLIDE, SLIDE_TEMPLATE),
        (SLIDE_RELS, SLIDE_RELS_TEMPLATE),
    ];
    for (name, source) in templates {
        env.add_template(name, source)
            .map_err(|err| anyhow!("failed to register template '{name}': {err}"))?;
    }
    Ok(env)
}

/// Escape text for use in XML character data and attribute values.
pub fn escape_xml(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const CONTENT_TYPES_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
{% for media in media_types %}
<Default Extension="{{ media.extension|xml }}" ContentType="{{ media.content_type|xml }}"/>
{% endfor %}
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
{% for number in layouts %}
<Override PartName="/ppt/slideLayouts/slideLayout{{ number }}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
{% endfor %}
{% for number in slides %}
<Override PartName="/ppt/slides/slide{{ number }}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
{% endfor %}
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
<Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
<Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>
"#;

const ROOT_RELS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>
"#;

const CORE_PROPS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
{% if title %}
<dc:title>{{ title|xml }}</dc:title>
{% endif %}
<dc:creator>{{ creator|xml }}</dc:creator>
<cp:lastModifiedBy>{{ creator|xml }}</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
<dcterms:created xsi:type="dcterms:W3CDTF">{{ created_at }}</dcterms:created>
<dcterms:modified xsi:type="dcterms:W3CDTF">{{ created_at }}</dcterms:modified>
</cp:coreProperties>
"#;

const APP_PROPS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>{{ application|xml }}</Application>
<PresentationFormat>On-screen Show (4:3)</PresentationFormat>
<Slides>{{ slide_count }}</Slides>
</Properties>
"#;

const PRESENTATION_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
{% if slides %}
<p:sldIdLst>
{% for slide in slides %}
<p:sldId id="{{ slide.id }}" r:id="{{ slide.rel_id }}"/>
{% endfor %}
</p:sldIdLst>
{% endif %}
<p:sldSz cx="{{ width }}" cy="{{ height }}" type="screen4x3"/>
<p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>
"#;

const PRESENTATION_RELS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps" Target="viewProps.xml"/>
<Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles" Target="tableStyles.xml"/>
{% for slide in slides %}
<Relationship Id="{{ slide.rel_id }}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{{ slide.number }}.xml"/>
{% endfor %}
</Relationships>
"#;

const SLIDE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{% for shape in shapes %}
{% if shape.kind == "picture" %}
<p:pic>
<p:nvPicPr><p:cNvPr id="{{ shape.id }}" name="{{ shape.name|xml }}" descr="{{ shape.description|xml }}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>
<p:blipFill><a:blip r:embed="{{ shape.rel_id }}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>
<p:spPr><a:xfrm><a:off x="{{ shape.x }}" y="{{ shape.y }}"/><a:ext cx="{{ shape.cx }}" cy="{{ shape.cy }}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
</p:pic>
{% else %}
<p:sp>
{% if shape.kind == "placeholder" %}
<p:nvSpPr><p:cNvPr id="{{ shape.id }}" name="{{ shape.name|xml }}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph{% if shape.ph_type %} type="{{ shape.ph_type }}"{% endif %}{% if shape.ph_idx %} idx="{{ shape.ph_idx }}"{% endif %}/></p:nvPr></p:nvSpPr>
<p:spPr/>
<p:txBody><a:bodyPr/><a:lstStyle/>
{% else %}
<p:nvSpPr><p:cNvPr id="{{ shape.id }}" name="{{ shape.name|xml }}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="{{ shape.x }}" y="{{ shape.y }}"/><a:ext cx="{{ shape.cx }}" cy="{{ shape.cy }}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>
<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>
{% endif %}
{% for para in shape.paragraphs %}
<a:p>{% if para.level or para.align %}<a:pPr{% if para.level %} lvl="{{ para.level }}"{% endif %}{% if para.align %} algn="{{ para.align }}"{% endif %}/>{% endif %}{% if para.text %}<a:r><a:rPr lang="it-IT"{% if para.size %} sz="{{ para.size }}"{% endif %}{% if para.bold %} b="1"{% endif %}{% if para.italic %} i="1"{% endif %} dirty="0"/><a:t>{{ para.text|xml }}</a:t></a:r>{% else %}<a:endParaRPr lang="it-IT" dirty="0"/>{% endif %}</a:p>
{% endfor %}
</p:txBody>
</p:sp>
{% endif %}
{% endfor %}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>
"#;

const SLIDE_RELS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{{ layout }}.xml"/>
{% for image in images %}
<Relationship Id="{{ image.rel_id }}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{{ image.file_name|xml }}"/>
{% endfor %}
</Relationships>
"#;
