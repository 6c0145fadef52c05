//! In-memory PPTX builders for tests.
//!
//! Text passed to these helpers is inserted verbatim, so callers escape XML
//! special characters themselves.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// Bytes of the picture part every fixture deck carries.
pub const MEDIA_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Build a complete deck from slide XML documents, in presentation order.
pub fn deck(slides: &[String]) -> Vec<u8> {
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    let mut id_list = String::new();

    for number in 1..=slides.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            number
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            number + 1,
            SLIDE_REL_TYPE,
            number
        ));
        id_list.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            255 + number,
            number + 1
        ));
    }
    content_types.push_str("</Types>");
    rels.push_str("</Relationships>");

    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
        id_list
    );

    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

    let slide_names: Vec<String> = (1..=slides.len())
        .map(|n| format!("ppt/slides/slide{}.xml", n))
        .collect();

    let mut parts: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", content_types.as_bytes()),
        ("_rels/.rels", root_rels.as_bytes()),
        ("ppt/presentation.xml", presentation.as_bytes()),
        ("ppt/_rels/presentation.xml.rels", rels.as_bytes()),
    ];
    for (name, xml) in slide_names.iter().zip(slides) {
        parts.push((name.as_str(), xml.as_bytes()));
    }
    parts.push(("ppt/media/image1.png", MEDIA_BYTES));

    write_zip(&parts)
}

/// Build a ZIP holding only the given text parts.
pub fn package_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let parts: Vec<(&str, &[u8])> = parts
        .iter()
        .map(|(name, content)| (*name, content.as_bytes()))
        .collect();
    write_zip(&parts)
}

fn write_zip(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        let method = if name.ends_with(".png") {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        writer
            .start_file(*name, FileOptions::default().compression_method(method))
            .expect("start zip entry");
        writer.write_all(content).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Wrap shape XML in a slide document.
pub fn slide_xml(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        shapes
    )
}

/// A run with a default `a:rPr`.
pub fn run(text: &str) -> String {
    styled_run(text, r#"lang="en-US" dirty="0""#, "")
}

/// A run with the given `a:rPr` attributes and child elements.
pub fn styled_run(text: &str, attributes: &str, properties: &str) -> String {
    if properties.is_empty() {
        format!(r#"<a:r><a:rPr {}/><a:t>{}</a:t></a:r>"#, attributes, text)
    } else {
        format!(
            r#"<a:r><a:rPr {}>{}</a:rPr><a:t>{}</a:t></a:r>"#,
            attributes, properties, text
        )
    }
}

/// A text box; each inner slice is one paragraph of runs.
pub fn text_box(name: &str, paragraphs: &[&[String]]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|runs| format!("<a:p>{}</a:p>", runs.concat()))
        .collect();
    text_box_raw(name, &body)
}

/// A text box with a hand-written paragraph list.
pub fn text_box_raw(name: &str, paragraphs: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="{}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="838200" y="365125"/><a:ext cx="10515600" cy="1325563"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        name, paragraphs
    )
}

/// A group wrapping already rendered shapes.
pub fn group(name: &str, shapes: &str) -> String {
    format!(
        r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="10" name="{}"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>"#,
        name, shapes
    )
}

/// A picture, which carries no text.
pub fn picture(name: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="20" name="{}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/></p:blipFill><p:spPr/></p:pic>"#,
        name
    )
}

/// A table whose cells each hold one run.
pub fn table(name: &str, rows: &[&[&str]]) -> String {
    let body: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|text| {
                    format!(
                        "<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p>{}</a:p></a:txBody><a:tcPr/></a:tc>",
                        run(text)
                    )
                })
                .collect();
            format!(r#"<a:tr h="370840">{}</a:tr>"#, cells)
        })
        .collect();

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="30" name="{}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="0" y="0"/><a:ext cx="8128000" cy="741680"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid><a:gridCol w="4064000"/><a:gridCol w="4064000"/></a:tblGrid>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        name, body
    )
}
