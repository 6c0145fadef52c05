//! PPTX part parsing: slide order and slide shape trees.

use crate::package::Package;
use crate::slide::{Paragraph, RunSlot, Shape, Slide, TextFrame};
use deck_core::{Error, Result, RunStyle};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Get the ordered list of slide part names.
///
/// The order comes from `p:sldIdLst` in `presentation.xml`. If that list is
/// missing, slides are ordered by the number in their relationship id or
/// file name.
pub fn slide_order(package: &Package) -> Result<Vec<String>> {
    let rels_content = package.read_part(PRESENTATION_RELS_PATH)?;
    let relationships = parse_slide_relationships(&rels_content)?;

    if package.contains(PRESENTATION_PATH) {
        let presentation = package.read_part(PRESENTATION_PATH)?;
        let ids = parse_slide_id_list(&presentation)?;
        if !ids.is_empty() {
            let targets: HashMap<&str, &str> = relationships
                .iter()
                .map(|r| (r.id.as_str(), r.path.as_str()))
                .collect();

            let mut ordered = Vec::with_capacity(ids.len());
            for id in &ids {
                match targets.get(id.as_str()) {
                    Some(path) => ordered.push(path.to_string()),
                    None => log::warn!("Slide relationship {} not found, skipping", id),
                }
            }
            return Ok(ordered);
        }
    }

    log::debug!("No slide id list, ordering slides by relationship number");
    let mut slides: Vec<(String, Option<usize>)> = relationships
        .into_iter()
        .map(|r| {
            let order_num = extract_slide_number(&r.path).or_else(|| extract_slide_number(&r.id));
            (r.path, order_num)
        })
        .collect();

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

/// A slide relationship from `presentation.xml.rels`.
#[derive(Debug)]
struct SlideRelationship {
    id: String,
    path: String,
}

fn parse_slide_relationships(rels_content: &str) -> Result<Vec<SlideRelationship>> {
    let mut reader = Reader::from_str(rels_content);
    reader.trim_text(true);
    let mut slides = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut id = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if rel_type.ends_with("/slide") {
                    slides.push(SlideRelationship {
                        id,
                        path: resolve_target(&target),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Relationship ids from `p:sldIdLst`, in presentation order.
fn parse_slide_id_list(presentation: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(presentation);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                for attr in e.attributes().flatten() {
                    let key = attr.key.as_ref();
                    // `r:id` is the relationship; plain `id` is the slide id.
                    if key != b"id" && local_name(key) == b"id" {
                        ids.push(String::from_utf8_lossy(&attr.value).to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Resolve a relationship target relative to the `ppt/` directory.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target.trim_start_matches("./")),
    }
}

/// Parse a slide part into its event list and shape tree.
pub fn parse_slide(xml_content: &str, path: &str, number: usize) -> Result<Slide> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(false);

    let mut events = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => events.push(event.into_owned()),
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing {} at position {}: {}",
                    path,
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    let mut builder = TreeBuilder::new(&events);
    let shapes = builder.build()?;
    let runs = builder.runs;

    log::debug!(
        "Parsed {}: {} top-level shapes, {} runs",
        path,
        shapes.len(),
        runs.len()
    );

    Ok(Slide {
        number,
        path: path.to_string(),
        shapes,
        runs,
        events,
        dirty: false,
    })
}

/// Builds the shape tree by descending through the flat event list.
struct TreeBuilder<'a> {
    events: &'a [Event<'static>],
    pos: usize,
    runs: Vec<RunSlot>,
    paragraphs: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(events: &'a [Event<'static>]) -> Self {
        Self {
            events,
            pos: 0,
            runs: Vec::new(),
            paragraphs: 0,
        }
    }

    fn next(&mut self) -> Option<&'a Event<'static>> {
        let event = self.events.get(self.pos);
        self.pos += 1;
        event
    }

    fn build(&mut self) -> Result<Vec<Shape>> {
        while let Some(event) = self.next() {
            if let Event::Start(e) = event {
                if start_name(e) == b"spTree" {
                    let (_, shapes) = self.shapes_until(b"spTree")?;
                    return Ok(shapes);
                }
            }
        }

        Ok(Vec::new())
    }

    /// Collect child shapes until the end of the enclosing container.
    ///
    /// Also returns the container's own `cNvPr` name, which sits in its
    /// non-visual properties next to the children.
    fn shapes_until(&mut self, end: &[u8]) -> Result<(String, Vec<Shape>)> {
        let mut name = String::new();
        let mut shapes = Vec::new();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match start_name(e) {
                    b"sp" => shapes.push(self.shape()?),
                    b"grpSp" => {
                        let (group_name, children) = self.shapes_until(b"grpSp")?;
                        shapes.push(Shape::Group {
                            name: group_name,
                            shapes: children,
                        });
                    }
                    b"graphicFrame" => shapes.push(self.graphic_frame()?),
                    tag @ (b"pic" | b"cxnSp" | b"contentPart") => shapes.push(Shape::Other {
                        name: self.element_name(tag),
                    }),
                    b"cNvPr" => {
                        name = attribute(e, b"name").unwrap_or_default();
                        self.skip(b"cNvPr");
                    }
                    // Choice and Fallback hold the same content twice.
                    tag @ (b"AlternateContent" | b"extLst") => self.skip(tag),
                    _ => {}
                },
                Event::Empty(e) if start_name(e) == b"cNvPr" => {
                    name = attribute(e, b"name").unwrap_or_default();
                }
                Event::End(e) if local_name(e.name().into_inner()) == end => break,
                _ => {}
            }
        }

        Ok((name, shapes))
    }

    /// Parse a `p:sp` after its start tag.
    fn shape(&mut self) -> Result<Shape> {
        let mut name = String::new();
        let mut frame = None;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match start_name(e) {
                    b"cNvPr" => {
                        name = attribute(e, b"name").unwrap_or_default();
                        self.skip(b"cNvPr");
                    }
                    b"txBody" => frame = Some(self.text_body()?),
                    _ => {}
                },
                Event::Empty(e) if start_name(e) == b"cNvPr" => {
                    name = attribute(e, b"name").unwrap_or_default();
                }
                Event::End(e) if local_name(e.name().into_inner()) == b"sp" => break,
                _ => {}
            }
        }

        Ok(match frame {
            Some(frame) => Shape::Text { name, frame },
            None => Shape::Other { name },
        })
    }

    /// Parse a `p:graphicFrame`; only tables carry text we handle.
    fn graphic_frame(&mut self) -> Result<Shape> {
        let mut name = String::new();
        let mut rows = None;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match start_name(e) {
                    b"cNvPr" => {
                        name = attribute(e, b"name").unwrap_or_default();
                        self.skip(b"cNvPr");
                    }
                    b"tbl" => rows = Some(self.table()?),
                    _ => {}
                },
                Event::Empty(e) if start_name(e) == b"cNvPr" => {
                    name = attribute(e, b"name").unwrap_or_default();
                }
                Event::End(e) if local_name(e.name().into_inner()) == b"graphicFrame" => break,
                _ => {}
            }
        }

        Ok(match rows {
            Some(rows) => Shape::Table { name, rows },
            None => Shape::Other { name },
        })
    }

    fn table(&mut self) -> Result<Vec<Vec<TextFrame>>> {
        let mut rows = Vec::new();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) if start_name(e) == b"tr" => rows.push(self.table_row()?),
                Event::End(e) if local_name(e.name().into_inner()) == b"tbl" => break,
                _ => {}
            }
        }

        Ok(rows)
    }

    fn table_row(&mut self) -> Result<Vec<TextFrame>> {
        let mut cells = Vec::new();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) if start_name(e) == b"tc" => cells.push(self.table_cell()?),
                Event::Empty(e) if start_name(e) == b"tc" => cells.push(TextFrame::default()),
                Event::End(e) if local_name(e.name().into_inner()) == b"tr" => break,
                _ => {}
            }
        }

        Ok(cells)
    }

    fn table_cell(&mut self) -> Result<TextFrame> {
        let mut frame = TextFrame::default();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) if start_name(e) == b"txBody" => frame = self.text_body()?,
                Event::End(e) if local_name(e.name().into_inner()) == b"tc" => break,
                _ => {}
            }
        }

        Ok(frame)
    }

    fn text_body(&mut self) -> Result<TextFrame> {
        let mut frame = TextFrame::default();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) if start_name(e) == b"p" => {
                    frame.paragraphs.push(self.paragraph()?);
                }
                Event::Empty(e) if start_name(e) == b"p" => {
                    let index = self.next_paragraph_index();
                    frame.paragraphs.push(Paragraph {
                        index,
                        runs: Vec::new(),
                    });
                }
                Event::End(e) if local_name(e.name().into_inner()) == b"txBody" => break,
                _ => {}
            }
        }

        Ok(frame)
    }

    fn paragraph(&mut self) -> Result<Paragraph> {
        let index = self.next_paragraph_index();
        let mut runs = Vec::new();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match start_name(e) {
                    b"r" => runs.push(self.run(index)?),
                    // Fields (slide numbers, dates) are regenerated by the viewer.
                    b"fld" => self.skip(b"fld"),
                    _ => {}
                },
                Event::End(e) if local_name(e.name().into_inner()) == b"p" => break,
                _ => {}
            }
        }

        Ok(Paragraph { index, runs })
    }

    fn run(&mut self, paragraph: usize) -> Result<usize> {
        let mut style = RunStyle::default();
        let mut text = String::new();
        let mut text_events = Vec::new();

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) => match start_name(e) {
                    b"rPr" => {
                        read_run_attributes(e, &mut style);
                        self.run_properties(&mut style);
                    }
                    b"t" => self.text_node(&mut text, &mut text_events)?,
                    _ => {}
                },
                Event::Empty(e) if start_name(e) == b"rPr" => read_run_attributes(e, &mut style),
                Event::End(e) if local_name(e.name().into_inner()) == b"r" => break,
                _ => {}
            }
        }

        self.runs.push(RunSlot {
            text,
            style,
            paragraph,
            text_events,
        });

        Ok(self.runs.len() - 1)
    }

    /// Read the content of `a:t`. Text may be split by comments or held in
    /// CDATA sections; every piece is recorded so a rewrite replaces all of it.
    fn text_node(&mut self, text: &mut String, text_events: &mut Vec<usize>) -> Result<()> {
        while let Some(event) = self.next() {
            match event {
                Event::Text(t) => {
                    let value = t
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Invalid run text: {}", e)))?;
                    text_events.push(self.pos - 1);
                    text.push_str(&value);
                }
                Event::CData(c) => {
                    let value = std::str::from_utf8(c)
                        .map_err(|e| Error::XmlError(format!("Invalid run text: {}", e)))?;
                    text_events.push(self.pos - 1);
                    text.push_str(value);
                }
                Event::End(e) if local_name(e.name().into_inner()) == b"t" => break,
                _ => {}
            }
        }

        Ok(())
    }

    /// Read `a:rPr` children: typeface and solid fill color.
    fn run_properties(&mut self, style: &mut RunStyle) {
        let mut in_fill = false;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) | Event::Empty(e) => match start_name(e) {
                    b"latin" => style.typeface = attribute(e, b"typeface"),
                    b"solidFill" if matches!(event, Event::Start(_)) => in_fill = true,
                    b"srgbClr" | b"schemeClr" if in_fill => style.color = attribute(e, b"val"),
                    // Outline and highlight colors are not the text color.
                    tag @ (b"ln" | b"highlight") if matches!(event, Event::Start(_)) => self.skip(tag),
                    _ => {}
                },
                Event::End(e) => match local_name(e.name().into_inner()) {
                    b"solidFill" => in_fill = false,
                    b"rPr" => break,
                    _ => {}
                },
                _ => {}
            }
        }
    }

    /// Consume events up to and including the end tag of the element whose
    /// start tag was just read.
    fn skip(&mut self, tag: &[u8]) {
        let mut depth = 0usize;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) if start_name(e) == tag => depth += 1,
                Event::End(e) if local_name(e.name().into_inner()) == tag => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }

    /// Read the `cNvPr` name inside an element and consume the element.
    fn element_name(&mut self, tag: &[u8]) -> String {
        let mut name = String::new();
        let mut depth = 0usize;

        while let Some(event) = self.next() {
            match event {
                Event::Start(e) | Event::Empty(e) if start_name(e) == b"cNvPr" && name.is_empty() => {
                    name = attribute(e, b"name").unwrap_or_default();
                    if matches!(event, Event::Start(_)) {
                        self.skip(b"cNvPr");
                    }
                }
                Event::Start(e) if start_name(e) == tag => depth += 1,
                Event::End(e) if local_name(e.name().into_inner()) == tag => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }

        name
    }

    fn next_paragraph_index(&mut self) -> usize {
        let index = self.paragraphs;
        self.paragraphs += 1;
        index
    }
}

/// Read the attributes of `a:rPr`.
fn read_run_attributes(e: &BytesStart<'_>, style: &mut RunStyle) {
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"lang" => style.lang = Some(value),
            b"sz" => style.size = value.parse().ok(),
            b"b" => style.bold = parse_bool(&value),
            b"i" => style.italic = parse_bool(&value),
            b"u" => style.underline = Some(value),
            _ => {}
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Unescaped value of an attribute.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn start_name<'e>(e: &'e BytesStart<'_>) -> &'e [u8] {
    local_name(e.name().into_inner())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("ppt/slides/slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
    }

    #[test]
    fn test_slide_id_list_order_wins_over_file_names() {
        let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
</Relationships>"#;
        let presentation = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst><p:sldId id="257" r:id="rId3"/><p:sldId id="256" r:id="rId2"/></p:sldIdLst></p:presentation>"#;

        let relationships = parse_slide_relationships(rels).unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(parse_slide_id_list(presentation).unwrap(), vec!["rId3", "rId2"]);

        let package = Package::from_bytes(fixture::package_with_parts(&[
            ("ppt/_rels/presentation.xml.rels", rels),
            ("ppt/presentation.xml", presentation),
        ]))
        .unwrap();
        assert_eq!(
            slide_order(&package).unwrap(),
            vec!["ppt/slides/slide2.xml", "ppt/slides/slide1.xml"]
        );
    }

    #[test]
    fn test_fallback_order_without_presentation_part() {
        let rels = r#"<Relationships>
<Relationship Id="rId9" Type="http://x/relationships/slide" Target="slides/slide10.xml"/>
<Relationship Id="rId4" Type="http://x/relationships/slide" Target="slides/slide2.xml"/>
</Relationships>"#;
        let package = Package::from_bytes(fixture::package_with_parts(&[(
            "ppt/_rels/presentation.xml.rels",
            rels,
        )]))
        .unwrap();

        assert_eq!(
            slide_order(&package).unwrap(),
            vec!["ppt/slides/slide2.xml", "ppt/slides/slide10.xml"]
        );
    }

    #[test]
    fn test_parse_run_style() {
        let xml = fixture::slide_xml(&fixture::text_box(
            "Title 1",
            &[&[fixture::styled_run(
                "Hola",
                r#"lang="es-ES" sz="2400" b="1" i="0""#,
                r#"<a:ln><a:solidFill><a:srgbClr val="000000"/></a:solidFill></a:ln><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill><a:latin typeface="Calibri"/>"#,
            )]],
        ));

        let slide = parse_slide(&xml, "ppt/slides/slide1.xml", 1).unwrap();
        let run = &slide.runs()[0];
        assert_eq!(run.text, "Hola");
        assert_eq!(
            run.style,
            RunStyle {
                lang: Some("es-ES".to_string()),
                size: Some(2400),
                bold: Some(true),
                italic: Some(false),
                underline: None,
                typeface: Some("Calibri".to_string()),
                color: Some("FF0000".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_groups_tables_and_pictures() {
        let xml = fixture::slide_xml(&[
            fixture::text_box("Title 1", &[&[fixture::run("Uno")]]),
            fixture::group(
                "Group 2",
                &[
                    fixture::text_box("Inner 3", &[&[fixture::run("Dos")]]),
                    fixture::picture("Picture 4"),
                ]
                .concat(),
            ),
            fixture::table("Table 5", &[&["A", "B"], &["C", "D"]]),
        ]
        .concat());

        let slide = parse_slide(&xml, "ppt/slides/slide1.xml", 1).unwrap();
        let shapes = slide.shapes();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].name(), "Title 1");

        match &shapes[1] {
            Shape::Group { name, shapes } => {
                assert_eq!(name, "Group 2");
                assert_eq!(shapes.len(), 2);
                assert!(matches!(&shapes[0], Shape::Text { name, .. } if name == "Inner 3"));
                assert!(matches!(&shapes[1], Shape::Other { name } if name == "Picture 4"));
            }
            other => panic!("expected group, got {:?}", other),
        }

        match &shapes[2] {
            Shape::Table { name, rows } => {
                assert_eq!(name, "Table 5");
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|row| row.len() == 2));
            }
            other => panic!("expected table, got {:?}", other),
        }

        let texts: Vec<&str> = slide.runs().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Uno", "Dos", "A", "B", "C", "D"]);
    }

    #[test]
    fn test_field_runs_are_not_runs() {
        let xml = fixture::slide_xml(&fixture::text_box_raw(
            "Footer 1",
            r#"<a:p><a:fld id="{1}" type="slidenum"><a:rPr lang="en-US"/><a:t>3</a:t></a:fld><a:r><a:rPr lang="en-US"/><a:t>of ten</a:t></a:r></a:p>"#,
        ));

        let slide = parse_slide(&xml, "ppt/slides/slide1.xml", 1).unwrap();
        assert_eq!(slide.runs().len(), 1);
        assert_eq!(slide.runs()[0].text, "of ten");
    }

    #[test]
    fn test_unescapes_run_text() {
        let xml = fixture::slide_xml(&fixture::text_box("T", &[&[fixture::run("Tom &amp; Jerry")]]));
        let slide = parse_slide(&xml, "ppt/slides/slide1.xml", 1).unwrap();
        assert_eq!(slide.runs()[0].text, "Tom & Jerry");
    }

    #[test]
    fn test_reads_cdata_and_split_run_text() {
        let xml = fixture::slide_xml(&fixture::text_box_raw(
            "T",
            r#"<a:p><a:r><a:rPr/><a:t><![CDATA[a < b]]></a:t></a:r><a:r><a:rPr/><a:t>x<?pi?>y</a:t></a:r></a:p>"#,
        ));
        let slide = parse_slide(&xml, "ppt/slides/slide1.xml", 1).unwrap();
        let runs = slide.runs();
        assert_eq!(runs[0].text, "a < b");
        assert_eq!(runs[0].text_events.len(), 1);
        assert_eq!(runs[1].text, "xy");
        assert_eq!(runs[1].text_events.len(), 2);
    }

    #[test]
    fn test_malformed_slide_is_an_error() {
        let result = parse_slide("<p:sld><p:cSld></p:sld>", "ppt/slides/slide1.xml", 1);
        assert!(matches!(result, Err(Error::XmlError(_))));
    }
}
