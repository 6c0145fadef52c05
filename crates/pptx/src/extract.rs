//! Run extraction: a read-only walk over every slide's shape tree.

use crate::deck::Deck;
use crate::slide::{Shape, Slide, TextFrame};
use deck_core::{RunHandle, TextUnit};

impl Deck {
    /// Every translatable run in the deck, in document order.
    ///
    /// Order is slide, then shape (groups and table cells in place, cells
    /// row by row), then paragraph, then run. Runs that are empty or only
    /// whitespace are skipped. Each call starts a fresh walk.
    pub fn text_units(&self) -> TextExtractor<'_> {
        TextExtractor {
            slides: self.slides(),
            next_slide: 0,
            pending: Vec::new().into_iter(),
        }
    }
}

/// Lazy iterator over the translatable runs of a deck.
///
/// Walks one slide at a time.
pub struct TextExtractor<'d> {
    slides: &'d [Slide],
    next_slide: usize,
    pending: std::vec::IntoIter<TextUnit>,
}

impl Iterator for TextExtractor<'_> {
    type Item = TextUnit;

    fn next(&mut self) -> Option<TextUnit> {
        loop {
            if let Some(unit) = self.pending.next() {
                return Some(unit);
            }

            let slide = self.slides.get(self.next_slide)?;
            self.pending = slide_units(slide, self.next_slide).into_iter();
            self.next_slide += 1;
        }
    }
}

/// Translatable runs of one slide.
pub fn slide_units(slide: &Slide, slide_index: usize) -> Vec<TextUnit> {
    let mut ordinals = Vec::new();
    collect_shapes(slide.shapes(), &mut ordinals);

    ordinals
        .into_iter()
        .filter_map(|run| {
            let slot = &slide.runs()[run];
            if slot.text.trim().is_empty() {
                return None;
            }
            Some(TextUnit {
                handle: RunHandle {
                    slide: slide_index,
                    paragraph: slot.paragraph,
                    run,
                },
                text: slot.text.clone(),
            })
        })
        .collect()
}

fn collect_shapes(shapes: &[Shape], out: &mut Vec<usize>) {
    for shape in shapes {
        match shape {
            Shape::Text { frame, .. } => collect_frame(frame, out),
            Shape::Table { rows, .. } => {
                for cell in rows.iter().flatten() {
                    collect_frame(cell, out);
                }
            }
            Shape::Group { shapes, .. } => collect_shapes(shapes, out),
            Shape::Other { .. } => {}
        }
    }
}

fn collect_frame(frame: &TextFrame, out: &mut Vec<usize>) {
    for paragraph in &frame.paragraphs {
        out.extend_from_slice(&paragraph.runs);
    }
}

#[cfg(test)]
mod tests {
    use crate::fixture;
    use crate::Deck;

    fn load(slides: &[String]) -> Deck {
        Deck::from_bytes(fixture::deck(slides), "test.pptx").unwrap()
    }

    fn texts(deck: &Deck) -> Vec<String> {
        deck.text_units().map(|u| u.text).collect()
    }

    #[test]
    fn test_order_is_slide_shape_paragraph_run() {
        let deck = load(&[
            fixture::slide_xml(
                &[
                    fixture::text_box(
                        "Title 1",
                        &[
                            &[fixture::run("a1"), fixture::run("a2")],
                            &[fixture::run("b1")],
                        ],
                    ),
                    fixture::text_box("Body 2", &[&[fixture::run("c1")]]),
                ]
                .concat(),
            ),
            fixture::slide_xml(&fixture::text_box("Title 1", &[&[fixture::run("d1")]])),
        ]);

        assert_eq!(texts(&deck), vec!["a1", "a2", "b1", "c1", "d1"]);

        let handles: Vec<_> = deck.text_units().map(|u| u.handle).collect();
        assert_eq!(handles[0].slide, 0);
        assert_eq!(handles[0].paragraph, handles[1].paragraph);
        assert_ne!(handles[1].paragraph, handles[2].paragraph);
        assert_eq!(handles[4].slide, 1);
        assert!(handles.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_extraction_is_restartable_and_stable() {
        let deck = load(&[fixture::slide_xml(&fixture::text_box(
            "Title 1",
            &[&[fixture::run("Hola"), fixture::run(" mundo")]],
        ))]);

        let first: Vec<_> = deck.text_units().collect();
        let second: Vec<_> = deck.text_units().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_table_cells_are_all_extracted() {
        let deck = load(&[fixture::slide_xml(&fixture::table(
            "Table 1",
            &[&["uno", "dos"], &["tres", "cuatro"]],
        ))]);

        assert_eq!(texts(&deck), vec!["uno", "dos", "tres", "cuatro"]);
    }

    #[test]
    fn test_nested_groups_are_walked() {
        let inner = fixture::group("Inner", &fixture::text_box("Deep", &[&[fixture::run("deep")]]));
        let outer = fixture::group(
            "Outer",
            &[fixture::text_box("Shallow", &[&[fixture::run("shallow")]]), inner].concat(),
        );
        let deck = load(&[fixture::slide_xml(
            &[outer, fixture::text_box("After", &[&[fixture::run("after")]])].concat(),
        )]);

        assert_eq!(texts(&deck), vec!["shallow", "deep", "after"]);
    }

    #[test]
    fn test_blank_runs_are_skipped() {
        let deck = load(&[fixture::slide_xml(&fixture::text_box(
            "Title 1",
            &[&[
                fixture::run(""),
                fixture::run("   "),
                fixture::run("texto"),
                fixture::run("\t"),
            ]],
        ))]);

        let units: Vec<_> = deck.text_units().collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "texto");
        assert_eq!(units[0].handle.run, 2);
        assert_eq!(deck.slides()[0].runs().len(), 4);
    }

    #[test]
    fn test_deck_without_text() {
        let deck = load(&[fixture::slide_xml(&fixture::picture("Picture 1"))]);
        assert_eq!(deck.text_units().count(), 0);
    }
}
