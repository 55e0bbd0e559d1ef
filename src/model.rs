//! Data structures describing the logical content of the report.
//!
//! The types here form the ordered block sequence handed to the renderer:
//! a document title, an optional preamble, and a list of titled sections,
//! each holding paragraphs and spacers. They avoid referencing the
//! rendering layer so a composed report can be inspected and tested without
//! touching `genpdf`.

use crate::richtext::Span;

/// Horizontal alignment applied when a paragraph is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// A paragraph carrying inline styling information and alignment metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans using left alignment.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Concatenated plain text of the paragraph, styling dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }
}

/// Individual content blocks that make up the preamble and sections.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// Fixed vertical gap between paragraphs or sections.
    Spacer,
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Convenience helper for building a single-span paragraph block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Paragraph(RichParagraph::new(vec![Span::new(text)]))
    }

    /// Convenience helper that yields a spacer block.
    pub fn spacer() -> Self {
        Self::Spacer
    }
}

/// A titled group of content blocks rendered under a heading.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    title: String,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates a new section with the provided heading.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Returns the heading of the section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated
    /// instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

/// The complete document handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    title: String,
    preamble: Vec<Block>,
    sections: Vec<Section>,
}

impl Report {
    /// Creates a new report with the given document title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            preamble: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the blocks rendered between the title and the first section.
    pub fn preamble(&self) -> &[Block] {
        &self.preamble
    }

    /// Returns the sections in render order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Appends a preamble block and returns the updated report.
    pub fn with_preamble_block(mut self, block: Block) -> Self {
        self.preamble.push(block);
        self
    }

    /// Appends a section and returns the updated report.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}
