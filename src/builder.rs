//! Rendering the report model into a paginated PDF document.

use std::fs;
use std::path::Path;

use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, PaperSize, Position, Size};

use crate::error::ReportError;
use crate::fonts;
use crate::model::{Block, HorizontalAlignment, Report, RichParagraph, Section};

const DEFAULT_FONT_SIZE: u8 = 11;
const TITLE_FONT_SIZE: u8 = 18;
const HEADING_FONT_SIZE: u8 = 14;
const FOOTER_FONT_SIZE: u8 = 9;

/// A fully rendered document.
pub struct RenderedPdf {
    /// The raw PDF bytes.
    pub bytes: Vec<u8>,
}

/// Builder for the report document, pre-configured with the layout defaults:
/// letter paper, page margins, and a page-number footer.
pub struct PdfBuilder {
    paper_size: Size,
    margins: Margins,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter.into(),
            margins: Margins::trbl(20.0, 15.0, 20.0, 15.0),
        }
    }
}

impl PdfBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for the rendered document.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Renders `report` into PDF bytes.
    pub fn render(&self, report: &Report) -> Result<RenderedPdf, ReportError> {
        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(report.title());
        document.set_paper_size(self.paper_size);
        document.set_font_size(DEFAULT_FONT_SIZE);

        let decorator = ConfiguredPageDecorator::new(
            self.margins,
            FooterSpec::new(10.0, |page| {
                let mut style = Style::new();
                style.set_font_size(FOOTER_FONT_SIZE);
                Paragraph::default()
                    .styled_string(format!("Page {}", page), style)
                    .aligned(Alignment::Center)
            }),
        );
        document.set_page_decorator(decorator);

        let mut title = Paragraph::default();
        let mut title_style = Style::new();
        title_style.set_bold();
        title_style.set_font_size(TITLE_FONT_SIZE);
        title.push_styled(report.title().to_string(), title_style);
        title.set_alignment(Alignment::Center);
        document.push(title);
        document.push(Break::new(1.0));

        for block in report.preamble() {
            push_block(&mut document, block);
        }
        for section in report.sections() {
            push_section(&mut document, section);
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(ReportError::Render)?;
        log::debug!("rendered report into {} bytes", bytes.len());
        Ok(RenderedPdf { bytes })
    }
}

/// Renders `report` and writes it to `path`, creating parent directories as
/// needed. Any existing file at `path` is overwritten.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let pdf = PdfBuilder::new().render(report)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| ReportError::Write(path.to_path_buf(), err))?;
        }
    }
    fs::write(path, &pdf.bytes).map_err(|err| ReportError::Write(path.to_path_buf(), err))?;
    log::debug!("wrote {} bytes to {}", pdf.bytes.len(), path.display());
    Ok(())
}

fn push_section(document: &mut genpdf::Document, section: &Section) {
    let mut heading = Paragraph::default();
    let mut heading_style = Style::new();
    heading_style.set_bold();
    heading_style.set_font_size(HEADING_FONT_SIZE);
    heading.push_styled(section.title().to_string(), heading_style);
    document.push(heading);

    for block in section.blocks() {
        push_block(document, block);
    }
}

fn push_block(document: &mut genpdf::Document, block: &Block) {
    match block {
        Block::Paragraph(paragraph) => document.push(to_element(paragraph)),
        Block::Spacer => document.push(Break::new(1.0)),
    }
}

fn to_element(paragraph: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span.to_styled_string());
    }
    element.set_alignment(map_alignment(paragraph.alignment()));
    element
}

fn map_alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

/// Definition of a footer rendered through the page decorator.
struct FooterSpec {
    height: Mm,
    factory: Box<dyn Fn(usize) -> Box<dyn Element>>,
}

impl FooterSpec {
    fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct ConfiguredPageDecorator {
    page: usize,
    margins: Margins,
    footer: FooterSpec,
}

impl ConfiguredPageDecorator {
    fn new(margins: Margins, footer: FooterSpec) -> Self {
        Self {
            page: 0,
            margins,
            footer,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> Result<genpdf::render::Area<'a>, genpdf::error::Error> {
        self.page += 1;
        area.add_margins(self.margins);

        let available = area.size().height;
        if self.footer.height < available {
            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - self.footer.height));
            let mut element = (self.footer.factory)(self.page);
            element.render(context, footer_area, style)?;
            area.set_height(available - self.footer.height);
        }

        Ok(area)
    }
}
