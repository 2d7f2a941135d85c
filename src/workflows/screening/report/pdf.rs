use super::document::{LineStyle, ReportLine, SecurityReport};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 20.0;
const LEFT_MM: f32 = 15.0;
const BULLET_INDENT_MM: f32 = 6.0;
const LAYER_NAME: &str = "Report";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unable to render PDF report: {0}")]
    Pdf(String),
}

impl From<printpdf::Error> for ReportError {
    fn from(err: printpdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub(crate) text: String,
    pub(crate) bold: bool,
    pub(crate) size_pt: f32,
    pub(crate) x_mm: f32,
    pub(crate) y_mm: f32,
}

fn font_size(style: LineStyle) -> f32 {
    match style {
        LineStyle::Title => 18.0,
        LineStyle::Heading => 13.0,
        LineStyle::Footer => 10.0,
        _ => 11.0,
    }
}

fn line_gap_mm(style: LineStyle) -> f32 {
    match style {
        LineStyle::Title => 12.0,
        LineStyle::Blank => 4.0,
        _ => 7.0,
    }
}

/// Assigns each line a page and position, starting a new page when the bottom margin is hit.
pub(crate) fn layout(lines: &[ReportLine]) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = TOP_MM;

    for line in lines {
        let gap = line_gap_mm(line.style);
        if y - gap < BOTTOM_MM {
            pages.push(Vec::new());
            y = TOP_MM;
        }

        if line.style != LineStyle::Blank {
            let x_mm = match line.style {
                LineStyle::Bullet => LEFT_MM + BULLET_INDENT_MM,
                _ => LEFT_MM,
            };
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: line.rendered(),
                    bold: matches!(line.style, LineStyle::Title | LineStyle::Heading),
                    size_pt: font_size(line.style),
                    x_mm,
                    y_mm: y,
                });
            }
        }

        y -= gap;
    }

    pages
}

/// Renders the report as an A4 PDF document.
pub fn render_pdf(report: &SecurityReport) -> Result<Vec<u8>, ReportError> {
    let pages = layout(&report.lines());
    let title = format!("{} security report", report.passenger_id);

    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, placed) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };

        for line in placed {
            let font = if line.bold { &bold } else { &regular };
            layer.use_text(
                line.text.as_str(),
                line.size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    let bytes = doc.save_to_bytes()?;
    debug!(
        passenger_id = %report.passenger_id,
        pages = pages.len(),
        bytes = bytes.len(),
        "security report rendered"
    );
    Ok(bytes)
}
