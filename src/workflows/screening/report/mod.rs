mod document;
mod pdf;

pub use document::{LineStyle, Recommendation, ReportLine, SecurityReport};
pub use pdf::{render_pdf, ReportError};
