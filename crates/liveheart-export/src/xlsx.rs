use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::context::{ProtocolContext, Row};
use crate::error::ExportError;

const SHEET_NAME: &str = "Protocol";
const FONT: &str = "Arial";
const LAST_COL: u16 = 3;

struct Formats {
    normal: Format,
    bold: Format,
    title: Format,
    banner: Format,
    section: Format,
    cell: Format,
}

impl Formats {
    fn new() -> Self {
        let normal = Format::new().set_font_name(FONT).set_font_size(10);
        let bold = normal.clone().set_bold();
        Self {
            title: bold.clone().set_font_size(12).set_align(FormatAlign::Center),
            banner: bold.clone().set_align(FormatAlign::Center),
            section: bold
                .clone()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(Color::RGB(0xEEEEEE))
                .set_border(FormatBorder::Thin),
            cell: normal.clone().set_border(FormatBorder::Thin),
            normal,
            bold,
        }
    }
}

/// Generate a single-sheet XLSX protocol: a title banner, the patient grid,
/// then one bordered block per section.
pub fn generate_xlsx(context: &ProtocolContext) -> Result<Vec<u8>, ExportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, width) in [(0, 30.0), (1, 15.0), (2, 30.0), (3, 15.0)] {
        sheet.set_column_width(col, width)?;
    }

    let mut row: u32 = 0;
    if let Some(institution) = &context.institution {
        sheet.merge_range(row, 0, row, LAST_COL, institution, &formats.banner)?;
        row += 1;
    }
    sheet.merge_range(row, 0, row, LAST_COL, &context.title, &formats.title)?;
    row += 2;

    let patient = &context.patient;
    let grid = [
        ("Patient:", patient.full_name.clone(), "Date:", patient.exam_date.clone()),
        (
            "Age:",
            patient.age.clone(),
            "Height / Weight:",
            format!("{} / {}", patient.height, patient.weight),
        ),
        (
            "BSA:",
            patient.bsa.clone(),
            "Heart rate:",
            patient.heart_rate.clone(),
        ),
    ];
    for (left_label, left, right_label, right) in grid {
        sheet.write_string_with_format(row, 0, left_label, &formats.bold)?;
        sheet.write_string_with_format(row, 1, left, &formats.normal)?;
        sheet.write_string_with_format(row, 2, right_label, &formats.bold)?;
        sheet.write_string_with_format(row, 3, right, &formats.normal)?;
        row += 1;
    }
    row += 1;

    for section in &context.sections {
        row = write_section(sheet, &formats, row, &section.name, &section.rows)?;
    }

    sheet.merge_range(row, 0, row, LAST_COL, "Regional Wall Motion", &formats.section)?;
    row += 1;
    sheet.merge_range(
        row,
        0,
        row,
        LAST_COL,
        &context.wall_motion.conclusion,
        &formats.cell,
    )?;

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(
        sections = context.sections.len(),
        bytes = bytes.len(),
        "xlsx protocol generated"
    );
    Ok(bytes)
}

/// Section title across all columns, then `label | value` rows with the
/// value spanning the remaining columns. Returns the next free row.
fn write_section(
    sheet: &mut Worksheet,
    formats: &Formats,
    mut row: u32,
    title: &str,
    rows: &[Row],
) -> Result<u32, ExportError> {
    sheet.merge_range(row, 0, row, LAST_COL, title, &formats.section)?;
    row += 1;

    for entry in rows {
        sheet.write_string_with_format(row, 0, &entry.label, &formats.cell)?;
        sheet.merge_range(row, 1, row, LAST_COL, &entry.value, &formats.cell)?;
        row += 1;
    }
    Ok(row + 1)
}
