use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const FONT: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Page geometry and type sizes for the attendance report.
#[derive(Debug, Clone, Copy)]
pub struct PageStyle {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub row_height: f32,
    pub font_size: f32,
    pub header_font_size: f32,
    pub title_font_size: f32,
}

impl Default for PageStyle {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 50.0,
            row_height: 20.0,
            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 16.0,
        }
    }
}

/// Multi-page table writer over Helvetica with WinAnsi encoding, so
/// Spanish accents render.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
    style: PageStyle,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new(PageStyle::default())
    }
}

impl PdfManager {
    pub fn new(style: PageStyle) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_font_id,
            page_refs: Vec::new(),
            next_id: 5,
            style,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn push_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.style.width, self.style.height))
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(FONT, self.font_id)
                .pair(FONT_BOLD, self.bold_font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn text(content: &mut Content, font: Name, size: f32, x: f32, y: f32, text: &str) {
        let encoded = to_win_ansi(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encoded));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_gray(gray);
        content.rect(self.style.margin, y, width, self.style.row_height);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], row: &[String], bold: bool) {
        let (font, size) = if bold {
            (FONT_BOLD, self.style.header_font_size)
        } else {
            (FONT, self.style.font_size)
        };

        let mut x = self.style.margin;
        for (cell, w) in row.iter().zip(widths) {
            let fitted = fit_to_width(cell, *w - 8.0, size);
            Self::text(content, font, size, x + 4.0, y + 6.0, &fitted);

            content.save_state();
            content.set_stroke_gray(0.65);
            content.rect(x, y, *w, self.style.row_height);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Proportional widths from header and cell lengths, scaled down to fit
    /// between the margins.
    fn column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| text_width(h, self.style.header_font_size) + 10.0)
            .collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(text_width(cell, self.style.font_size) + 10.0);
            }
        }

        let available = self.style.width - 2.0 * self.style.margin;
        let total: f32 = widths.iter().sum();
        if total > available {
            let scale = available / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }
        widths
    }

    /// Title and subtitle on the first page, the table repeated with its
    /// header on every page, a page number in the footer, and an optional
    /// closing line after the last row.
    pub fn write_report(
        &mut self,
        title: &str,
        subtitle: &str,
        headers: &[&str],
        rows: &[Vec<String>],
        footer_line: Option<&str>,
    ) {
        let s = self.style;
        let widths = self.column_widths(headers, rows);
        let table_width: f32 = widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_no = 1;

        loop {
            let mut content = Content::new();
            let mut y = s.height - s.margin;

            if page_no == 1 {
                Self::text(&mut content, FONT_BOLD, s.title_font_size, s.margin, y, title);
                y -= s.title_font_size + 6.0;
                Self::text(&mut content, FONT, s.font_size, s.margin, y, subtitle);
                y -= s.row_height + 10.0;
            } else {
                y -= s.row_height;
            }

            self.fill_band(&mut content, y, table_width, 0.85);
            self.draw_row(&mut content, y, &widths, &header_row, true);
            y -= s.row_height;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < s.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_width, 0.96);
                }
                self.draw_row(&mut content, y, &widths, row, false);
                y -= s.row_height;
                consumed += 1;
            }
            remaining = &remaining[consumed..];

            if remaining.is_empty()
                && let Some(line) = footer_line
            {
                Self::text(&mut content, FONT_BOLD, s.font_size, s.margin, y + 4.0, line);
            }

            let page_label = format!("Página {page_no}");
            Self::text(
                &mut content,
                FONT,
                s.font_size,
                s.width - s.margin - 50.0,
                s.margin - 30.0,
                &page_label,
            );

            self.push_page(content);
            page_no += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Latin-1 subset of WinAnsi; anything outside it becomes `?`.
pub(crate) fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Rough Helvetica advance: 0.5 em per character.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn fit_to_width(text: &str, max_width: f32, size: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }
    let max_chars = ((max_width / (size * 0.5)) as usize).saturating_sub(1);
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('.');
    out
}
