// Lays the contract text out on A4 pages using printpdf's built-in fonts.
// The HTML rendering is kept beside the PDF so the exact substituted text is
// always available.
use crate::core::template::{ContractText, SIGNATURE_LINE};
use crate::core::{DocumentPrinter, Storage};
use crate::utils::error::{ContractError, Result};
use async_trait::async_trait;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::path::PathBuf;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
// Helvetica averages roughly half an em per glyph.
const CHARS_PER_MM_AT_1PT: f32 = 2.0 / 0.3528;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Style {
    Title,
    Heading,
    Body,
    Strong,
}

impl Style {
    fn size(&self) -> f32 {
        match self {
            Style::Title => TITLE_SIZE,
            Style::Heading => HEADING_SIZE,
            Style::Body | Style::Strong => BODY_SIZE,
        }
    }

    fn line_height(&self) -> f32 {
        self.size() * 0.3528 * 1.5
    }
}

/// A line of text ready to be placed, produced before touching the PDF so the
/// layout can be tested on its own.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    style: Style,
    space_before: f32,
}

fn max_chars(style: Style) -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    (usable * CHARS_PER_MM_AT_1PT / style.size()) as usize
}

/// Greedy word wrap on character count.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_paragraph(lines: &mut Vec<Line>, text: &str, style: Style, space_before: f32) {
    for (i, chunk) in wrap(text, max_chars(style)).into_iter().enumerate() {
        lines.push(Line {
            text: chunk,
            style,
            space_before: if i == 0 { space_before } else { 0.0 },
        });
    }
}

fn layout(contract: &ContractText) -> Vec<Line> {
    let mut lines = Vec::new();
    push_paragraph(&mut lines, contract.title, Style::Title, 0.0);

    for section in [&contract.contracting, &contract.contracted] {
        push_paragraph(&mut lines, section.heading, Style::Heading, 6.0);
        for field in &section.fields {
            let text = format!("{} {}", field.label, field.value);
            push_paragraph(&mut lines, &text, Style::Strong, 1.0);
        }
    }

    push_paragraph(&mut lines, contract.purpose_heading, Style::Heading, 6.0);
    push_paragraph(&mut lines, contract.purpose, Style::Body, 1.0);

    push_paragraph(&mut lines, contract.clauses_heading, Style::Heading, 6.0);
    for clause in &contract.clauses {
        push_paragraph(&mut lines, clause, Style::Body, 1.0);
    }

    for (i, label) in contract.signatures.iter().enumerate() {
        let gap = if i == 0 { 18.0 } else { 12.0 };
        push_paragraph(&mut lines, SIGNATURE_LINE, Style::Body, gap);
        push_paragraph(&mut lines, label, Style::Body, 0.0);
    }

    lines
}

// Windows-1252 code points in 0x80..=0x9F; everything else the built-in
// fonts can show is printable ASCII or Latin-1.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(c)
}

/// Built-in fonts drop anything outside WinAnsi, so refuse instead of
/// printing a contract with altered names.
fn check_encodable(lines: &[Line]) -> Result<()> {
    for line in lines {
        if let Some(c) = line.text.chars().find(|c| !is_win_ansi(*c)) {
            return Err(ContractError::RenderError {
                message: format!(
                    "character '{}' (U+{:04X}) in \"{}\" cannot be printed with the built-in PDF fonts",
                    c, c as u32, line.text
                ),
            });
        }
    }
    Ok(())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_pdf(contract: &ContractText, lines: &[Line]) -> Result<Vec<u8>> {
    check_encodable(lines)?;

    let (doc, page, layer) =
        PdfDocument::new(contract.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: add_font(&doc, BuiltinFont::Helvetica)?,
        bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
    };

    let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    let mut pages = 1;

    for line in lines {
        let advance = line.space_before + line.style.line_height();
        if y - advance < MARGIN {
            pages += 1;
            let (next_page, next_layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}, Layer 1", pages),
            );
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= advance;

        let font = match line.style {
            Style::Body => &fonts.regular,
            Style::Title | Style::Heading | Style::Strong => &fonts.bold,
        };
        let x = if line.style == Style::Title {
            centered_x(&line.text, line.style)
        } else {
            MARGIN
        };
        current.use_text(line.text.clone(), line.style.size(), Mm(x), Mm(y), font);
    }

    tracing::debug!("Laid out {} lines on {} page(s)", lines.len(), pages);

    doc.save_to_bytes().map_err(|e| ContractError::RenderError {
        message: format!("PDF serialization failed: {}", e),
    })
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| ContractError::RenderError {
            message: format!("Could not load built-in font: {}", e),
        })
}

fn centered_x(text: &str, style: Style) -> f32 {
    let approx_width = text.chars().count() as f32 * style.size() / CHARS_PER_MM_AT_1PT;
    ((PAGE_WIDTH - approx_width) / 2.0).max(MARGIN)
}

/// Prints contracts to `<stem>.pdf` (plus `<stem>.html`) through a [`Storage`].
#[derive(Debug, Clone)]
pub struct PdfPrinter<S: Storage> {
    storage: S,
}

impl<S: Storage> PdfPrinter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> DocumentPrinter for PdfPrinter<S> {
    async fn print(&self, contract: &ContractText, html: &str, file_stem: &str) -> Result<PathBuf> {
        let lines = layout(contract);
        let bytes = render_pdf(contract, &lines)?;

        self.storage
            .write_file(&format!("{}.html", file_stem), html.as_bytes())
            .await?;
        let path = self
            .storage
            .write_file(&format!("{}.pdf", file_stem), &bytes)
            .await?;

        tracing::info!("📄 PDF generated ({} bytes): {}", bytes.len(), path.display());
        Ok(path)
    }
}
