//! A minimal WordprocessingML writer.
//!
//! The document is first assembled as a small block model ([`Document`]),
//! then serialized with quick-xml and packaged into a zip container with the
//! handful of parts Word needs to open it.

use std::io::{Cursor, Write};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    config::ExportConfig,
    export::ExportError,
    function::FunctionDescriptor,
    point::Point,
    table::ValueTable,
};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// English Metric Units per CSS pixel (96 dpi).
pub const EMU_PER_PIXEL: u64 = 9525;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const IMAGE_PART: &str = "word/media/graph.png";
const IMAGE_REL_ID: &str = "rId1";

/// Width of the label column in twentieths of a point.
const LABEL_COLUMN_DXA: u32 = 1500;
const VALUE_COLUMN_DXA: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points.
    pub size: Option<u32>,
    /// Hex RGB without `#`.
    pub color: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, hex: &str) -> Self {
        self.color = Some(hex.to_owned());
        self
    }

    fn has_properties(&self) -> bool {
        self.bold || self.italic || self.size.is_some() || self.color.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    /// Space after the paragraph in twentieths of a point.
    pub spacing_after: Option<u32>,
}

impl Paragraph {
    pub fn new(run: Run) -> Self {
        Self {
            runs: vec![run],
            alignment: Alignment::Left,
            spacing_after: None,
        }
    }

    pub fn spacer(after: u32) -> Self {
        Self {
            runs: Vec::new(),
            alignment: Alignment::Left,
            spacing_after: Some(after),
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn spacing_after(mut self, after: u32) -> Self {
        self.spacing_after = Some(after);
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub bold: bool,
    /// Preferred width in twentieths of a point.
    pub width: u32,
}

/// A full-width table of centered cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// The two-row value table: label column in bold, values plain.
    pub fn from_values(table: &ValueTable) -> Self {
        let row = |cells: Vec<&str>| -> Vec<TableCell> {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, text)| TableCell {
                    text: text.to_owned(),
                    bold: i == 0,
                    width: if i == 0 {
                        LABEL_COLUMN_DXA
                    } else {
                        VALUE_COLUMN_DXA
                    },
                })
                .collect()
        };
        Self {
            rows: vec![row(table.x_row().collect()), row(table.y_row().collect())],
        }
    }

    fn column_widths(&self) -> Vec<u32> {
        self.rows
            .first()
            .map(|r| r.iter().map(|c| c.width).collect())
            .unwrap_or_default()
    }
}

/// An inline picture referencing the embedded PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width_px: u32,
    pub height_px: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// A centered paragraph holding only the picture.
    Image(Image),
}

/// Body blocks plus the PNG they embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub image: Vec<u8>,
}

impl Document {
    /// Lay out the worksheet for one calculation around the rendered graph.
    pub fn worksheet(
        descriptor: &FunctionDescriptor,
        points: &[Point],
        config: &ExportConfig,
        png: Vec<u8>,
    ) -> Self {
        let values = ValueTable::new(descriptor, points, config.table_precision);
        let title = format!("Hàm số: {}", descriptor.title_formula());

        let blocks = vec![
            Block::Paragraph(
                Paragraph::new(Run::new(&config.heading).bold().size(32))
                    .centered()
                    .spacing_after(400),
            ),
            Block::Paragraph(
                Paragraph::new(Run::new(title).bold().size(28).color("B22222"))
                    .centered()
                    .spacing_after(200),
            ),
            Block::Paragraph(
                Paragraph::new(Run::new(&config.table_caption).bold()).spacing_after(100),
            ),
            Block::Table(Table::from_values(&values)),
            Block::Paragraph(Paragraph::spacer(300)),
            Block::Paragraph(
                Paragraph::new(Run::new(&config.graph_caption).bold()).spacing_after(100),
            ),
            Block::Image(Image {
                width_px: config.image_size,
                height_px: config.image_size,
                name: "graph.png".to_owned(),
            }),
            Block::Paragraph(Paragraph::spacer(300)),
            Block::Paragraph(
                Paragraph::new(Run::new(&config.footer).italic().size(20).color("666666"))
                    .centered(),
            ),
        ];

        Self {
            blocks,
            image: png,
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Serialize `word/document.xml`.
    pub fn to_xml(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut writer = Writer::new(Vec::new());
        let mut xml = XmlEmitter::new(&mut writer);
        xml.decl()?;
        xml.start(
            "w:document",
            &[
                ("xmlns:w", NS_W),
                ("xmlns:r", NS_R),
                ("xmlns:wp", NS_WP),
                ("xmlns:a", NS_A),
                ("xmlns:pic", NS_PIC),
            ],
        )?;
        xml.start("w:body", &[])?;
        let mut drawing_id = 1;
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => xml.paragraph(p)?,
                Block::Table(t) => xml.table(t)?,
                Block::Image(image) => {
                    xml.image(image, drawing_id)?;
                    drawing_id += 1;
                }
            }
        }
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(writer.into_inner())
    }

    /// Package the document and its picture as a `.docx` archive.
    pub fn to_docx(&self) -> Result<Vec<u8>, ExportError> {
        let parts: [(&str, Vec<u8>); 5] = [
            ("[Content_Types].xml", content_types()?),
            ("_rels/.rels", package_rels()?),
            ("word/_rels/document.xml.rels", document_rels()?),
            (DOCUMENT_PART, self.to_xml()?),
            (IMAGE_PART, self.image.clone()),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

fn content_types() -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    let mut xml = XmlEmitter::new(&mut writer);
    xml.decl()?;
    xml.start(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "png"), ("ContentType", "image/png")],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;
    xml.end("Types")?;
    Ok(writer.into_inner())
}

fn relationships(id: &str, kind: &str, target: &str) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    let mut xml = XmlEmitter::new(&mut writer);
    xml.decl()?;
    xml.start(
        "Relationships",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/relationships",
        )],
    )?;
    xml.empty(
        "Relationship",
        &[("Id", id), ("Type", kind), ("Target", target)],
    )?;
    xml.end("Relationships")?;
    Ok(writer.into_inner())
}

fn package_rels() -> Result<Vec<u8>, quick_xml::Error> {
    relationships("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART)
}

fn document_rels() -> Result<Vec<u8>, quick_xml::Error> {
    relationships(IMAGE_REL_ID, REL_IMAGE, "media/graph.png")
}

/// Element helpers over a quick-xml writer.
struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    fn decl(&mut self) -> Result<(), quick_xml::Error> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), quick_xml::Error> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<(), quick_xml::Error> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), quick_xml::Error> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start))
    }

    /// `<name w:val="value"/>`
    fn val(&mut self, name: &str, value: &str) -> Result<(), quick_xml::Error> {
        self.empty(name, &[("w:val", value)])
    }

    fn paragraph(&mut self, p: &Paragraph) -> Result<(), quick_xml::Error> {
        self.start("w:p", &[])?;
        if p.alignment != Alignment::Left || p.spacing_after.is_some() {
            self.start("w:pPr", &[])?;
            if let Some(after) = p.spacing_after {
                self.empty("w:spacing", &[("w:after", &after.to_string())])?;
            }
            if p.alignment == Alignment::Center {
                self.val("w:jc", "center")?;
            }
            self.end("w:pPr")?;
        }
        for run in &p.runs {
            self.run(run)?;
        }
        self.end("w:p")
    }

    fn run(&mut self, run: &Run) -> Result<(), quick_xml::Error> {
        self.start("w:r", &[])?;
        if run.has_properties() {
            self.start("w:rPr", &[])?;
            if run.bold {
                self.empty("w:b", &[])?;
            }
            if run.italic {
                self.empty("w:i", &[])?;
            }
            if let Some(color) = &run.color {
                self.val("w:color", color)?;
            }
            if let Some(size) = run.size {
                let size = size.to_string();
                self.val("w:sz", &size)?;
                self.val("w:szCs", &size)?;
            }
            self.end("w:rPr")?;
        }
        self.start("w:t", &[("xml:space", "preserve")])?;
        self.writer
            .write_event(Event::Text(BytesText::new(&run.text)))?;
        self.end("w:t")?;
        self.end("w:r")
    }

    fn table(&mut self, table: &Table) -> Result<(), quick_xml::Error> {
        self.start("w:tbl", &[])?;
        self.start("w:tblPr", &[])?;
        self.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
        self.start("w:tblBorders", &[])?;
        for side in [
            "w:top",
            "w:left",
            "w:bottom",
            "w:right",
            "w:insideH",
            "w:insideV",
        ] {
            self.empty(
                side,
                &[
                    ("w:val", "single"),
                    ("w:sz", "4"),
                    ("w:space", "0"),
                    ("w:color", "auto"),
                ],
            )?;
        }
        self.end("w:tblBorders")?;
        self.end("w:tblPr")?;

        self.start("w:tblGrid", &[])?;
        for width in table.column_widths() {
            self.empty("w:gridCol", &[("w:w", &width.to_string())])?;
        }
        self.end("w:tblGrid")?;

        for row in &table.rows {
            self.start("w:tr", &[])?;
            for cell in row {
                self.start("w:tc", &[])?;
                self.start("w:tcPr", &[])?;
                self.empty(
                    "w:tcW",
                    &[("w:w", &cell.width.to_string()), ("w:type", "dxa")],
                )?;
                self.end("w:tcPr")?;
                let run = Run {
                    bold: cell.bold,
                    ..Run::new(&cell.text)
                };
                self.paragraph(&Paragraph::new(run).centered())?;
                self.end("w:tc")?;
            }
            self.end("w:tr")?;
        }
        self.end("w:tbl")
    }

    fn image(&mut self, image: &Image, id: u32) -> Result<(), quick_xml::Error> {
        let cx = (u64::from(image.width_px) * EMU_PER_PIXEL).to_string();
        let cy = (u64::from(image.height_px) * EMU_PER_PIXEL).to_string();
        let id = id.to_string();

        self.start("w:p", &[])?;
        self.start("w:pPr", &[])?;
        self.val("w:jc", "center")?;
        self.end("w:pPr")?;
        self.start("w:r", &[])?;
        self.start("w:drawing", &[])?;
        self.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        self.empty("wp:extent", &[("cx", &cx), ("cy", &cy)])?;
        self.empty("wp:docPr", &[("id", &id), ("name", &image.name)])?;
        self.start("a:graphic", &[])?;
        self.start("a:graphicData", &[("uri", NS_PIC)])?;
        self.start("pic:pic", &[])?;

        self.start("pic:nvPicPr", &[])?;
        self.empty("pic:cNvPr", &[("id", "0"), ("name", &image.name)])?;
        self.empty("pic:cNvPicPr", &[])?;
        self.end("pic:nvPicPr")?;

        self.start("pic:blipFill", &[])?;
        self.empty("a:blip", &[("r:embed", IMAGE_REL_ID)])?;
        self.start("a:stretch", &[])?;
        self.empty("a:fillRect", &[])?;
        self.end("a:stretch")?;
        self.end("pic:blipFill")?;

        self.start("pic:spPr", &[])?;
        self.start("a:xfrm", &[])?;
        self.empty("a:off", &[("x", "0"), ("y", "0")])?;
        self.empty("a:ext", &[("cx", &cx), ("cy", &cy)])?;
        self.end("a:xfrm")?;
        self.start("a:prstGeom", &[("prst", "rect")])?;
        self.empty("a:avLst", &[])?;
        self.end("a:prstGeom")?;
        self.end("pic:spPr")?;

        self.end("pic:pic")?;
        self.end("a:graphicData")?;
        self.end("a:graphic")?;
        self.end("wp:inline")?;
        self.end("w:drawing")?;
        self.end("w:r")?;
        self.end("w:p")
    }
}
