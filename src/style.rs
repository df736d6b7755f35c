use serde::Deserialize;

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Uniform margin on all four sides.
pub const MARGIN_MM: f32 = 25.0;

/// Width available to content between the side margins.
pub fn frame_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
}

/// Which configured font family a style uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Body,
    Mono,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub font_size: f32,
    /// Baseline-to-baseline distance
    pub leading: f32,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub family: Family,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub bullet_indent: f32,
    pub background: Option<String>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            leading: 12.0,
            color: "#000000".to_string(),
            bold: false,
            italic: false,
            family: Family::Body,
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            bullet_indent: 0.0,
            background: None,
        }
    }
}

/// Style names used by the flow mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Title,
    Heading2,
    Heading3,
    Body,
    Bullet,
    Code,
    TableHeader,
    TableCell,
}

impl StyleName {
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            StyleName::Title | StyleName::Heading2 | StyleName::Heading3
        )
    }
}

/// The style registry handed to the renderer alongside the flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleRegistry {
    pub title: ParagraphStyle,
    pub heading2: ParagraphStyle,
    pub heading3: ParagraphStyle,
    pub body: ParagraphStyle,
    pub bullet: ParagraphStyle,
    pub code: ParagraphStyle,
    pub table_header: ParagraphStyle,
    pub table_cell: ParagraphStyle,
}

impl StyleRegistry {
    pub fn get(&self, name: StyleName) -> &ParagraphStyle {
        match name {
            StyleName::Title => &self.title,
            StyleName::Heading2 => &self.heading2,
            StyleName::Heading3 => &self.heading3,
            StyleName::Body => &self.body,
            StyleName::Bullet => &self.bullet,
            StyleName::Code => &self.code,
            StyleName::TableHeader => &self.table_header,
            StyleName::TableCell => &self.table_cell,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let base = ParagraphStyle::default();
        Self {
            title: ParagraphStyle {
                font_size: 20.0,
                leading: 22.0,
                color: "#1a1a2e".to_string(),
                bold: true,
                alignment: Alignment::Center,
                space_after: 6.0,
                ..base.clone()
            },
            heading2: ParagraphStyle {
                font_size: 16.0,
                leading: 18.0,
                color: "#16213e".to_string(),
                bold: true,
                space_before: 8.0,
                space_after: 4.0,
                ..base.clone()
            },
            heading3: ParagraphStyle {
                font_size: 13.0,
                leading: 14.4,
                color: "#0f3460".to_string(),
                bold: true,
                italic: true,
                space_before: 5.0,
                space_after: 3.0,
                ..base.clone()
            },
            body: ParagraphStyle {
                leading: 14.0,
                space_after: 2.0,
                ..base.clone()
            },
            bullet: ParagraphStyle {
                leading: 14.0,
                left_indent: 10.0,
                bullet_indent: 5.0,
                space_after: 1.5,
                ..base.clone()
            },
            code: ParagraphStyle {
                font_size: 8.0,
                leading: 11.0,
                family: Family::Mono,
                left_indent: 5.0,
                background: Some("#f5f5f5".to_string()),
                space_before: 2.0,
                space_after: 3.0,
                ..base.clone()
            },
            table_header: ParagraphStyle {
                font_size: 9.0,
                color: "#ffffff".to_string(),
                ..base.clone()
            },
            table_cell: ParagraphStyle {
                font_size: 9.0,
                ..base
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub header_background: String,
    /// Alternating backgrounds for body rows, starting at the first row
    pub row_backgrounds: Vec<String>,
    pub grid_color: String,
    /// Points
    pub grid_width: f32,
    /// Points, all four sides
    pub padding: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: "#2c3e50".to_string(),
            row_backgrounds: vec!["#ffffff".to_string(), "#f8f9fa".to_string()],
            grid_color: "#bdc3c7".to_string(),
            grid_width: 0.5,
            padding: 4.0,
        }
    }
}
