//! Page geometry.

use serde::{Deserialize, Serialize};

use crate::error::AssemblyError;

/// Fixed page geometry in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub page_width: f32,
    pub page_height: f32,
    /// Margin applied on all four sides.
    pub margin: f32,
    pub font_size: f32,
    /// Vertical distance between baselines.
    pub line_height: f32,
    /// Lines longer than this many characters are soft-wrapped.
    pub wrap_columns: usize,
}

impl Default for LayoutMetrics {
    /// US Letter, 50pt margins, 12pt text on 16pt lines.
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            font_size: 12.0,
            line_height: 16.0,
            wrap_columns: 90,
        }
    }
}

impl LayoutMetrics {
    /// Height available for text between top and bottom margins.
    pub fn printable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Number of text lines that fit on one page.
    pub fn lines_per_page(&self) -> usize {
        if self.line_height <= 0.0 || self.printable_height() < self.line_height {
            return 1;
        }
        (self.printable_height() / self.line_height).floor() as usize
    }

    /// Lines the title takes on the first page, including the gap after it.
    pub fn title_lines(&self) -> usize {
        2
    }

    /// Reject geometry that cannot hold a title and at least one text line.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(AssemblyError::InvalidLayout(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if self.font_size <= 0.0 || self.line_height <= 0.0 {
            return Err(AssemblyError::InvalidLayout(
                "font size and line height must be positive".to_string(),
            ));
        }
        if self.wrap_columns == 0 {
            return Err(AssemblyError::InvalidLayout(
                "wrap columns must be at least 1".to_string(),
            ));
        }
        if 2.0 * self.margin >= self.page_width {
            return Err(AssemblyError::InvalidLayout(
                "margins leave no horizontal space".to_string(),
            ));
        }
        let needed = (self.title_lines() + 1) as f32 * self.line_height;
        if self.printable_height() < needed {
            return Err(AssemblyError::InvalidLayout(format!(
                "printable height {} is below {} needed for a title and one line",
                self.printable_height(),
                needed
            )));
        }
        Ok(())
    }
}
