//! # Form List View
//!
//! Renders the loaded form descriptors as a two-column table.

use crate::app::models::FormDescriptor;
use std::io;

/// Renderer for the form list
pub struct FormListView;

impl FormListView {
    /// Render the forms into `out`
    pub fn render(forms: &[FormDescriptor], out: &mut impl io::Write) -> io::Result<()> {
        if forms.is_empty() {
            writeln!(out, "No forms available.")?;
            return Ok(());
        }

        writeln!(out, "{:>10}  {}", "PK", "TITLE")?;
        for form in forms {
            writeln!(out, "{:>10}  {}", form.id_display(), form.name_display())?;
        }
        Ok(())
    }
}
