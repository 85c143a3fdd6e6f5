//! Surface port - abstraction for the operator display
//!
//! The dashboard composes backend-neutral [`Panel`]s; a surface paints them.

use std::io;

use crate::dashboard::{Annotation, Panel};

/// Port for painting the dashboard
pub trait DisplaySurface {
    /// Blank the whole surface
    fn clear(&mut self) -> io::Result<()>;

    /// Paint a panel below whatever is currently shown
    fn paint(&mut self, panel: &Panel) -> io::Result<()>;

    /// Show a one-line annotation below the current content
    ///
    /// Annotations never clear the surface, so the last panel stays visible.
    fn annotate(&mut self, annotation: &Annotation) -> io::Result<()>;

    /// Clear and paint in one step (full redraw)
    fn redraw(&mut self, panel: &Panel) -> io::Result<()> {
        self.clear()?;
        self.paint(panel)
    }
}
