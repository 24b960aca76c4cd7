//! The render surface every candidate page is measured on

use crate::fragment::Fragment;

/// Something that can show a fragment and tell whether it fits
///
/// `render` replaces whatever was shown before. Measuring may be expensive
/// (a full layout pass), so the paginator calls `overflows` as rarely as it
/// can.
pub trait RenderSurface {
    /// Materialize `fragment` on the surface
    fn render(&mut self, fragment: &Fragment);

    /// Whether the rendered content exceeds the viewport
    fn overflows(&self) -> bool;

    /// Markup of the rendered content as the surface holds it
    ///
    /// Surfaces that normalize what they are given (a DOM container does)
    /// return their own serialization here. `None` means the fragment is
    /// shown exactly as serialized.
    fn rendered_markup(&self) -> Option<String> {
        None
    }

    /// Identifies the geometry pages are measured against
    ///
    /// Cached boundaries are only reused by a surface with the same tag.
    fn cache_tag(&self) -> Option<String> {
        None
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn render(&mut self, fragment: &Fragment) {
        (**self).render(fragment)
    }

    fn overflows(&self) -> bool {
        (**self).overflows()
    }

    fn rendered_markup(&self) -> Option<String> {
        (**self).rendered_markup()
    }

    fn cache_tag(&self) -> Option<String> {
        (**self).cache_tag()
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn render(&mut self, fragment: &Fragment) {
        (**self).render(fragment)
    }

    fn overflows(&self) -> bool {
        (**self).overflows()
    }

    fn rendered_markup(&self) -> Option<String> {
        (**self).rendered_markup()
    }

    fn cache_tag(&self) -> Option<String> {
        (**self).cache_tag()
    }
}
