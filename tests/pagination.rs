//! End-to-end pagination with the measured surface

use markup_pager::{
    BoundaryCache, Document, FontMetrics, Fragment, MeasuredSurface, MemoryCache, Paginator,
    PaginatorConfig, RenderSurface, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

/// 20 chars per line, 5 lines per page
fn surface() -> MeasuredSurface {
    MeasuredSurface::new(Viewport::new(200.0, 100.0), FontMetrics::monospace(10.0, 20.0))
}

fn book(paragraphs: usize) -> String {
    let mut markup = String::from("<h1 id=\"title\">A Short Book</h1>");
    for i in 0..paragraphs {
        markup.push_str(&format!(
            "<p id=\"p{i}\">Paragraph {i} has a <em>handful</em> of plain words in it.</p>"
        ));
    }
    markup
}

fn paginator(markup: &str, jump: usize) -> Paginator<MeasuredSurface> {
    Paginator::from_markup(markup, surface(), PaginatorConfig::with_initial_jump(jump)).unwrap()
}

fn fits(document: &Document, paginator: &Paginator<MeasuredSurface>, from: usize, to: usize) -> bool {
    let mut s = surface();
    s.render(&Fragment::extract(document, paginator.index(), from..to));
    !s.overflows()
}

#[test]
fn test_every_page_fits_and_content_is_preserved() {
    let markup = book(40);
    let mut p = paginator(&markup, 100);
    let total = p.paginate_all();
    assert!(total > 10);

    let document = Document::parse(&markup).unwrap();
    let mut text = String::new();
    for n in 1..=total {
        let range = p.page_range(n).unwrap();
        assert!(!p.is_page_overflowing(n));
        assert!(fits(&document, &p, range.start, range.end), "page {n} overflows");
        text.push_str(&Fragment::extract(&document, p.index(), range).text_content());
    }
    assert_eq!(text, document.text_content());
}

#[test]
fn test_pages_are_as_long_as_they_can_be() {
    let markup = book(12);
    let mut p = paginator(&markup, 30);
    let total = p.paginate_all();
    let document = Document::parse(&markup).unwrap();

    for n in 1..total {
        let range = p.page_range(n).unwrap();
        let next = p.index().next_boundary(&document, range.end + 1);
        assert!(
            !fits(&document, &p, range.start, next),
            "page {n} could have reached {next}"
        );
    }
}

#[test]
fn test_rendered_page_matches_surface_markup() {
    let mut p = paginator(&book(5), 50);
    let page = p.get_page(2).unwrap();
    assert_eq!(p.surface().markup(), page);
    assert!(!p.surface().overflows());
}

#[test]
fn test_jump_tracks_page_width() {
    let mut p = paginator(&book(20), 1000);
    p.get_page(1);
    let first = p.page_range(1).unwrap();
    assert_eq!(p.jump(), first.len());

    p.get_page(2);
    assert_eq!(p.jump(), p.page_range(2).unwrap().len());
}

#[test]
fn test_navigation_by_id() {
    let mut p = paginator(&book(20), 100);
    assert_eq!(p.page_for_id("title"), Some(1));

    let page = p.page_for_id("p15").unwrap();
    let pos = p.position_of_id("p15").unwrap();
    assert!(p.page_range(page).unwrap().contains(&pos));
    assert!(p.get_page(page).is_some());
    assert_eq!(p.page_for_offset(pos), Some(page));
}

#[test]
fn test_oversized_word_gets_its_own_page() {
    let markup = format!("<p>{} tail</p>", "x".repeat(100));
    let mut p = Paginator::from_markup(
        &markup,
        MeasuredSurface::new(Viewport::new(100.0, 40.0), FontMetrics::monospace(10.0, 20.0)),
        PaginatorConfig::with_initial_jump(10),
    )
    .unwrap();

    assert_eq!(p.page_range(1), Some(0..100));
    assert!(p.is_page_overflowing(1));
    assert_eq!(p.get_page(2).as_deref(), Some(" tail"));
    assert!(!p.is_page_overflowing(2));
    assert_eq!(p.paginate_all(), 2);
}

#[derive(Clone, Default)]
struct SharedCache(Rc<RefCell<MemoryCache>>);

impl BoundaryCache for SharedCache {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value)
    }
}

#[test]
fn test_second_session_starts_from_cache() {
    let markup = book(10);
    let cache = SharedCache::default();

    let mut first = Paginator::with_cache(
        Document::parse(&markup).unwrap(),
        surface(),
        PaginatorConfig::default(),
        Box::new(cache.clone()),
    )
    .unwrap();
    first.get_page(3);
    let known = first.boundaries().to_vec();
    assert_eq!(cache.0.borrow().len(), 1);
    assert!(cache.get(first.cache_key()).is_some());

    let mut second = Paginator::with_cache(
        Document::parse(&markup).unwrap(),
        surface(),
        PaginatorConfig::default(),
        Box::new(cache.clone()),
    )
    .unwrap();
    assert_eq!(second.boundaries(), known.as_slice());

    second.get_page(3);
    assert_eq!(second.surface().render_count(), 1);

    // Different content never picks up those boundaries
    let other = Paginator::with_cache(
        Document::parse(&book(11)).unwrap(),
        surface(),
        PaginatorConfig::default(),
        Box::new(cache),
    )
    .unwrap();
    assert_eq!(other.boundaries(), &[0]);
}

#[test]
fn test_cached_boundaries_follow_viewport() {
    let markup = book(4);
    let cache = SharedCache::default();
    let large = || MeasuredSurface::new(Viewport::new(4000.0, 4000.0), FontMetrics::monospace(10.0, 20.0));

    let mut first = Paginator::with_cache(
        Document::parse(&markup).unwrap(),
        large(),
        PaginatorConfig::default(),
        Box::new(cache.clone()),
    )
    .unwrap();
    assert_eq!(first.paginate_all(), 1);

    // Same markup, smaller window in a later session
    let mut second = Paginator::with_cache(
        Document::parse(&markup).unwrap(),
        surface(),
        PaginatorConfig::default(),
        Box::new(cache.clone()),
    )
    .unwrap();
    assert_eq!(second.boundaries(), &[0]);
    let total = second.paginate_all();
    assert!(total > 1);
    for n in 1..=total {
        second.get_page(n);
        assert!(!second.surface().overflows(), "page {n} overflows");
    }

    // Going back to the large window reuses its own entry
    let again = Paginator::with_cache(
        Document::parse(&markup).unwrap(),
        large(),
        PaginatorConfig::default(),
        Box::new(cache.clone()),
    )
    .unwrap();
    assert_eq!(again.boundaries(), first.boundaries());
    assert!(again.is_exhausted());
}
