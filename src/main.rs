//! Markup Pager CLI
//!
//! Paginates a markup file with monospace font metrics and prints the pages.
//! The main interface is through WASM bindings.

use clap::Parser;
use markup_pager::{FontMetrics, MeasuredSurface, Paginator, PaginatorConfig, Viewport};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Split a markup file into pages that fit a viewport
#[derive(Parser, Debug)]
#[command(name = "markup-pager", version, about)]
struct Args {
    /// Markup file to paginate
    file: PathBuf,

    /// Viewport size as WxH in logical pixels
    #[arg(long, value_parser = parse_viewport, default_value = "624x864")]
    viewport: Viewport,

    /// Advance of every character
    #[arg(long, default_value_t = 8.41)]
    char_width: f32,

    #[arg(long, default_value_t = 16.8)]
    line_height: f32,

    /// Characters the first page-break search jumps ahead by
    #[arg(long, default_value_t = markup_pager::pagination::DEFAULT_INITIAL_JUMP)]
    jump: usize,

    /// Print only this page (1-based)
    #[arg(long)]
    page: Option<usize>,

    /// Print page boundaries instead of page markup
    #[arg(long)]
    boundaries: bool,
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let width: f32 = width.trim().parse().map_err(|_| format!("invalid width {width:?}"))?;
    let height: f32 = height.trim().parse().map_err(|_| format!("invalid height {height:?}"))?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("viewport must be positive, got {s:?}"));
    }
    Ok(Viewport::new(width, height))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let markup = fs::read_to_string(&args.file)?;
    let surface = MeasuredSurface::new(
        args.viewport,
        FontMetrics::monospace(args.char_width, args.line_height),
    );
    let mut paginator =
        Paginator::from_markup(&markup, surface, PaginatorConfig::with_initial_jump(args.jump))?;

    if let Some(n) = args.page {
        let page = paginator
            .get_page(n)
            .ok_or_else(|| format!("page {n} is past the end ({} pages)", paginator.pages_number()))?;
        println!("{page}");
        return Ok(());
    }

    let total = paginator.paginate_all();
    if args.boundaries {
        for (n, window) in paginator.boundaries().windows(2).enumerate() {
            let flag = if paginator.is_page_overflowing(n + 1) { " (overflows)" } else { "" };
            println!("{}\t{}..{}{}", n + 1, window[0], window[1], flag);
        }
        return Ok(());
    }

    for n in 1..=total {
        if let Some(page) = paginator.get_page(n) {
            println!("--- page {n}/{total} ---");
            println!("{page}");
        }
    }
    Ok(())
}
