//! Static export: every page in every locale as an HTML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use vitrine_i18n::Locale;
use vitrine_platform::HeadlessOptions;
use vitrine_site::{Page, catalog, export_pages, render_document};

/// Output directory; `dist` when unset.
const OUT_DIR_VAR: &str = "VITRINE_OUT_DIR";

fn write(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let out = std::env::var_os(OUT_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let catalog = Rc::new(catalog().context("loading message bundles")?);
    let options = HeadlessOptions::from_env();

    let pages = export_pages();
    for page in &pages {
        let html = render_document(page, catalog.clone(), options.clone());
        write(&out.join(page.file_path()), &html)?;
    }
    // The bare domain serves the default locale.
    let home = render_document(&Page::home(Locale::default()), catalog, options);
    write(&out.join("index.html"), &home)?;

    log::info!("exported {} pages to {}", pages.len() + 1, out.display());
    Ok(())
}
