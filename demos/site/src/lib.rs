#![allow(non_snake_case)]
//! Yusif Ayman's portfolio: a bilingual (English / Arabic) site with a hero,
//! skills, rotating testimonials, experience and education timelines, and a
//! blog.
//!
//! The same root composes in the browser (`wasm32`, see `web`) and in the
//! headless runner used by the static export binary.

pub mod app;
pub mod content;
pub mod header;
pub mod routes;
pub mod ui;

pub mod sections {
    mod education;
    mod experience;
    mod hero;
    mod skills;
    mod testimonials;

    pub use education::Education;
    pub use experience::Experience;
    pub use hero::Hero;
    pub use skills::Skills;
    pub use testimonials::{ROTATION, Testimonials};
}

pub mod pages {
    pub mod blog;
    pub mod blog_post;
    pub mod contact;
    pub mod home;
    pub mod not_found;
    pub mod projects;
    pub mod services;
}

#[cfg(target_arch = "wasm32")]
mod web;

pub use app::{app, render_document};
pub use routes::{Page, Route};

use vitrine_i18n::{Catalog, Locale, MessagesError};

/// Message bundles of every locale, English as the fallback.
pub fn catalog() -> Result<Catalog, MessagesError> {
    let mut catalog = Catalog::new(Locale::En);
    catalog.insert_json(Locale::En, include_str!("../messages/en.json"))?;
    catalog.insert_json(Locale::Ar, include_str!("../messages/ar.json"))?;
    Ok(catalog)
}

/// Pages written by the static export: every route in every locale, one
/// page per blog post.
pub fn export_pages() -> Vec<Page> {
    let mut routes = vec![
        Route::Home,
        Route::Projects,
        Route::Blog,
        Route::Services,
        Route::Contact,
        Route::NotFound,
    ];
    routes.extend(content::POSTS.iter().map(|p| Route::BlogPost(p.slug.to_string())));

    Locale::ALL
        .into_iter()
        .flat_map(|locale| routes.iter().map(move |r| Page::new(locale, r.clone())))
        .collect()
}

#[cfg(test)]
mod tests;
