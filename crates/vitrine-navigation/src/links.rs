//! Header links and in-app link following.

use std::{cell::RefCell, rc::Rc};

use vitrine_core::*;
use vitrine_ui::{Link, Text, ViewExt};

use crate::{NavKey, Navigator};

/// Whether the header link `href` is the current page.
///
/// The locale home (`/{locale}`) is active only on the home page itself;
/// every other link is active for its whole subtree.
pub fn is_active(pathname: &str, href: &str, locale: &str) -> bool {
    let home = format!("/{locale}");
    if href == home {
        return pathname == home || pathname.strip_prefix(&home) == Some("/");
    }
    pathname.starts_with(href)
}

/// A navigation link; the active one carries `is-active` and
/// `aria-current="page"`.
pub fn NavLink(href: &str, label: impl Into<String>, active: bool, modifier: Modifier) -> View {
    let mut m = modifier.class("nav-link").class_if(active, "is-active");
    if active {
        m = m.attr("aria-current", "page");
    }
    Link(href, m).child(Text(label))
}

type Handler = Rc<dyn Fn(&str) -> bool>;

thread_local! {
    static LINK_HANDLER: RefCell<Option<Handler>> = const { RefCell::new(None) };
}

/// Offers `href` to the installed link handler. Returns `true` when the app
/// navigated; otherwise the runner should treat it as an external link.
pub fn follow(href: &str) -> bool {
    let handler = LINK_HANDLER.with(|h| h.borrow().clone());
    match handler {
        Some(handler) => handler(href),
        None => {
            log::debug!("no link handler installed for {href}");
            false
        }
    }
}

/// Routes followed links into `nav`: `resolve` maps an href to a key; a link
/// to the current page does nothing.
pub fn InstallLinkHandler<K: NavKey + PartialEq>(
    nav: Navigator<K>,
    resolve: impl Fn(&str) -> Option<K> + 'static,
) -> Dispose {
    let handler: Handler = Rc::new(move |href| match resolve(href) {
        Some(key) => {
            if nav.stack.top_key().as_ref() != Some(&key) {
                log::debug!("navigating to {key:?}");
                nav.push(key);
            }
            true
        }
        None => false,
    });
    LINK_HANDLER.with(|h| *h.borrow_mut() = Some(handler));
    on_unmount(|| {
        let _ = LINK_HANDLER.try_with(|h| *h.borrow_mut() = None);
    })
}
