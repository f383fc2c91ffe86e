use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Toggle the `xr-active` class on the body so the page styling can follow
/// the session.
pub fn set_xr_active(active: bool) {
    if let Some(body) = window_document().and_then(|d| d.body()) {
        let classes = body.class_list();
        if active {
            _ = classes.add_1("xr-active");
        } else {
            _ = classes.remove_1("xr-active");
        }
    }
}
