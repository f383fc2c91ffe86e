//! Video element lifecycle for the dome projection.
//!
//! The host renderer samples the `<video>` element into the dome texture;
//! this module only keeps the element loaded and playing. Autoplay rejection
//! falls back to a one-shot screen tap, mirroring mobile browser policy.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::{dom, overlay};

const LOAD_TIMEOUT_MS: i32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoState {
    Loading,
    Loaded,
    Playing,
    Error,
}

pub struct VideoPlayer {
    element: web::HtmlVideoElement,
    state: Rc<RefCell<VideoState>>,
}

impl VideoPlayer {
    /// Wire up the `#video-source` element, if the page has one.
    pub fn attach(document: &web::Document) -> Option<Self> {
        let element = document
            .get_element_by_id("video-source")?
            .dyn_into::<web::HtmlVideoElement>()
            .ok()?;
        let state = Rc::new(RefCell::new(VideoState::Loading));

        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move || {
                log::info!("[video] can play");
                let mut s = state.borrow_mut();
                if *s == VideoState::Loading {
                    *s = VideoState::Loaded;
                }
            }) as Box<dyn FnMut()>);
            _ = element
                .add_event_listener_with_callback("canplay", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move || {
                log::info!("[video] playing");
                *state.borrow_mut() = VideoState::Playing;
            }) as Box<dyn FnMut()>);
            _ = element
                .add_event_listener_with_callback("playing", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let state = state.clone();
            let el = element.clone();
            let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
                let message = el
                    .error()
                    .map(|e| e.message())
                    .unwrap_or_else(|| "unknown error".to_string());
                log::error!("[video] error: {message}");
                *state.borrow_mut() = VideoState::Error;
                overlay::show_status("Error loading video");
            }) as Box<dyn FnMut(_)>);
            _ = element.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        element.load();

        // Some devices never report canplay for streamed sources; proceed
        // after a grace period rather than stalling the session start.
        {
            let state = state.clone();
            let callback = Closure::once_into_js(move || {
                let mut s = state.borrow_mut();
                if *s == VideoState::Loading {
                    log::warn!("[video] load timeout, continuing anyway");
                    *s = VideoState::Loaded;
                }
            });
            if let Some(window) = web::window() {
                _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    LOAD_TIMEOUT_MS,
                );
            }
        }

        Some(Self { element, state })
    }

    pub fn state(&self) -> VideoState {
        *self.state.borrow()
    }

    pub fn play(&self) {
        if self.state() == VideoState::Playing {
            return;
        }
        log::info!("[video] starting playback");
        match self.element.play() {
            Ok(promise) => {
                let state = self.state.clone();
                let element = self.element.clone();
                spawn_local(async move {
                    if JsFuture::from(promise).await.is_ok() {
                        *state.borrow_mut() = VideoState::Playing;
                    } else {
                        log::warn!("[video] autoplay blocked, waiting for user tap");
                        overlay::show_status("Tap screen to start video");
                        retry_on_click(element, state);
                    }
                });
            }
            Err(e) => log::error!("[video] play failed: {e:?}"),
        }
    }

    pub fn pause(&self) {
        _ = self.element.pause();
        let mut s = self.state.borrow_mut();
        if *s == VideoState::Playing {
            *s = VideoState::Loaded;
        }
    }
}

/// Document click handler that retries playback after an autoplay rejection.
/// Retrying once playback has started is a harmless no-op, so the listener
/// simply stays attached.
fn retry_on_click(element: web::HtmlVideoElement, state: Rc<RefCell<VideoState>>) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        if *state.borrow() == VideoState::Playing {
            return;
        }
        if let Ok(promise) = element.play() {
            let state = state.clone();
            spawn_local(async move {
                if JsFuture::from(promise).await.is_ok() {
                    log::info!("[video] started after user interaction");
                    *state.borrow_mut() = VideoState::Playing;
                } else {
                    log::error!("[video] play failed after user interaction");
                }
            });
        }
    }) as Box<dyn FnMut()>);
    _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
