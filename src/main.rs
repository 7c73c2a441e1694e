//! Reward Wheel entry point
//!
//! On the web: mounts the wheel into the reward page and drives it from
//! `requestAnimationFrame`. Natively: runs one headless spin on a fixed
//! timestep and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, MouseEvent, UrlSearchParams, Window};

    use reward_wheel::consts::FRAME_DT;
    use reward_wheel::host::{
        ASIDE_FEATURES, ASIDE_HEADING, ASIDE_PARAGRAPH, EmbeddedAdminAuthenticator, PAGE_HEADING,
        SECTION_HEADING, SECTION_PARAGRAPH,
    };
    use reward_wheel::renderer::svg::WHEEL_GROUP_ID;
    use reward_wheel::{AdminRequest, RewardPage, Widget, WidgetOptions};

    /// Widget plus frame timing
    struct App {
        widget: Widget,
        last_time: f64,
    }

    impl App {
        fn new(widget: Widget) -> Self {
            Self {
                widget,
                last_time: 0.0,
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                FRAME_DT
            };
            self.last_time = time;
            self.widget.tick(dt);
        }

        /// Push the current rotation, needle angle and button state to the DOM
        fn sync_dom(&self, document: &Document) {
            if let Some(group) = document.get_element_by_id(WHEEL_GROUP_ID) {
                let _ = group.set_attribute("transform", &self.widget.wheel_transform());
            }
            if let Some(needle) = document.get_element_by_id("needle") {
                let style = format!("transform: {}", self.widget.needle_transform());
                let _ = needle.set_attribute("style", &style);
            }
            if let Some(button) = document.get_element_by_id("spin-btn") {
                button.set_text_content(Some(self.widget.button_label()));
                if self.widget.is_spinning() {
                    let _ = button.set_attribute("disabled", "");
                } else {
                    let _ = button.remove_attribute("disabled");
                }
            }
        }
    }

    fn admin_request(window: &Window) -> AdminRequest {
        let location = window.location();
        let mut request = AdminRequest::new(location.pathname().unwrap_or_default());
        let search = location.search().unwrap_or_default();
        if let Ok(params) = UrlSearchParams::new_with_str(&search) {
            for key in ["shop", "host"] {
                if let Some(value) = params.get(key) {
                    request = request.with_param(key, value);
                }
            }
        }
        request
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        match document.get_element_by_id(id) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("Missing element #{}", id),
        }
    }

    fn render_page_copy(document: &Document) {
        set_text(document, "page-heading", PAGE_HEADING);
        set_text(document, "section-heading", SECTION_HEADING);
        set_text(document, "section-paragraph", SECTION_PARAGRAPH);
        set_text(document, "aside-heading", ASIDE_HEADING);
        set_text(document, "aside-paragraph", ASIDE_PARAGRAPH);
        let Some(list) = document.get_element_by_id("aside-features") else {
            log::warn!("Missing element #aside-features");
            return;
        };
        for feature in ASIDE_FEATURES {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(feature));
                let _ = list.append_child(&item);
            }
        }
    }

    /// Widget options, honoring the mount element's `data-options`
    fn widget_options(page: &mut RewardPage, document: &Document) -> WidgetOptions {
        match document
            .get_element_by_id("wheel-mount")
            .and_then(|el| el.get_attribute("data-options"))
        {
            Some(json) => page.widget_options_with(&json),
            None => page.widget_options(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Reward wheel starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let mut page = match RewardPage::load(&EmbeddedAdminAuthenticator, &admin_request(&window)) {
            Ok(page) => page,
            Err(e) => {
                log::error!("{}", e);
                set_text(&document, "page-heading", "403");
                return;
            }
        };
        render_page_copy(&document);

        let seed = js_sys::Date::now() as u64;
        let options = widget_options(&mut page, &document);
        let mut widget = match Widget::new(&options, seed) {
            Ok(widget) => widget,
            Err(e) => {
                log::error!("Cannot build wheel: {}", e);
                return;
            }
        };

        let page = Rc::new(RefCell::new(page));
        {
            let page = page.clone();
            let document = document.clone();
            widget.set_on_complete(move |index| {
                let mut page = page.borrow_mut();
                if let Some(message) = page.handle_spin_complete(index) {
                    set_text(&document, "reward-message", message);
                    if let Some(el) = document.get_element_by_id("reward-box") {
                        let _ = el.set_attribute("class", "");
                    }
                }
            });
        }

        match (document.get_element_by_id("wheel-mount"), widget.render_svg()) {
            (Some(mount), Ok(svg)) => mount.set_inner_html(&svg),
            (None, _) => log::warn!("Missing element #wheel-mount"),
            (_, Err(e)) => log::error!("SVG render failed: {}", e),
        }

        let app = Rc::new(RefCell::new(App::new(widget)));
        app.borrow().sync_dom(&document);
        setup_spin_button(&document, app.clone());
        request_animation_frame(app, document);

        log::info!("Reward wheel running!");
    }

    fn setup_spin_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("spin-btn") else {
            log::warn!("Missing element #spin-btn");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().widget.start_spin();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, document: Document) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, document, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, document: Document, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame(time);
            a.sync_dom(&document);
        }

        request_animation_frame(app, document);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use reward_wheel::consts::FRAME_DT;
    use reward_wheel::host::EmbeddedAdminAuthenticator;
    use reward_wheel::{AdminRequest, RewardPage, Widget};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Reward wheel (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    let request = AdminRequest::new("/app/roulette")
        .with_param("shop", "localhost")
        .with_param("host", "local");
    let page = match RewardPage::load(&EmbeddedAdminAuthenticator, &request) {
        Ok(page) => Rc::new(RefCell::new(page)),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let options = page.borrow().widget_options();
    let mut widget = match Widget::new(&options, seed) {
        Ok(widget) => widget,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    {
        let page = page.clone();
        widget.set_on_complete(move |index| {
            page.borrow_mut().handle_spin_complete(index);
        });
    }

    if !widget.start_spin() {
        return;
    }
    let mut frames = 0u32;
    while widget.tick(FRAME_DT).is_none() {
        frames += 1;
    }

    log::info!(
        "Settled after {} frames, wheel {}",
        frames + 1,
        widget.wheel_transform()
    );
    if let Some(message) = page.borrow().winning_result() {
        println!("{message}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
