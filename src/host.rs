//! Reward page shell
//!
//! The page hosting the wheel: it only exists for an authenticated admin,
//! hands its own segment list to the widget, and turns the winning index
//! into a reward message.

use thiserror::Error;

use crate::settings::WidgetOptions;
use crate::wheel::{Segment, WheelError};

/// Page heading
pub const PAGE_HEADING: &str = "インタラクティブ報酬ルーレット";
/// Main section
pub const SECTION_HEADING: &str = "新規ユーザー報酬";
pub const SECTION_PARAGRAPH: &str = "まわしてクーポンを決めよう！";
/// Aside
pub const ASIDE_HEADING: &str = "ルーレットについて";
pub const ASIDE_PARAGRAPH: &str = "このルーレットはRustとWebAssemblyで実装されています。";
pub const ASIDE_FEATURES: [&str; 3] = [
    "スムーズな回転アニメーション",
    "針が境界の点に当たると揺れるエフェクト",
    "リアルな減速効果",
];

/// Errors surfaced by the page shell
#[derive(Error, Debug)]
pub enum HostError {
    #[error("admin authentication failed: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Wheel(#[from] WheelError),
}

/// The parts of an incoming admin request the shell looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminRequest {
    pub path: String,
    /// Query parameters in order of appearance
    pub params: Vec<(String, String)>,
}

impl AdminRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// First value of a query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An authenticated admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub shop: String,
}

/// Admin authentication. The page never renders without a session.
pub trait AdminAuthenticator {
    fn authenticate_admin(&self, request: &AdminRequest) -> Result<AdminSession, HostError>;
}

impl<F> AdminAuthenticator for F
where
    F: Fn(&AdminRequest) -> Result<AdminSession, HostError>,
{
    fn authenticate_admin(&self, request: &AdminRequest) -> Result<AdminSession, HostError> {
        self(request)
    }
}

/// Accepts requests made from inside the admin frame, which always carry
/// the `shop` and `host` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAdminAuthenticator;

impl AdminAuthenticator for EmbeddedAdminAuthenticator {
    fn authenticate_admin(&self, request: &AdminRequest) -> Result<AdminSession, HostError> {
        let shop = request
            .param("shop")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| HostError::Unauthorized("missing shop parameter".to_string()))?;
        if request.param("host").is_none_or(str::is_empty) {
            return Err(HostError::Unauthorized(
                "missing host parameter".to_string(),
            ));
        }
        Ok(AdminSession {
            shop: shop.to_string(),
        })
    }
}

/// Segments offered on the reward page
pub fn page_segments() -> Vec<Segment> {
    [
        ("7000", "#FFE4D6"),
        ("7000", "#FFD6CC"),
        ("9500", "#FFE4D6"),
        ("9700", "#FFD6CC"),
        ("9800", "#FFE4D6"),
        ("7000", "#FFD6CC"),
    ]
    .into_iter()
    .map(|(label, color)| Segment::new(label, color))
    .collect()
}

/// Reward page state
#[derive(Debug, Clone)]
pub struct RewardPage {
    session: AdminSession,
    segments: Vec<Segment>,
    winning_result: Option<String>,
}

impl RewardPage {
    /// Authenticate, then build the page with its standard segments
    pub fn load<A: AdminAuthenticator + ?Sized>(
        authenticator: &A,
        request: &AdminRequest,
    ) -> Result<Self, HostError> {
        Self::load_with_segments(authenticator, request, page_segments())
    }

    pub fn load_with_segments<A: AdminAuthenticator + ?Sized>(
        authenticator: &A,
        request: &AdminRequest,
        segments: Vec<Segment>,
    ) -> Result<Self, HostError> {
        let session = authenticator.authenticate_admin(request)?;
        if segments.is_empty() {
            return Err(WheelError::NoSegments.into());
        }
        log::info!("Reward page loaded for {}", session.shop);
        Ok(Self {
            session,
            segments,
            winning_result: None,
        })
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Options for the embedded widget
    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions::with_segments(self.segments.clone())
    }

    /// Widget options overridden by the mount element's JSON. A custom
    /// segment list replaces the page's own, so the winning index always
    /// maps back into the list the wheel spun.
    pub fn widget_options_with(&mut self, json: &str) -> WidgetOptions {
        let mut options = match WidgetOptions::from_json(json) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("Ignoring widget options: {}", e);
                return self.widget_options();
            }
        };
        match options.segments.take() {
            Some(segments) if !segments.is_empty() => self.segments = segments,
            Some(_) => log::warn!("Ignoring empty segment list in widget options"),
            None => {}
        }
        options.segments = Some(self.segments.clone());
        options
    }

    /// Message shown for a won segment
    pub fn reward_message(label: &str) -> String {
        format!("おめでとうございます！{label}ポイント獲得！")
    }

    /// Completion callback target: map the index back into this page's
    /// segments and produce the reward message.
    pub fn handle_spin_complete(&mut self, winning_index: usize) -> Option<&str> {
        match self.segments.get(winning_index) {
            Some(segment) => {
                self.winning_result = Some(Self::reward_message(&segment.label));
            }
            None => {
                log::warn!(
                    "Winning index {} out of range ({} segments)",
                    winning_index,
                    self.segments.len()
                );
                self.winning_result = None;
            }
        }
        self.winning_result.as_deref()
    }

    /// Message from the latest spin
    pub fn winning_result(&self) -> Option<&str> {
        self.winning_result.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Widget;
    use crate::consts::FRAME_DT;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn embedded_request() -> AdminRequest {
        AdminRequest::new("/app/roulette")
            .with_param("shop", "example.myshopify.com")
            .with_param("host", "YWRtaW4")
    }

    #[test]
    fn test_embedded_auth() {
        let session = EmbeddedAdminAuthenticator
            .authenticate_admin(&embedded_request())
            .unwrap();
        assert_eq!(session.shop, "example.myshopify.com");

        let no_host = AdminRequest::new("/app/roulette").with_param("shop", "a");
        assert!(matches!(
            EmbeddedAdminAuthenticator.authenticate_admin(&no_host),
            Err(HostError::Unauthorized(_))
        ));
        assert!(EmbeddedAdminAuthenticator
            .authenticate_admin(&AdminRequest::new("/app/roulette"))
            .is_err());
    }

    #[test]
    fn test_page_requires_auth() {
        let deny = |_: &AdminRequest| -> Result<AdminSession, HostError> {
            Err(HostError::Unauthorized("nope".to_string()))
        };
        assert!(RewardPage::load(&deny, &embedded_request()).is_err());
    }

    #[test]
    fn test_reward_message_for_index() {
        let mut page = RewardPage::load(&EmbeddedAdminAuthenticator, &embedded_request()).unwrap();
        assert_eq!(page.segments().len(), 6);
        assert_eq!(page.winning_result(), None);

        assert_eq!(
            page.handle_spin_complete(4),
            Some("おめでとうございます！9800ポイント獲得！")
        );
        assert_eq!(page.handle_spin_complete(6), None);
        assert_eq!(page.winning_result(), None);
    }

    #[test]
    fn test_empty_segments_rejected() {
        let result =
            RewardPage::load_with_segments(&EmbeddedAdminAuthenticator, &embedded_request(), Vec::new());
        assert!(matches!(result, Err(HostError::Wheel(WheelError::NoSegments))));
    }

    #[test]
    fn test_widget_reports_to_page() {
        let page = Rc::new(RefCell::new(
            RewardPage::load(&EmbeddedAdminAuthenticator, &embedded_request()).unwrap(),
        ));
        let mut opts = page.borrow().widget_options();
        opts.seed = Some(77);
        let mut widget = Widget::new(&opts, 0).unwrap();
        assert_eq!(widget.wheel().config().len(), 6);

        let sink = page.clone();
        widget.set_on_complete(move |i| {
            sink.borrow_mut().handle_spin_complete(i);
        });

        widget.start_spin();
        let mut winner = None;
        while winner.is_none() {
            winner = widget.tick(FRAME_DT);
        }

        let label = page.borrow().segments()[winner.unwrap()].label.clone();
        assert_eq!(
            page.borrow().winning_result(),
            Some(RewardPage::reward_message(&label).as_str())
        );
    }

    const LETTERS_JSON: &str = r##"{"segments":[
        {"label":"A","color":"#111"},{"label":"B","color":"#222"},
        {"label":"C","color":"#333"},{"label":"D","color":"#444"},
        {"label":"E","color":"#555"},{"label":"F","color":"#666"},
        {"label":"G","color":"#777"},{"label":"H","color":"#888"}]}"##;

    #[test]
    fn test_custom_segments_reward_landed_segment() {
        for seed in 0..20 {
            let mut page =
                RewardPage::load(&EmbeddedAdminAuthenticator, &embedded_request()).unwrap();
            let mut opts = page.widget_options_with(LETTERS_JSON);
            assert_eq!(page.segments().len(), 8);
            opts.seed = Some(seed);

            let page = Rc::new(RefCell::new(page));
            let mut widget = Widget::new(&opts, 0).unwrap();
            let sink = page.clone();
            widget.set_on_complete(move |i| {
                sink.borrow_mut().handle_spin_complete(i);
            });

            widget.start_spin();
            while widget.tick(FRAME_DT).is_none() {}

            let wheel = widget.wheel();
            let landed = &wheel.segments()[wheel.segment_under_needle()].label;
            assert_eq!(
                page.borrow().winning_result(),
                Some(RewardPage::reward_message(landed).as_str()),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_widget_options_fall_back_to_page_segments() {
        let mut page = RewardPage::load(&EmbeddedAdminAuthenticator, &embedded_request()).unwrap();

        let opts = page.widget_options_with(r#"{"seed":5}"#);
        assert_eq!(opts.seed, Some(5));
        assert_eq!(opts.segments.as_deref(), Some(page_segments().as_slice()));

        let opts = page.widget_options_with(r#"{"segments":[]}"#);
        assert_eq!(opts.segments.map(|s| s.len()), Some(6));

        let opts = page.widget_options_with("{not json");
        assert_eq!(opts, page.widget_options());
        assert_eq!(page.segments(), page_segments().as_slice());
    }
}
