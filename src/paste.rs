//! Paste controller: clipboard text in, structured URL out.
//!
//! The controller is a two-state machine:
//!
//! ```text
//! Idle --begin--> Busy --settle--> Busy --release (after settle delay)--> Idle
//! ```
//!
//! `begin` hands out a [`PasteTicket`] only when idle, so at most one paste
//! is ever in flight. `settle` consumes the ticket and always leaves a
//! well-formed URL behind: the pasted one, or the fallback. `release` is
//! meant to run once the settle delay has elapsed; [`run_paste`] drives the
//! whole sequence over a [`ClipboardSource`] and a [`Delay`].

use std::cell::RefCell;
use std::time::Duration;

use tracing::{debug, warn};

use crate::clipboard::{ClipboardSource, Delay};
use crate::config::PreviewConfig;
use crate::decode::decode_uri;
use crate::error::{ClipboardError, ParseError, PasteError};
use crate::structured_url::StructuredUrl;

/// Busy/idle state of the paste trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    #[default]
    Idle,
    Busy,
}

impl Affordance {
    pub fn is_busy(self) -> bool {
        self == Affordance::Busy
    }

    pub fn opacity(self) -> f32 {
        match self {
            Affordance::Idle => 1.0,
            Affordance::Busy => 0.8,
        }
    }

    pub fn cursor(self) -> &'static str {
        match self {
            Affordance::Idle => "pointer",
            Affordance::Busy => "progress",
        }
    }

    /// Inline CSS for the trigger element.
    pub fn style(self) -> String {
        format!("opacity: {}; cursor: {};", self.opacity(), self.cursor())
    }
}

/// How a settled paste ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The clipboard held a URL and it is now shown.
    Accepted,
    /// The fallback URL is shown instead.
    Fallback(PasteError),
}

/// Proof that a paste is in flight. Obtained from [`PasteController::begin`].
#[derive(Debug)]
#[must_use = "a paste ticket must be settled or the controller stays busy"]
pub struct PasteTicket {
    generation: u64,
}

/// Re-enable the trigger once `delay` has passed.
#[derive(Debug)]
#[must_use = "a pending release must be released or the controller stays busy"]
pub struct PendingRelease {
    generation: u64,
    delay: Duration,
}

impl PendingRelease {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Result of [`PasteController::settle`].
#[derive(Debug)]
pub struct Settled {
    pub outcome: PasteOutcome,
    pub release: PendingRelease,
}

/// What the preview and the trigger need to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteView {
    pub url: StructuredUrl,
    pub affordance: Affordance,
}

/// Owner of the current URL and the paste affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteController {
    url: StructuredUrl,
    fallback: StructuredUrl,
    affordance: Affordance,
    settle_delay: Duration,
    generation: u64,
}

impl Default for PasteController {
    fn default() -> Self {
        Self::new(&PreviewConfig::default())
    }
}

impl PasteController {
    /// Start idle, showing the configured fallback URL.
    pub fn new(config: &PreviewConfig) -> Self {
        Self {
            url: config.fallback_url.clone(),
            fallback: config.fallback_url.clone(),
            affordance: Affordance::Idle,
            settle_delay: config.settle_delay,
            generation: 0,
        }
    }

    pub fn url(&self) -> &StructuredUrl {
        &self.url
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance
    }

    pub fn view(&self) -> PasteView {
        PasteView {
            url: self.url.clone(),
            affordance: self.affordance,
        }
    }

    /// Go busy and return a ticket, or `None` if a paste is already in flight.
    pub fn begin(&mut self) -> Option<PasteTicket> {
        if self.affordance.is_busy() {
            debug!("paste ignored: already in flight");
            return None;
        }
        self.generation += 1;
        self.affordance = Affordance::Busy;
        debug!(generation = self.generation, "paste started");
        Some(PasteTicket {
            generation: self.generation,
        })
    }

    /// Apply the clipboard read result. The URL is replaced either way.
    pub fn settle(
        &mut self,
        ticket: PasteTicket,
        read: Result<String, ClipboardError>,
    ) -> Settled {
        debug_assert_eq!(ticket.generation, self.generation);

        let parsed = read
            .map_err(PasteError::from)
            .and_then(|text| decode_and_parse(&text).map_err(PasteError::from));

        let outcome = match parsed {
            Ok(url) => {
                debug!(url = %url, "paste accepted");
                self.url = url;
                PasteOutcome::Accepted
            }
            Err(err) => {
                warn!(error = %err, "paste fell back to default URL");
                self.url = self.fallback.clone();
                PasteOutcome::Fallback(err)
            }
        };

        Settled {
            outcome,
            release: PendingRelease {
                generation: ticket.generation,
                delay: self.settle_delay,
            },
        }
    }

    /// Go idle again.
    pub fn release(&mut self, pending: PendingRelease) {
        if pending.generation != self.generation {
            return;
        }
        self.affordance = Affordance::Idle;
        debug!(generation = pending.generation, "paste trigger re-enabled");
    }
}

/// Decode `text` like `decodeURI`, then parse it as an absolute URL.
pub fn decode_and_parse(text: &str) -> Result<StructuredUrl, ParseError> {
    let decoded = decode_uri(text)?;
    Ok(StructuredUrl::parse(&decoded)?)
}

/// Run one paste: read, settle, wait out the settle delay, release.
///
/// Returns `None` without touching any state when a paste is already in
/// flight. `on_change` is called after each state transition. No borrow of
/// `controller` is held across an await.
pub async fn run_paste<C, D, F>(
    controller: &RefCell<PasteController>,
    clipboard: &C,
    delay: &D,
    mut on_change: F,
) -> Option<PasteOutcome>
where
    C: ClipboardSource,
    D: Delay,
    F: FnMut(&PasteController),
{
    let ticket = controller.borrow_mut().begin()?;
    on_change(&controller.borrow());

    let read = clipboard.read_text().await;
    let Settled { outcome, release } = controller.borrow_mut().settle(ticket, read);
    on_change(&controller.borrow());

    delay.sleep(release.delay()).await;
    controller.borrow_mut().release(release);
    on_change(&controller.borrow());

    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn paste(controller: &mut PasteController, read: Result<String, ClipboardError>) -> PasteOutcome {
        let ticket = controller.begin().unwrap();
        let settled = controller.settle(ticket, read);
        controller.release(settled.release);
        settled.outcome
    }

    #[test]
    fn test_starts_idle_with_fallback() {
        let controller = PasteController::default();
        assert_eq!(controller.affordance(), Affordance::Idle);
        assert_eq!(controller.url(), &StructuredUrl::fallback());
    }

    #[test]
    fn test_begin_while_busy_is_ignored() {
        let mut controller = PasteController::default();
        let ticket = controller.begin().unwrap();
        let before = controller.clone();

        assert!(controller.begin().is_none());
        assert_eq!(controller, before);

        let settled = controller.settle(ticket, Ok("https://example.com/".to_string()));
        assert!(controller.begin().is_none());
        controller.release(settled.release);
        assert!(controller.begin().is_some());
    }

    #[test]
    fn test_stays_busy_until_release() {
        let mut controller = PasteController::default();
        let ticket = controller.begin().unwrap();
        assert_eq!(controller.affordance(), Affordance::Busy);

        let settled = controller.settle(ticket, Ok("https://example.com/".to_string()));
        assert_eq!(controller.affordance(), Affordance::Busy);
        assert_eq!(settled.release.delay(), Duration::from_millis(500));

        controller.release(settled.release);
        assert_eq!(controller.affordance(), Affordance::Idle);
    }

    #[test]
    fn test_accepts_url() {
        let mut controller = PasteController::default();
        let outcome = paste(&mut controller, Ok("https://example.com/a?x=1".to_string()));
        assert_eq!(outcome, PasteOutcome::Accepted);
        assert_eq!(controller.url().host(), "example.com");
        assert_eq!(controller.url().path(), "/a");
        assert_eq!(controller.url().query(), Some("x=1"));
    }

    #[test]
    fn test_non_url_falls_back() {
        let mut controller = PasteController::default();
        paste(&mut controller, Ok("https://example.com/".to_string()));

        let outcome = paste(&mut controller, Ok("not a url".to_string()));
        assert_eq!(
            outcome,
            PasteOutcome::Fallback(PasteError::Parse(ParseError::Url(
                url::ParseError::RelativeUrlWithoutBase
            )))
        );
        assert_eq!(controller.url(), &StructuredUrl::fallback());
    }

    #[test]
    fn test_bad_escape_falls_back() {
        let mut controller = PasteController::default();
        paste(&mut controller, Ok("https://example.com/".to_string()));

        let outcome = paste(&mut controller, Ok("https://example.com/%E0%A4%A".to_string()));
        assert!(matches!(
            outcome,
            PasteOutcome::Fallback(PasteError::Parse(ParseError::Decode(
                DecodeError::MalformedEscape { .. }
            )))
        ));
        assert_eq!(controller.url(), &StructuredUrl::fallback());
    }

    #[test]
    fn test_clipboard_failure_falls_back() {
        let mut controller = PasteController::default();
        paste(&mut controller, Ok("https://example.com/".to_string()));

        let outcome = paste(&mut controller, Err(ClipboardError::Denied("NotAllowedError".into())));
        assert!(matches!(
            outcome,
            PasteOutcome::Fallback(PasteError::Clipboard(ClipboardError::Denied(_)))
        ));
        assert_eq!(controller.url(), &StructuredUrl::fallback());
        assert_eq!(controller.affordance(), Affordance::Idle);
    }

    #[test]
    fn test_custom_fallback() {
        let config = PreviewConfig::default()
            .with_fallback_url("https://fallback.example/")
            .unwrap();
        let mut controller = PasteController::new(&config);
        assert_eq!(controller.url().host(), "fallback.example");

        paste(&mut controller, Ok("???".to_string()));
        assert_eq!(controller.url().host(), "fallback.example");
    }

    #[test]
    fn test_decode_and_parse_decodes_first() {
        let url = decode_and_parse("https://example.com/caf%C3%A9?q=a%20b").unwrap();
        assert_eq!(url.path(), "/caf%C3%A9");
        assert_eq!(url.query(), Some("q=a%20b"));
    }

    #[test]
    fn test_affordance_style() {
        assert_eq!(Affordance::Idle.style(), "opacity: 1; cursor: pointer;");
        assert_eq!(Affordance::Busy.style(), "opacity: 0.8; cursor: progress;");
    }
}
