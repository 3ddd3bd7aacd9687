//! Compose-side pixel injection.
//!
//! A mail UI integration implements [`ComposeSurface`] for its compose window,
//! pushes each newly opened window through a [`ComposeNotifier`], and calls
//! [`inject_tracking_pixel`] on send for windows where tracking was switched on.
//! Per-window state lives in a [`ComposeSession`] that the caller owns.

use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::client::TrackerClient;
use crate::error::{ClientError, Result};

/// Used when the compose window has no (or a blank) subject.
pub const DEFAULT_SUBJECT: &str = "(No subject)";

/// A compose window the pixel can be injected into.
pub trait ComposeSurface: Send {
    /// Comma-separated recipient addresses, if any could be detected.
    fn recipient(&self) -> Option<String>;

    fn subject(&self) -> Option<String>;

    /// Appends raw HTML to the end of the message body. Returns false when
    /// the body element could not be found.
    fn append_html(&mut self, html: &str) -> bool;
}

/// State of one compose window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeSession {
    pub tracking_enabled: bool,
    pub recipient: Option<String>,
    pub subject: Option<String>,
    /// Set once a pixel has been injected.
    pub tracking_id: Option<String>,
}

impl ComposeSession {
    pub fn new(tracking_enabled: bool) -> Self {
        Self {
            tracking_enabled,
            ..Self::default()
        }
    }

    pub fn set_tracking(&mut self, enabled: bool) {
        self.tracking_enabled = enabled;
    }

    pub fn is_injected(&self) -> bool {
        self.tracking_id.is_some()
    }
}

/// The hidden 1x1 `<img>` tag pointing at `url`.
pub fn pixel_html(url: &str) -> String {
    format!(
        r#"<img src="{}" width="1" height="1" style="display:none;" alt="" />"#,
        url
    )
}

/// Generates a pixel for the surface's message and appends it to the body.
///
/// Returns the tracking id, or `None` when tracking is disabled for the session
/// or a pixel was already injected.
#[instrument(skip_all)]
pub async fn inject_tracking_pixel<S: ComposeSurface + ?Sized>(
    client: &TrackerClient,
    session: &mut ComposeSession,
    surface: &mut S,
) -> Result<Option<String>> {
    if !session.tracking_enabled || session.is_injected() {
        return Ok(None);
    }

    let recipient = surface
        .recipient()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| {
            warn!("Could not detect recipient; pixel not injected");
            ClientError::MissingRecipient
        })?;
    let subject = surface
        .subject()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    let pixel = client.generate_pixel(&subject, &recipient).await?;
    let url = client.pixel_url(&pixel.pixel_url);

    if !surface.append_html(&pixel_html(&url)) {
        warn!(tracking_id = %pixel.tracking_id, "Could not find email body");
        return Err(ClientError::MissingBody);
    }

    info!(
        tracking_id = %pixel.tracking_id,
        recipient = %recipient,
        subject = %subject,
        "Tracking pixel injected"
    );
    session.recipient = Some(recipient);
    session.subject = Some(subject);
    session.tracking_id = Some(pixel.tracking_id.clone());
    Ok(Some(pixel.tracking_id))
}

/// Sender half: the UI integration announces each new compose surface here.
#[derive(Debug)]
pub struct ComposeNotifier<S> {
    tx: mpsc::Sender<S>,
}

impl<S> Clone for ComposeNotifier<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S: Send> ComposeNotifier<S> {
    /// Returns false once the observer has been dropped.
    pub async fn notify(&self, surface: S) -> bool {
        self.tx.send(surface).await.is_ok()
    }
}

/// Receiver half: yields compose surfaces as they appear.
#[derive(Debug)]
pub struct ComposeObserver<S> {
    rx: mpsc::Receiver<S>,
}

impl<S: Send> ComposeObserver<S> {
    pub fn channel(buffer: usize) -> (ComposeNotifier<S>, ComposeObserver<S>) {
        let (tx, rx) = mpsc::channel(buffer);
        (ComposeNotifier { tx }, ComposeObserver { rx })
    }

    /// Waits for the next surface; `None` once every notifier is gone.
    pub async fn next_surface(&mut self) -> Option<S> {
        self.rx.recv().await
    }
}
