// src/integrations/player.rs
//
// Video playback handoff
//
// A trailer key is turned into a video-site URL and handed to an external
// program. The app handler is tried first; the web handler only runs if
// the app handler could not take the URL.

use reqwest::Url;
use std::process::{Command, Stdio};

use crate::error::{AppError, AppResult};
use crate::integrations::tmdb::urls;

/// Something that can open a URL outside this process
pub trait UrlHandler: Send + Sync {
    fn name(&self) -> &str;

    fn open(&self, url: &Url) -> AppResult<()>;
}

/// Launches `program [args..] <url>` and does not wait for it
#[derive(Debug, Clone)]
pub struct CommandUrlHandler {
    program: String,
    args: Vec<String>,
}

impl CommandUrlHandler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The platform's default URL opener
    pub fn system_browser() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open")
        } else if cfg!(target_os = "windows") {
            Self::new("cmd").with_arg("/C").with_arg("start").with_arg("")
        } else {
            Self::new("xdg-open")
        }
    }
}

impl UrlHandler for CommandUrlHandler {
    fn name(&self) -> &str {
        &self.program
    }

    fn open(&self, url: &Url) -> AppResult<()> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Other(format!("Failed to launch {}: {}", self.program, e)))?;
        Ok(())
    }
}

/// Which handler accepted the video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    App,
    Web,
}

/// Hand the video for `key` to `app_handler`, falling back to `web_handler`
///
/// Fails only when both handlers refuse the URL.
pub fn play_video(
    key: &str,
    app_handler: &dyn UrlHandler,
    web_handler: &dyn UrlHandler,
) -> AppResult<PlaybackTarget> {
    let url = urls::youtube_watch_url(key)?;

    match app_handler.open(&url) {
        Ok(()) => {
            log::info!("Opened {} with {}", url, app_handler.name());
            Ok(PlaybackTarget::App)
        }
        Err(e) => {
            log::warn!(
                "{} could not open {} ({}), trying {}",
                app_handler.name(),
                url,
                e,
                web_handler.name()
            );
            web_handler.open(&url)?;
            Ok(PlaybackTarget::Web)
        }
    }
}
