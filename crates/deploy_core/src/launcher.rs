use std::{io, process::Command};

use url::Url;

/// Hands `url` to the platform's default handler without waiting for it.
pub fn open_in_browser(url: &Url) -> io::Result<()> {
    let target = url.as_str();

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", "", target]).spawn();

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(target).spawn();

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg(target).spawn();

    result.map(|_| {
        tracing::debug!(url = target, "opened explorer link");
    })
}
