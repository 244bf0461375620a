//! Share-channel dispatch for invitation messages.
//!
//! Each channel is one variant with a uniform probe-then-open
//! behavior instead of repeated ad hoc branches. A channel failure is
//! always non-fatal: it becomes a `ChannelUnavailable` alert and never
//! blocks the other channels or the invitation record itself.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::AppError;
use crate::host::{Platform, ShareOutlet};
use crate::locale::{Language, ShareMessage};

/// Every way an invitation can leave the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChannel {
    /// Generic OS share sheet.
    ShareSheet,
    Viber,
    WhatsApp,
    Sms,
    Email,
    Clipboard,
}

/// Channels in the order the share screen lists them.
pub const ALL_CHANNELS: [ShareChannel; 6] = [
    ShareChannel::ShareSheet,
    ShareChannel::Viber,
    ShareChannel::WhatsApp,
    ShareChannel::Sms,
    ShareChannel::Email,
    ShareChannel::Clipboard,
];

fn encode(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

impl ShareChannel {
    /// Display name used in the "app not installed" alert.
    pub fn app_name(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (ShareChannel::Viber, _) => "Viber",
            (ShareChannel::WhatsApp, _) => "WhatsApp",
            (ShareChannel::Sms, Language::Bg) => "Съобщения",
            (ShareChannel::Sms, Language::En) => "Messages",
            (ShareChannel::Email, Language::Bg) => "Поща",
            (ShareChannel::Email, Language::En) => "Mail",
            (ShareChannel::ShareSheet, Language::Bg) => "Споделяне",
            (ShareChannel::ShareSheet, Language::En) => "Share",
            (ShareChannel::Clipboard, Language::Bg) => "Клипборд",
            (ShareChannel::Clipboard, Language::En) => "Clipboard",
        }
    }

    /// Deep-link URI for this channel, or `None` when the channel is
    /// not URI-based (share sheet, clipboard).
    ///
    /// The SMS body separator is platform-dependent: `&` on iOS, `?`
    /// everywhere else.
    pub fn uri(&self, platform: Platform, message: &ShareMessage) -> Option<String> {
        let body = encode(&message.body);
        match self {
            ShareChannel::Viber => Some(format!("viber://forward?text={body}")),
            ShareChannel::WhatsApp => Some(format!("whatsapp://send?text={body}")),
            ShareChannel::Sms => {
                let sep = if platform == Platform::Ios { '&' } else { '?' };
                Some(format!("sms:{sep}body={body}"))
            }
            ShareChannel::Email => {
                let subject = encode(&message.subject);
                Some(format!("mailto:?subject={subject}&body={body}"))
            }
            ShareChannel::ShareSheet | ShareChannel::Clipboard => None,
        }
    }

    /// Whether this channel is probed with `can_open` before opening.
    /// SMS and mailto are attempted directly.
    fn probes_first(&self) -> bool {
        matches!(self, ShareChannel::Viber | ShareChannel::WhatsApp)
    }
}

/// Send a message through one channel.
///
/// Availability is probed for Viber/WhatsApp; SMS and mailto are
/// attempted directly. Every failure maps to `ChannelUnavailable`
/// naming the app, which the screen shows as a non-fatal alert.
pub fn open_channel(
    outlet: &dyn ShareOutlet,
    lang: Language,
    channel: ShareChannel,
    message: &ShareMessage,
) -> Result<(), AppError> {
    let unavailable = || AppError::ChannelUnavailable {
        app: channel.app_name(lang).to_string(),
    };

    match channel {
        ShareChannel::ShareSheet => {
            if !outlet.has_share_sheet() {
                return Err(unavailable());
            }
            outlet
                .share_text(&message.subject, &message.body)
                .map_err(|_| unavailable())
        }
        ShareChannel::Clipboard => outlet
            .copy_to_clipboard(&message.body)
            .map_err(|_| unavailable()),
        _ => {
            let Some(uri) = channel.uri(outlet.platform(), message) else {
                return Err(unavailable());
            };
            if channel.probes_first() && !outlet.can_open(&uri) {
                tracing::debug!(
                    channel = channel.app_name(Language::En),
                    "share target not installed"
                );
                return Err(unavailable());
            }
            outlet.open(&uri).map_err(|_| unavailable())
        }
    }
}

/// Offer the message on every channel, collecting per-channel results.
/// One failing channel never stops the rest.
pub fn fan_out(
    outlet: &dyn ShareOutlet,
    lang: Language,
    message: &ShareMessage,
) -> Vec<(ShareChannel, Result<(), AppError>)> {
    ALL_CHANNELS
        .iter()
        .map(|&channel| (channel, open_channel(outlet, lang, channel, message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::host::MockShareOutlet;

    use super::*;

    fn msg() -> ShareMessage {
        ShareMessage {
            subject: "Покана".into(),
            body: "код 483920".into(),
        }
    }

    #[test]
    fn viber_uri_is_url_encoded() {
        let uri = ShareChannel::Viber.uri(Platform::Android, &msg()).unwrap();
        assert!(uri.starts_with("viber://forward?text="));
        assert!(!uri.contains(' '));
        assert!(uri.contains("483920"));
    }

    #[test]
    fn whatsapp_uri_uses_send_scheme() {
        let uri = ShareChannel::WhatsApp.uri(Platform::Ios, &msg()).unwrap();
        assert!(uri.starts_with("whatsapp://send?text="));
    }

    #[test]
    fn sms_separator_depends_on_platform() {
        let ios = ShareChannel::Sms.uri(Platform::Ios, &msg()).unwrap();
        assert!(ios.starts_with("sms:&body="));
        let android = ShareChannel::Sms.uri(Platform::Android, &msg()).unwrap();
        assert!(android.starts_with("sms:?body="));
        let other = ShareChannel::Sms.uri(Platform::Other, &msg()).unwrap();
        assert!(other.starts_with("sms:?body="));
    }

    #[test]
    fn mailto_carries_subject_and_body() {
        let uri = ShareChannel::Email.uri(Platform::Ios, &msg()).unwrap();
        assert!(uri.starts_with("mailto:?subject="));
        assert!(uri.contains("&body="));
    }

    #[test]
    fn missing_app_yields_channel_unavailable() {
        let outlet = MockShareOutlet::new(Platform::Android).without_schemes(&["viber"]);
        let err = open_channel(&outlet, Language::Bg, ShareChannel::Viber, &msg()).unwrap_err();
        assert_eq!(
            err,
            AppError::ChannelUnavailable { app: "Viber".into() }
        );
        // Nothing was opened.
        assert!(outlet.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn sms_is_attempted_without_probing() {
        // The fake OS claims sms cannot be probed, but open succeeds.
        let outlet = MockShareOutlet::new(Platform::Ios);
        open_channel(&outlet, Language::Bg, ShareChannel::Sms, &msg()).unwrap();
        assert_eq!(outlet.opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn clipboard_copies_the_body() {
        let outlet = MockShareOutlet::new(Platform::Other);
        open_channel(&outlet, Language::En, ShareChannel::Clipboard, &msg()).unwrap();
        assert_eq!(
            outlet.clipboard.lock().unwrap().as_deref(),
            Some("код 483920")
        );
    }

    #[test]
    fn fan_out_survives_unavailable_channels() {
        let outlet = MockShareOutlet::new(Platform::Android)
            .without_schemes(&["viber", "whatsapp"])
            .without_share_sheet();
        let results = fan_out(&outlet, Language::En, &msg());
        assert_eq!(results.len(), ALL_CHANNELS.len());

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        assert_eq!(failed, 3, "share sheet, viber and whatsapp fail");
        // SMS, mail and clipboard still went through.
        assert_eq!(outlet.opened.lock().unwrap().len(), 2);
        assert!(outlet.clipboard.lock().unwrap().is_some());
    }
}
