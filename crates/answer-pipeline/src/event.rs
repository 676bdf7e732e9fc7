//! Inbound events and their split into requests.

use solver_core::{Attachment, InboundRequest};

use crate::delivery::ReplyTarget;

/// A message addressed to the bot, as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Message text, possibly starting with a `<@U...>` mention marker.
    pub text: String,
    pub attachments: Vec<Attachment>,
    /// Where replies go.
    pub target: ReplyTarget,
}

impl InboundEvent {
    pub fn new(text: impl Into<String>, target: ReplyTarget) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
            target,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Split the event into independent requests.
    ///
    /// Each attachment becomes its own request and the text is ignored. With
    /// no attachments, the mention-stripped text is the request. With neither,
    /// a single empty request is returned.
    pub fn into_requests(self) -> Vec<InboundRequest> {
        if !self.attachments.is_empty() {
            return self.attachments.into_iter().map(InboundRequest::file).collect();
        }

        let text = strip_mention(&self.text);
        if text.is_empty() {
            vec![InboundRequest::empty()]
        } else {
            vec![InboundRequest::text(text)]
        }
    }
}

/// Remove the first `<@...>` mention marker and trim.
///
/// A marker needs at least one character between `<@` and `>`; malformed
/// ones such as `<@>` are skipped and the search carries on after them.
pub fn strip_mention(text: &str) -> String {
    let mut from = 0;
    while let Some(offset) = text[from..].find("<@") {
        let start = from + offset;
        let body = start + 2;
        match text[body..].find('>') {
            Some(0) => from = body,
            Some(len) => {
                let end = body + len + 1;
                return format!("{}{}", &text[..start], &text[end..]).trim().to_string();
            }
            None => break,
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solver_core::Origin;

    fn target() -> ReplyTarget {
        ReplyTarget::new("C1").in_thread("1.0")
    }

    #[test]
    fn test_strip_mention() {
        assert_eq!(strip_mention("<@U0LAN0Z89> what is 2+2?"), "what is 2+2?");
        assert_eq!(strip_mention("hey <@U0LAN0Z89|bot>  solve this "), "hey   solve this");
        assert_eq!(strip_mention("<@U1> ask <@U2>"), "ask <@U2>");
        assert_eq!(strip_mention("<@U0LAN0Z89>"), "");
        assert_eq!(strip_mention("no mention"), "no mention");
        assert_eq!(strip_mention("<@> stays"), "<@> stays");
        assert_eq!(strip_mention("<@ unterminated"), "<@ unterminated");
    }

    #[test]
    fn test_strip_mention_skips_malformed_marker() {
        assert_eq!(strip_mention("<@> hi <@U1>"), "<@> hi");
        assert_eq!(strip_mention("<@><@U1> solve"), "<@> solve");
        assert_eq!(strip_mention("<@<@U1> x"), "x");
    }

    #[test]
    fn test_text_event() {
        let requests = InboundEvent::new("<@U1> capital of France?", target()).into_requests();
        assert_eq!(requests, vec![InboundRequest::text("capital of France?")]);
    }

    #[test]
    fn test_empty_mention() {
        let requests = InboundEvent::new("<@U1>   ", target()).into_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_empty());
    }

    #[test]
    fn test_attachments_fan_out_and_ignore_text() {
        let requests = InboundEvent::new("<@U1> please solve", target())
            .with_attachment(Attachment::new("application/pdf", "https://f/1").with_display_name("a.pdf"))
            .with_attachment(Attachment::new("image/png", "https://f/2").with_display_name("b.png"))
            .into_requests();

        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.origin == Origin::FileAttachment));
        assert!(requests.iter().all(|r| r.raw_text.is_none()));
        assert_eq!(
            requests[1].attachment.as_ref().and_then(|a| a.display_name.as_deref()),
            Some("b.png")
        );
    }
}
