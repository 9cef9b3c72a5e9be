// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML email templates.
//!
//! Every value that originates from a request goes through
//! [`encode_safe`] before it is interpolated.

use html_escape::encode_safe;
use nowhere_core::OutboundEmail;

/// Fields of a contact form needed by the contact templates.
#[derive(Debug, Clone)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Service tag, e.g. `web_development`.
    pub service: String,
    pub message: String,
    pub submitted_at: String,
}

/// Fields of a booking needed by the confirmation template.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub duration_minutes: u32,
    pub status: String,
    pub meeting_link: Option<String>,
}

/// Renders notifications with the agency's sender and admin addresses.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    sender_email: String,
    admin_email: String,
}

impl EmailTemplates {
    pub fn new(sender_email: impl Into<String>, admin_email: impl Into<String>) -> Self {
        Self {
            sender_email: sender_email.into(),
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Admin-facing notice of a new contact form.
    pub fn contact_notification(&self, contact: &ContactDetails) -> OutboundEmail {
        let html_body = format!(
            r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2 style="color: #00ff00; text-align: center; font-family: monospace;">NEW CONTACT FORM SUBMISSION</h2>
      <div style="background: #f4f4f4; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <h3>Contact Details:</h3>
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Phone:</strong> {phone}</p>
        <p><strong>Service:</strong> {service}</p>
      </div>
      <div style="background: #f4f4f4; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <h3>Message:</h3>
        <p style="background: white; padding: 15px; border-left: 4px solid #00ff00; margin: 0;">{message}</p>
      </div>
      <p style="text-align: center; color: #666; font-size: 14px;">Submitted at: {submitted_at}</p>
    </div>
  </body>
</html>"#,
            name = encode_safe(&contact.name),
            email = encode_safe(&contact.email),
            phone = encode_safe(&contact.phone),
            service = encode_safe(&contact.service),
            message = encode_safe(&contact.message),
            submitted_at = encode_safe(&contact.submitted_at),
        );

        OutboundEmail {
            to: self.admin_email.clone(),
            subject: format!("New Contact Form Submission - {}", contact.name),
            html_body,
        }
    }

    /// User-facing acknowledgement of a contact form.
    pub fn contact_confirmation(&self, contact: &ContactDetails) -> OutboundEmail {
        let html_body = format!(
            r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px; background: #000; color: #00ff00; font-family: monospace;">
      <h1 style="text-align: center; font-size: 28px;">NOWHERE DIGITAL</h1>
      <p style="text-align: center; font-size: 14px;">DIGITAL_MATRIX_DUBAI</p>
      <div style="background: #111; padding: 20px; border: 1px solid #00ff00; border-radius: 8px;">
        <h2>&gt; TRANSMISSION_RECEIVED</h2>
        <p>Hello {name},</p>
        <p>
          &gt; Your message has been received and processed<br />
          &gt; Agent will initiate contact within 24 hours<br />
          &gt; Service requested: {service}
        </p>
        <div style="background: #000; padding: 15px; border-left: 3px solid #00ff00; margin: 20px 0;">
          <h3>YOUR_MESSAGE:</h3>
          <p style="font-size: 14px;">{message}</p>
        </div>
        <p style="font-size: 14px;">
          &gt; CONTACT_PROTOCOLS_ACTIVE<br />
          &gt; EMAIL: {sender}<br />
          &gt; LOCATION: Dubai, UAE
        </p>
      </div>
    </div>
  </body>
</html>"#,
            name = encode_safe(&contact.name),
            service = encode_safe(&title_case(&contact.service)),
            message = encode_safe(&contact.message),
            sender = encode_safe(&self.sender_email),
        );

        OutboundEmail {
            to: contact.email.clone(),
            subject: "Thank you for contacting NOWHERE Digital - We'll be in touch!".to_string(),
            html_body,
        }
    }

    /// Booking confirmation sent to the booking's user.
    pub fn booking_confirmation(&self, booking: &BookingDetails, to: &str) -> OutboundEmail {
        let service = title_case(&booking.service_type);
        let meeting_link = booking
            .meeting_link
            .as_deref()
            .map(|link| format!("<p>&gt; MEETING_LINK: {}</p>", encode_safe(link)))
            .unwrap_or_default();

        let html_body = format!(
            r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px; background: #000; color: #00ff00; font-family: monospace;">
      <h1 style="text-align: center; font-size: 28px;">NOWHERE DIGITAL</h1>
      <p style="text-align: center; font-size: 14px;">BOOKING_CONFIRMED</p>
      <div style="background: #111; padding: 20px; border: 1px solid #00ff00; border-radius: 8px;">
        <h2>&gt; APPOINTMENT_SCHEDULED</h2>
        <div style="background: #000; padding: 15px; border-left: 3px solid #00ff00; margin: 20px 0;">
          <h3>BOOKING_DETAILS:</h3>
          <p style="font-size: 14px;">
            &gt; SERVICE: {service}<br />
            &gt; DATE: {date}<br />
            &gt; TIME: {time}<br />
            &gt; DURATION: {duration} minutes<br />
            &gt; STATUS: {status}
          </p>
        </div>
        {meeting_link}
        <p style="font-size: 14px;">&gt; CONTACT_FOR_CHANGES: {sender}</p>
      </div>
    </div>
  </body>
</html>"#,
            service = encode_safe(&service),
            date = encode_safe(&booking.preferred_date),
            time = encode_safe(&booking.preferred_time),
            duration = booking.duration_minutes,
            status = encode_safe(&title_case(&booking.status)),
            sender = encode_safe(&self.sender_email),
        );

        OutboundEmail {
            to: to.to_string(),
            subject: format!("Booking Confirmation - {service}"),
            html_body,
        }
    }
}

/// `web_development` -> `Web Development`.
pub fn title_case(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn templates() -> EmailTemplates {
        EmailTemplates::new("hello@nowhere.digital", "admin@nowhere.digital")
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Aisha".into(),
            email: "aisha@example.com".into(),
            phone: "+971500000000".into(),
            service: "web_development".into(),
            message: "Need a <b>new</b> site".into(),
            submitted_at: "2026-03-01T10:00:00.000000Z".into(),
        }
    }

    #[test]
    fn contact_notification_goes_to_admin() {
        let email = templates().contact_notification(&contact());
        assert_eq!(email.to, "admin@nowhere.digital");
        assert_eq!(email.subject, "New Contact Form Submission - Aisha");
        assert!(email.html_body.contains("aisha@example.com"));
        assert!(email.html_body.contains("Need a &lt;b&gt;new&lt;&#x2F;b&gt; site"));
    }

    #[test]
    fn contact_confirmation_goes_to_submitter() {
        let email = templates().contact_confirmation(&contact());
        assert_eq!(email.to, "aisha@example.com");
        assert_eq!(
            email.subject,
            "Thank you for contacting NOWHERE Digital - We'll be in touch!"
        );
        assert!(email.html_body.contains("Service requested: Web Development"));
        assert!(email.html_body.contains("hello@nowhere.digital"));
    }

    #[test]
    fn booking_confirmation_includes_optional_link() {
        let mut booking = BookingDetails {
            service_type: "seo".into(),
            preferred_date: "2026-04-02".into(),
            preferred_time: "14:00".into(),
            duration_minutes: 60,
            status: "pending".into(),
            meeting_link: None,
        };
        let email = templates().booking_confirmation(&booking, "c@x.com");
        assert_eq!(email.subject, "Booking Confirmation - Seo");
        assert!(email.html_body.contains("DURATION: 60 minutes"));
        assert!(email.html_body.contains("STATUS: Pending"));
        assert!(!email.html_body.contains("MEETING_LINK"));

        booking.meeting_link = Some("https://meet.example.com/x".into());
        let email = templates().booking_confirmation(&booking, "c@x.com");
        assert!(
            email
                .html_body
                .contains("MEETING_LINK: https:&#x2F;&#x2F;meet.example.com&#x2F;x")
        );
    }

    #[test]
    fn title_case_handles_tags() {
        assert_eq!(title_case("web_development"), "Web Development");
        assert_eq!(title_case("no_show"), "No Show");
        assert_eq!(title_case("SEO"), "Seo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn injected_markup_is_inert() {
        let mut details = contact();
        details.name = r#"<img src=x onerror="alert(1)">"#.into();
        details.message = "</p><script>steal()</script>".into();
        let email = templates().contact_confirmation(&details);
        assert!(!email.html_body.contains("<img"));
        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;steal()&lt;&#x2F;script&gt;"));
        assert!(email.html_body.contains("onerror=&quot;alert(1)&quot;"));
    }

    proptest! {
        #[test]
        fn user_text_cannot_open_a_tag(raw in ".*") {
            let mut details = contact();
            details.message = format!("<script>{raw}");
            let email = templates().contact_notification(&details);
            prop_assert!(!email.html_body.contains("<script>"));
            let escaped = encode_safe(&raw);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
        }
    }
}
