use url::{Url, form_urlencoded};

const BRAND_NAME: &str = "FeedbackApp";

pub const LOGIN_SUBJECT: &str = "Your login link for FeedbackApp";

/// `<base>?token=<raw>`, with any trailing slash on the base dropped.
pub fn login_link_url(deeplink_base_url: &Url, raw_token: &str) -> String {
    let token: String = form_urlencoded::byte_serialize(raw_token.as_bytes()).collect();
    format!(
        "{}?token={}",
        deeplink_base_url.as_str().trim_end_matches('/'),
        token
    )
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 16px;border:1px solid #ccc;border-radius:10px;text-decoration:none;">{label}</a>"#
    )
}

/// Plain text and HTML bodies of the login email.
pub fn login_email(link: &str, ttl_minutes: i64) -> (String, String) {
    let text = format!(
        "Click the link below to log in:\n\n{link}\n\nThis link expires in {ttl_minutes} minutes."
    );

    let button = primary_button(link, &format!("Log in to {BRAND_NAME}"));
    let html = format!(
        r#"<div style="font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;line-height:1.4;">
  <p>Click the button below to log in:</p>
  <p>{button}</p>
  <p style="color:#666;">This link expires in {ttl_minutes} minutes.</p>
  <p style="color:#666;">If the button doesn't work, copy and paste this URL into your browser:</p>
  <p><code>{link}</code></p>
</div>"#
    );

    (text, html)
}
