//! View routes.
//!
//! Serves the single-card interface: one GET route per view, server-rendered
//! HTML with inline CSS — no JS framework. Rendering is a pure function of
//! the view, the draft being edited, and the inline error message; the
//! transition table in `mealistik_core::view` decides which links each view
//! may offer. Attribution captured from the query string rides along on
//! every internal link and as hidden form fields, so the once-per-session
//! capture survives the server round trips.

use std::sync::Arc;

use axum::Router;
use axum::extract::Query;
use axum::response::Html;
use axum::routing::get;

use mealistik_core::attribution::AttributionRecord;
use mealistik_core::entry::{Condition, InvestorEntry, WaitlistEntry};
use mealistik_core::links;
use mealistik_core::view::{NavAction, ViewState};

use crate::state::AppState;

/// Product website, decorated with attribution on render.
const WEBSITE_URL: &str = "https://mealistik.com";
/// Instagram profile, decorated with attribution on render.
const INSTAGRAM_URL: &str = "https://www.instagram.com/mealistik/";

/// Build the view router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(ViewState::Home.path(), get(home_page))
        .route(ViewState::Waitlist.path(), get(waitlist_page))
        .route(ViewState::Investor.path(), get(investor_page))
        .route(ViewState::Contact.path(), get(contact_page))
        .route(ViewState::WaitlistSuccess.path(), get(waitlist_success_page))
        .route(ViewState::InvestorSuccess.path(), get(investor_success_page))
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn home_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    Html(render_home(&AttributionRecord::from_pairs(pairs)))
}

async fn waitlist_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    let attribution = AttributionRecord::from_pairs(pairs);
    Html(render_waitlist(&attribution, &WaitlistEntry::default(), None))
}

async fn investor_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    let attribution = AttributionRecord::from_pairs(pairs);
    Html(render_investor(&attribution, &InvestorEntry::default(), None))
}

async fn contact_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    Html(render_contact(&AttributionRecord::from_pairs(pairs)))
}

async fn waitlist_success_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    Html(render_waitlist_success(&AttributionRecord::from_pairs(
        pairs,
    )))
}

async fn investor_success_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    Html(render_investor_success(&AttributionRecord::from_pairs(
        pairs,
    )))
}

// ── Renderers ────────────────────────────────────────────────────────

pub(crate) fn render_home(attribution: &AttributionRecord) -> String {
    let waitlist_href = internal_href(ViewState::Home, NavAction::ChooseWaitlist, attribution);
    let investor_href = internal_href(ViewState::Home, NavAction::ChooseInvestor, attribution);
    let contact_href = internal_href(ViewState::Home, NavAction::ChooseContact, attribution);
    let website_href = links::decorate(WEBSITE_URL, attribution);

    let content = format!(
        r#"<div class="btns">
<a class="primary" href="{waitlist_href}">Join early waitlist</a>
<a class="primary" href="{investor_href}">Investor or partner</a>
<a class="primary" href="{website_href}">Visit website</a>
</div>
<a class="contact-btn" href="{contact_href}">Contact</a>
"#
    );

    card_shell(ViewState::Home, attribution, &content)
}

pub(crate) fn render_waitlist(
    attribution: &AttributionRecord,
    entry: &WaitlistEntry,
    error: Option<&str>,
) -> String {
    let mut form = String::with_capacity(4096);
    form.push_str("<form method=\"post\" action=\"/waitlist\" novalidate>\n");
    push_hidden_attribution(&mut form, attribution);

    form.push_str(&format!(
        "<label for=\"first-name\">First name</label>\n\
         <input id=\"first-name\" name=\"first_name\" type=\"text\" value=\"{}\">\n",
        escape(&entry.first_name)
    ));
    form.push_str(&format!(
        "<label for=\"waitlist-email\">Email</label>\n\
         <input id=\"waitlist-email\" name=\"email\" type=\"email\" value=\"{}\">\n",
        escape(&entry.email)
    ));

    form.push_str("<label for=\"condition\">Condition</label>\n<select id=\"condition\" name=\"condition\">\n");
    form.push_str("<option value=\"\">Select a condition</option>\n");
    for condition in Condition::ALL {
        let selected = if entry.condition == Some(condition) {
            " selected"
        } else {
            ""
        };
        form.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            condition.as_str(),
            condition.label()
        ));
    }
    form.push_str("</select>\n");

    let checked = if entry.consent { " checked" } else { "" };
    form.push_str(&format!(
        "<label class=\"consent\"><input type=\"checkbox\" name=\"consent\"{checked}> I consent to receive updates about Mealistik.</label>\n"
    ));

    push_error_slot(&mut form, error);
    form.push_str("<button class=\"primary\" type=\"submit\">Join waitlist</button>\n</form>\n");

    card_shell(ViewState::Waitlist, attribution, &form)
}

pub(crate) fn render_investor(
    attribution: &AttributionRecord,
    entry: &InvestorEntry,
    error: Option<&str>,
) -> String {
    let mut form = String::with_capacity(4096);
    form.push_str("<form method=\"post\" action=\"/investor\" novalidate>\n");
    push_hidden_attribution(&mut form, attribution);

    form.push_str(&format!(
        "<label for=\"full-name\">Full name</label>\n\
         <input id=\"full-name\" name=\"full_name\" type=\"text\" value=\"{}\">\n",
        escape(&entry.full_name)
    ));
    form.push_str(&format!(
        "<label for=\"investor-email\">Email</label>\n\
         <input id=\"investor-email\" name=\"email\" type=\"email\" value=\"{}\">\n",
        escape(&entry.email)
    ));
    form.push_str(&format!(
        "<label for=\"phone\">Phone (optional)</label>\n\
         <input id=\"phone\" name=\"phone\" type=\"tel\" value=\"{}\">\n",
        escape(&entry.phone)
    ));
    form.push_str(&format!(
        "<label for=\"notes\">Notes (optional)</label>\n\
         <textarea id=\"notes\" name=\"notes\" rows=\"3\">{}</textarea>\n",
        escape(&entry.notes)
    ));

    let checked = if entry.consent { " checked" } else { "" };
    form.push_str(&format!(
        "<label class=\"consent\"><input type=\"checkbox\" name=\"consent\"{checked}> I consent to be contacted about investment or partnership opportunities.</label>\n"
    ));

    push_error_slot(&mut form, error);
    form.push_str("<button class=\"primary\" type=\"submit\">Send</button>\n</form>\n");

    card_shell(ViewState::Investor, attribution, &form)
}

pub(crate) fn render_contact(attribution: &AttributionRecord) -> String {
    let home_href = internal_href(ViewState::Contact, NavAction::Back, attribution);
    let content = format!(
        r#"<div class="contact-card">
<p><strong>Founder</strong></p>
<p>Sowmiya Yoganathan</p>
<p><a href="https://www.linkedin.com/in/sowmiya-yoganathan-668430136/" target="_blank" rel="noopener noreferrer">LinkedIn Profile</a></p>
<p>Contact email: <a href="mailto:hello@innara.com">hello@innara.com</a></p>
<a class="contact-btn" href="{home_href}">Back</a>
</div>
"#
    );

    card_shell(ViewState::Contact, attribution, &content)
}

pub(crate) fn render_waitlist_success(attribution: &AttributionRecord) -> String {
    let website_href = links::decorate(WEBSITE_URL, attribution);
    let instagram_href = links::decorate(INSTAGRAM_URL, attribution);
    let content = format!(
        r#"<h2>You're on the list!</h2>
<p class="sub">Thanks for joining the early waitlist. We'll email you as soon as your spot opens up.</p>
<div class="btns">
<a class="primary" href="{website_href}">Visit website</a>
<a class="primary" href="{instagram_href}">Follow on Instagram</a>
</div>
"#
    );

    card_shell(ViewState::WaitlistSuccess, attribution, &content)
}

pub(crate) fn render_investor_success(attribution: &AttributionRecord) -> String {
    let website_href = links::decorate(WEBSITE_URL, attribution);
    let instagram_href = links::decorate(INSTAGRAM_URL, attribution);
    let content = format!(
        r#"<h2>Thank you for your interest!</h2>
<p class="sub">We've received your details and will be in touch shortly.</p>
<div class="btns">
<a class="primary" href="{website_href}">Visit website</a>
<a class="primary" href="{instagram_href}">Follow on Instagram</a>
</div>
"#
    );

    card_shell(ViewState::InvestorSuccess, attribution, &content)
}

// ── Shell & helpers ──────────────────────────────────────────────────

/// Link to the view an action leads to from `from`, attribution attached.
fn internal_href(from: ViewState, action: NavAction, attribution: &AttributionRecord) -> String {
    links::decorate(from.apply(action).path(), attribution)
}

/// Render the card shell around a view's content.
fn card_shell(view: ViewState, attribution: &AttributionRecord, content: &str) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Mealistik</title>\n",
    );
    html.push_str(PAGE_CSS);
    html.push_str(
        "</head>\n<body>\n<main class=\"wrap\">\n\
         <section class=\"card\" aria-labelledby=\"welcome-title\">\n<div class=\"logo-bar\">\n",
    );

    if view.has_back_control() {
        let back_href = internal_href(view, NavAction::Back, attribution);
        html.push_str(&format!(
            "<a class=\"back-arrow\" href=\"{back_href}\" aria-label=\"Back\">&larr;</a>\n"
        ));
    }

    html.push_str("<div class=\"logo\">Mealistik</div>\n</div>\n");
    html.push_str(
        "<h1 id=\"welcome-title\">Welcome to Mealistik</h1>\n\
         <p class=\"sub\">Mealistik is a personalised meal-planning app that helps women with \
         chronic conditions eat well, shop smart, and stay consistent.</p>\n",
    );
    html.push_str(content);
    html.push_str("</section>\n</main>\n");

    if let Some(target) = view.focus_target() {
        html.push_str(&focus_script(target));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Inline error slot. An empty slot renders nothing — the message is
/// computed fresh on every attempt, so stale errors cannot linger.
fn push_error_slot(out: &mut String, error: Option<&str>) {
    if let Some(message) = error {
        out.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            escape(message)
        ));
    }
}

/// Hidden inputs carrying the attribution through the form POST.
fn push_hidden_attribution(out: &mut String, attribution: &AttributionRecord) {
    for (key, value) in attribution.pairs() {
        out.push_str(&format!(
            "<input type=\"hidden\" name=\"{key}\" value=\"{}\">\n",
            escape(value)
        ));
    }
}

/// Post-render focus for a form's first field. Best effort — a missing
/// element or a focus refusal is silently ignored.
fn focus_script(target: &str) -> String {
    format!(
        "<script>\n(function(){{var el=document.getElementById('{target}');\
         if(el){{setTimeout(function(){{try{{el.focus()}}catch(e){{}}}},0);}}}})();\n</script>\n"
    )
}

/// Escape a user-supplied value for HTML text and attribute positions.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Card styling, adapted from the product's brand palette.
const PAGE_CSS: &str = r#"<style>
:root { --primary:#9999cc; --accent:#c1c1f9; --deep:#3e3e7a; --white:#ffffff; --text-dark:#1d1a31; }
* { box-sizing: border-box; }
body { margin:0; min-height:100vh; background:linear-gradient(180deg, #1d1a31 0%, #3e3e7a 100%); }
body, button, input, select, textarea { font-family:-apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Noto Sans, Ubuntu, Cantarell, 'Helvetica Neue', Arial, system-ui, sans-serif; }
.wrap { display:grid; place-items:center; padding:24px; min-height:100vh; }
.card { width:100%; max-width:480px; background:var(--white); border-radius:16px; padding:20px; box-shadow:0 10px 30px rgba(0,0,0,0.25); }
.logo-bar { display:flex; align-items:center; gap:8px; }
.back-arrow { font-size:20px; color:var(--deep); text-decoration:none; line-height:1; }
.logo { font-weight:800; font-size:20px; color:var(--deep); }
h1 { font-size:24px; margin:8px 0 6px; color:var(--text-dark); }
h2 { font-size:20px; margin:14px 0 4px; color:var(--text-dark); }
.sub { font-size:16px; color:#333; }
.btns { display:grid; gap:12px; margin:18px 0 8px; }
button.primary, a.primary { background:var(--primary); color:var(--text-dark); border:0; border-radius:12px; padding:14px 16px; font-size:16px; font-weight:700; text-align:center; text-decoration:none; cursor:pointer; }
button.primary:hover, a.primary:hover { background:var(--accent); }
.contact-btn { display:inline-block; background:none; border:1px solid var(--deep); border-radius:8px; color:var(--deep); font-size:12px; padding:6px 10px; cursor:pointer; margin-top:8px; text-decoration:none; }
.contact-card { background:#f8f8ff; border-radius:10px; padding:16px; margin-top:12px; color:#222; font-size:14px; }
.contact-card a { color:var(--deep); text-decoration:none; }
.contact-card a:hover { text-decoration:underline; }
form { display:grid; gap:8px; margin-top:14px; }
label { font-size:14px; color:#333; }
input[type=text], input[type=email], input[type=tel], select, textarea { border:1px solid #ccc; border-radius:8px; padding:10px; font-size:15px; width:100%; }
label.consent { display:flex; gap:8px; align-items:flex-start; font-size:13px; margin:6px 0; }
.error { color:#b00020; font-size:14px; margin:4px 0; }
</style>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn attribution() -> AttributionRecord {
        AttributionRecord::from_pairs([("utm_source".to_owned(), "ig".to_owned())])
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b>"x"&'y'</b>"#),
            "&lt;b&gt;&quot;x&quot;&amp;&#39;y&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn home_links_carry_attribution() {
        let html = render_home(&attribution());
        assert!(html.contains("href=\"/waitlist?utm_source=ig\""));
        assert!(html.contains("href=\"/investor?utm_source=ig\""));
        assert!(html.contains("href=\"https://mealistik.com?utm_source=ig\""));
    }

    #[test]
    fn waitlist_form_retains_draft_and_error() {
        let entry = WaitlistEntry {
            first_name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            condition: Some(Condition::Thyroid),
            consent: true,
        };
        let html = render_waitlist(&attribution(), &entry, Some("network down"));

        assert!(html.contains("value=\"Jane\""));
        assert!(html.contains("value=\"jane@example.com\""));
        assert!(html.contains("<option value=\"thyroid\" selected>"));
        assert!(html.contains("name=\"consent\" checked"));
        assert!(html.contains("role=\"alert\">network down</p>"));
        assert!(html.contains("name=\"utm_source\" value=\"ig\""));
    }

    #[test]
    fn form_values_are_escaped_when_re_rendered() {
        let entry = WaitlistEntry {
            first_name: "<script>alert(1)</script>".to_owned(),
            ..WaitlistEntry::default()
        };
        let html = render_waitlist(&AttributionRecord::default(), &entry, None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn form_views_render_the_focus_script() {
        let html = render_waitlist(&AttributionRecord::default(), &WaitlistEntry::default(), None);
        assert!(html.contains("getElementById('first-name')"));

        let html = render_investor(&AttributionRecord::default(), &InvestorEntry::default(), None);
        assert!(html.contains("getElementById('full-name')"));

        let html = render_home(&AttributionRecord::default());
        assert!(!html.contains("getElementById"));
    }

    #[test]
    fn success_views_offer_no_back_control() {
        let html = render_waitlist_success(&attribution());
        assert!(!html.contains("back-arrow"));
        assert!(html.contains("https://mealistik.com?utm_source=ig"));
        assert!(html.contains("https://www.instagram.com/mealistik/?utm_source=ig"));
    }

    #[test]
    fn contact_card_is_static() {
        let html = render_contact(&AttributionRecord::default());
        assert!(html.contains("Sowmiya Yoganathan"));
        assert!(html.contains("mailto:hello@innara.com"));
        assert!(html.contains("linkedin.com"));
    }
}
