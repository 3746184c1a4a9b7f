//! HTML email rendering
//!
//! Builds the self-contained summary email. Summary text and action item fields
//! are inserted as-is, without HTML escaping.

use crate::domain::models::{ActionItem, EmailDocument, Recipient};

/// Banner text when no recipient was selected
pub const NO_RECIPIENTS: &str = "No recipients selected";

/// Timeline cell text for action items without a timeline
pub const TIMELINE_NOT_SPECIFIED: &str = "Not specified";

/// Notice shown when mail is redirected to the operator instead of the recipients
pub const TEST_MODE_NOTICE: &str =
    "TEST MODE: this email was delivered to the operator address instead of the intended recipients.";

const STYLESHEET: &str = r#"body { font-family: Arial, Helvetica, sans-serif; line-height: 1.6; color: #333333; margin: 0; padding: 0; }
.container { max-width: 800px; margin: 0 auto; padding: 20px; }
.notice { background-color: #fff3cd; border: 1px solid #ffc107; color: #856404; padding: 10px 15px; border-radius: 4px; margin-bottom: 15px; }
.recipients { background-color: #e8f4fd; border-left: 4px solid #2196f3; padding: 10px 15px; margin-bottom: 20px; }
h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
h2 { color: #2c3e50; margin-top: 30px; }
.summary { background-color: #f8f9fa; padding: 15px; border-radius: 4px; }
table { width: 100%; border-collapse: collapse; margin-top: 10px; }
th, td { border: 1px solid #dddddd; padding: 10px; text-align: left; vertical-align: top; }
th { background-color: #3498db; color: #ffffff; }
tr:nth-child(even) { background-color: #f2f2f2; }
.footer { margin-top: 30px; font-size: 12px; color: #777777; }"#;

/// Joins recipient display strings for the banner
pub fn recipient_banner(recipients: &[Recipient]) -> String {
    if recipients.is_empty() {
        return NO_RECIPIENTS.to_string();
    }

    recipients
        .iter()
        .map(Recipient::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_line_breaks(text: &str) -> String {
    text.replace("\r\n", "<br>").replace('\n', "<br>")
}

fn action_item_row(item: &ActionItem) -> String {
    let timeline = item
        .timeline
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(TIMELINE_NOT_SPECIFIED);

    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        item.item, item.owner, timeline
    )
}

/// Renders the summary email
///
/// Pure: identical inputs always produce byte-identical HTML. `notice` is placed
/// above the recipients banner when given.
pub fn render_email(
    summary: &str,
    action_items: &[ActionItem],
    recipients: &[Recipient],
    notice: Option<&str>,
) -> EmailDocument {
    let notice_html = notice
        .map(|text| format!("<div class=\"notice\">{}</div>\n", text))
        .unwrap_or_default();

    let rows: String = action_items
        .iter()
        .map(action_item_row)
        .collect::<Vec<_>>()
        .join("\n");

    let action_items_html = if action_items.is_empty() {
        "<p>No action items were identified.</p>".to_string()
    } else {
        format!(
            "<table>\n<thead><tr><th>Action Item</th><th>Owner</th><th>Timeline</th></tr></thead>\n<tbody>\n{}\n</tbody>\n</table>",
            rows
        )
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Meeting Summary</title>
<style>
{stylesheet}
</style>
</head>
<body>
<div class="container">
{notice}<div class="recipients"><strong>Intended recipients:</strong> {recipients}</div>
<h1>Meeting Summary</h1>
<h2>Executive Summary</h2>
<div class="summary">{summary}</div>
<h2>Action Items</h2>
{action_items}
<div class="footer">This summary was generated automatically from the meeting transcript.</div>
</div>
</body>
</html>
"#,
        stylesheet = STYLESHEET,
        notice = notice_html,
        recipients = recipient_banner(recipients),
        summary = with_line_breaks(summary),
        action_items = action_items_html,
    );

    EmailDocument::new(html)
}
