//! HTML for every page, all wrapped in the same shell.

use std::fmt::Write;

use url::Url;

use crate::availability::{format_date, Slot};
use crate::member::Roster;
use crate::session::Session;

const TITLE: &str = "Social Planning for Worldwide Ballers";
const LOGO_URL: &str = "https://cdn.ktar.com/ktar/wp-content/uploads/2018/08/Pitbull-AP-Photo-640x480-1.jpg";
const TAGLINE: &str = "Life is so crazy right now man";

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; flex-direction: column; font-family: sans-serif; background: linear-gradient(to bottom right, #eff6ff, #ffedd5); }
header { background: #000; color: #fff; text-align: center; padding: 0.75rem; }
header h1 { margin: 0; font-size: 2rem; }
main { flex: 1; display: flex; flex-direction: column; align-items: center; padding: 0.5rem; }
.logo { width: 4rem; height: 4rem; border-radius: 50%; border: 2px solid #60a5fa; object-fit: cover; }
.tagline { background: #fff; border: 1px solid #9ca3af; border-radius: 0.75rem; padding: 0.25rem 0.75rem; font-size: 0.75rem; font-weight: 600; }
.card { background: #000; color: #fff; border-radius: 1rem; padding: 1.5rem; margin-top: 1rem; width: 100%; max-width: 36rem; box-sizing: border-box; }
.card form { display: flex; flex-direction: column; gap: 0.75rem; }
.card input, .card select { padding: 0.5rem; font-size: 1rem; border-radius: 0.5rem; }
.card button, .card summary { background: #84cc16; color: #000; font-weight: bold; border: 0; border-radius: 0.5rem; padding: 0.5rem 1.5rem; cursor: pointer; }
.accent { color: #a3e635; }
.chips { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.chip { background: #dbeafe; color: #1e40af; border-radius: 999px; padding: 0.25rem 0.75rem; display: flex; align-items: center; gap: 0.25rem; }
.chip form { display: inline; }
.chip button { background: none; color: #ef4444; padding: 0 0.25rem; }
.muted { color: #9ca3af; }
.summary { color: #93c5fd; font-size: 0.875rem; margin-left: 0.5rem; }
"#;

/// Escapes text for use in HTML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Wraps `body` in the branded page shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<header><h1>{heading}</h1></header>
<main>
<img class="logo" src="{logo}" alt="Cartoon man logo">
<div class="tagline">{tagline}</div>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        heading = TITLE,
        logo = LOGO_URL,
        tagline = TAGLINE,
        body = body,
    )
}

pub fn home() -> String {
    let body = r#"<div class="card">
<details>
<summary>Create a Group</summary>
<h2>Create a Group</h2>
<form method="post" action="/groups">
<label for="group-name">Group Name</label>
<input id="group-name" type="text" name="name" placeholder="e.g. Friday Night Crew" required>
<button type="submit">Generate Joining Link</button>
</form>
</details>
</div>
<div class="card">
<details>
<summary>Join a Group</summary>
<h2 class="accent">You&#39;ll need an invite, loser.</h2>
<p>Go make some friends!<br>(The invite is a direct URL, which the Group owner can send you.)</p>
</details>
</div>"#;

    layout(TITLE, body)
}

/// The page shown after creating a group, with the link to share.
pub fn created(name: &str, link: &Url) -> String {
    let body = format!(
        r#"<div class="card">
<h2>Create a Group: <span class="accent">{name}</span></h2>
<p class="accent">Group created! Share this link:</p>
<input type="text" value="{link}" readonly onfocus="this.select()">
<p><a class="accent" href="/">Done</a></p>
</div>"#,
        name = escape(name),
        link = escape(link.as_str()),
    );

    layout(TITLE, &body)
}

/// The join page for one group. `path` is the group's join path, which
/// every form posts back to.
pub fn join(name: &str, path: &str, roster: &Roster, session: Session) -> String {
    let mut body = String::new();
    let path = escape(path);

    // `write!` to a `String` can't fail
    let _ = write!(
        body,
        r#"<div class="card">
<h2>Join Group: <span class="accent">{}</span></h2>
"#,
        escape(name)
    );

    match session.member(roster) {
        None => {
            let _ = write!(
                body,
                r#"<form method="post" action="{path}">
<label for="member-name">Your Name</label>
<input id="member-name" type="text" name="name" placeholder="e.g. Alex" required>
<button type="submit">Join Group</button>
</form>
"#,
                path = path
            );
        }
        Some(member) => {
            let _ = write!(
                body,
                r#"<h3>Your Availability</h3>
<form method="post" action="{path}/availability">
<input type="date" name="date" required style="color-scheme: dark">
<select name="slot" required>
{options}</select>
<button type="submit">Add</button>
</form>
<div class="chips">
"#,
                path = path,
                options = slot_options(),
            );

            if member.availability.is_empty() {
                body.push_str("<span class=\"muted\">No availability added yet.</span>\n");
            }

            for entry in &member.availability {
                let _ = write!(
                    body,
                    r#"<span class="chip">{entry}<form method="post" action="{path}/availability/delete"><input type="hidden" name="date" value="{date}"><input type="hidden" name="slot" value="{slot}"><button type="submit" title="Delete">&times;</button></form></span>
"#,
                    entry = escape(&entry.to_string()),
                    path = path,
                    date = format_date(entry.date),
                    slot = entry.slot.value(),
                );
            }

            body.push_str("</div>\n<h3>Group Members:</h3>\n<ul>\n");

            for member in roster.members() {
                let _ = write!(body, "<li><strong>{}</strong>", escape(&member.name));

                if let Some(summary) = member.summary() {
                    let _ = write!(body, r#"<span class="summary">({})</span>"#, escape(&summary));
                }

                body.push_str("</li>\n");
            }

            body.push_str("</ul>\n");
        }
    }

    body.push_str("</div>");

    layout(&format!("{} | {}", name, TITLE), &body)
}

/// The page shown when a request fails.
pub fn error(message: &str) -> String {
    let body = format!(
        r#"<div class="card">
<h2>Something went wrong</h2>
<p>{}</p>
<p><a class="accent" href="/">Back</a></p>
</div>"#,
        escape(message)
    );

    layout(TITLE, &body)
}

fn slot_options() -> String {
    Slot::ALL
        .iter()
        .map(|slot| {
            let selected = if *slot == Slot::default() { " selected" } else { "" };

            format!(
                "<option value=\"{}\"{}>{}</option>\n",
                slot.value(),
                selected,
                slot.label()
            )
        })
        .collect()
}
