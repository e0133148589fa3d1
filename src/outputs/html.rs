//! HTML digest rendering.
//!
//! One card per item, numbered from 1, or a single placeholder paragraph
//! when there are no items. Everything derived from crawled pages is
//! escaped before it is placed in the document.

use crate::models::{Digest, Item};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fmt::Write;

/// Shown instead of cards when no article qualified.
pub const EMPTY_PLACEHOLDER: &str = "Nenhum item relevante encontrado hoje.";

const STYLE: &str = "\
    body{font-family:Arial,Helvetica,sans-serif;line-height:1.6;color:#111;margin:0;background:#f9fafb}
    .container{max-width:900px;margin:0 auto;padding:32px}
    h1{font-size:28px;margin:0 0 8px}
    .date{color:#555;margin-bottom:24px}
    h2{font-size:20px;margin-top:24px}
    .card{background:#fff;border:1px solid #e5e7eb;border-radius:12px;padding:20px;margin-bottom:16px;box-shadow:0 1px 2px rgba(0,0,0,.04)}
    .badge{display:inline-block;background:#eef2ff;color:#3730a3;border-radius:9999px;padding:4px 10px;font-size:12px;margin-left:6px}
    a{text-decoration:none}
    a:hover{text-decoration:underline}
    .footer{font-size:12px;color:#6b7280;margin-top:24px}";

/// Render `items` into a digest stamped with the current local time.
pub fn render(items: &[Item]) -> Digest {
    render_at(items, &Local::now())
}

/// Render `items` into a digest stamped with `now`.
pub fn render_at<Tz>(items: &[Item], now: &DateTime<Tz>) -> Digest
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let filename = format!("dailysummaryTI_{}.html", now.format("%Y-%m-%d_%H%M"));
    let day = now.format("%d/%m/%Y").to_string();
    let stamp = now.format("%d/%m/%Y %H:%M").to_string();

    let mut content = String::new();
    if items.is_empty() {
        let _ = write!(content, "<p><em>{}</em></p>", EMPTY_PLACEHOLDER);
    }
    for (i, item) in items.iter().enumerate() {
        let _ = write!(
            content,
            r#"
    <div class="card">
      <h2>{n}. {title} <span class="badge">{category}</span></h2>
      <p><strong>Fonte:</strong> {source} · <a href="{url}" target="_blank" rel="noopener">Abrir link</a></p>
      <p>{summary}</p>
    </div>"#,
            n = i + 1,
            title = escape(&item.title),
            category = escape(&item.category),
            source = escape(&item.source),
            url = escape_attr(&item.url),
            summary = escape(&item.summary),
        );
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Resumo Diário · {day}</title>
  <style>
{STYLE}
  </style>
</head>
<body>
  <div class="container">
    <h1>Resumo Diário · Tecnologia e Segurança</h1>
    <div class="date">{stamp}</div>
    {content}
    <div class="footer">
      <p>Gerado automaticamente em {stamp} · arquivo: {filename}</p>
    </div>
  </div>
</body>
</html>"#
    );

    Digest { filename, html }
}

/// Escape `&`, `<` and `>` for HTML text.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape for a double-quoted attribute value.
fn escape_attr(s: &str) -> String {
    escape(s).replace('"', "&quot;")
}
