//! Standalone HTML pages wrapping rendered SVG.
//!
//! Pages are self-contained: the toolbar styles and the pan, zoom, fit and
//! reset script are inlined, so the file opens offline in any browser.
//! Multi-sheet pages keep every sheet in the DOM and swap the visible one
//! on a `shumoku:navigate` event carrying `{ sheetId }`.

use log::debug;
use shumoku_parser::ROOT_SHEET;

/// One sheet of a multi-sheet page.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlSheet {
    pub id: String,
    /// Shown in the breadcrumb for this sheet.
    pub title: String,
    /// `(sheet id, title)` pairs from the root down to this sheet.
    pub breadcrumb: Vec<(String, String)>,
    pub svg: String,
}

const STYLE: &str = r#"
*{box-sizing:border-box}
html,body{margin:0;height:100%;font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif}
.shumoku-viewer{position:relative;height:100vh;overflow:hidden;background:#f8fafc;touch-action:none}
.shumoku-viewer .sheet{position:absolute;inset:0}
.shumoku-viewer .sheet[hidden]{display:none}
.shumoku-viewer .sheet > svg{width:100%;height:100%;cursor:grab}
.toolbar{position:absolute;top:12px;right:12px;z-index:2;display:flex;gap:4px;padding:4px;border-radius:8px;background:#fff;box-shadow:0 1px 4px rgba(0,0,0,.15)}
.toolbar button{min-width:32px;height:32px;border:0;border-radius:6px;background:transparent;font-size:14px;cursor:pointer}
.toolbar button:hover{background:#e2e8f0}
.breadcrumb{position:absolute;top:12px;left:12px;z-index:2;display:flex;gap:6px;align-items:center;padding:6px 10px;border-radius:8px;background:#fff;box-shadow:0 1px 4px rgba(0,0,0,.15);font-size:13px}
.breadcrumb button{border:0;background:none;padding:0;color:#2563eb;cursor:pointer;font:inherit}
.breadcrumb .current{font-weight:600}
"#;

const TOOLBAR: &str = r#"<div class="toolbar" role="toolbar">
<button type="button" data-action="zoom-in" title="Zoom in">+</button>
<button type="button" data-action="zoom-out" title="Zoom out">&#8722;</button>
<button type="button" data-action="fit" title="Fit to screen">Fit</button>
<button type="button" data-action="reset" title="Reset view">Reset</button>
</div>"#;

const SCRIPT: &str = r#"
(function () {
  const root = document.querySelector('.shumoku-viewer');
  const originals = new WeakMap();
  const activeSvg = () => root.querySelector('.sheet:not([hidden]) > svg');
  const viewBox = (svg) => {
    const v = svg.viewBox.baseVal;
    return { x: v.x, y: v.y, width: v.width, height: v.height };
  };
  const setViewBox = (svg, b) => svg.setAttribute('viewBox', b.x + ' ' + b.y + ' ' + b.width + ' ' + b.height);
  const original = (svg) => {
    if (!originals.has(svg)) originals.set(svg, viewBox(svg));
    return originals.get(svg);
  };
  const fit = (svg) => {
    const o = original(svg);
    const r = svg.getBoundingClientRect();
    if (!r.width || !r.height) { setViewBox(svg, o); return; }
    const scale = Math.min(r.width / o.width, r.height / o.height) * 0.9;
    const w = r.width / scale, h = r.height / scale;
    setViewBox(svg, { x: o.x + o.width / 2 - w / 2, y: o.y + o.height / 2 - h / 2, width: w, height: h });
  };
  const zoom = (svg, factor, cx, cy) => {
    const b = viewBox(svg);
    if (cx === undefined) { cx = b.x + b.width / 2; cy = b.y + b.height / 2; }
    setViewBox(svg, { x: cx - (cx - b.x) / factor, y: cy - (cy - b.y) / factor, width: b.width / factor, height: b.height / factor });
  };
  const toSvg = (svg, e) => {
    const r = svg.getBoundingClientRect();
    const b = viewBox(svg);
    return { x: b.x + (e.clientX - r.left) / r.width * b.width, y: b.y + (e.clientY - r.top) / r.height * b.height };
  };
  const navigate = (sheetId) => document.dispatchEvent(new CustomEvent('shumoku:navigate', { detail: { sheetId } }));

  root.querySelectorAll('.sheet > svg').forEach((svg) => {
    original(svg);
    svg.removeAttribute('width');
    svg.removeAttribute('height');
  });

  root.addEventListener('wheel', (e) => {
    const svg = activeSvg();
    if (!svg) return;
    e.preventDefault();
    const p = toSvg(svg, e);
    zoom(svg, e.deltaY < 0 ? 1.1 : 1 / 1.1, p.x, p.y);
  }, { passive: false });

  let drag = null;
  root.addEventListener('pointerdown', (e) => {
    const svg = activeSvg();
    if (!svg || e.target.closest('.toolbar, .breadcrumb')) return;
    drag = { svg, x: e.clientX, y: e.clientY };
  });
  window.addEventListener('pointermove', (e) => {
    if (!drag) return;
    const r = drag.svg.getBoundingClientRect();
    const b = viewBox(drag.svg);
    const dx = (e.clientX - drag.x) * b.width / r.width;
    const dy = (e.clientY - drag.y) * b.height / r.height;
    drag.x = e.clientX;
    drag.y = e.clientY;
    setViewBox(drag.svg, { x: b.x - dx, y: b.y - dy, width: b.width, height: b.height });
  });
  window.addEventListener('pointerup', () => { drag = null; });

  root.querySelector('.toolbar').addEventListener('click', (e) => {
    const button = e.target.closest('[data-action]');
    const svg = activeSvg();
    if (!button || !svg) return;
    switch (button.dataset.action) {
      case 'zoom-in': zoom(svg, 1.2); break;
      case 'zoom-out': zoom(svg, 1 / 1.2); break;
      case 'fit': fit(svg); break;
      case 'reset': setViewBox(svg, original(svg)); break;
    }
  });

  root.addEventListener('click', (e) => {
    const crumb = e.target.closest('[data-navigate]');
    if (crumb) navigate(crumb.dataset.navigate);
  });
  root.addEventListener('dblclick', (e) => {
    const subgraph = e.target.closest('[data-has-sheet="true"]');
    if (subgraph) navigate(subgraph.dataset.sheetId);
  });

  document.addEventListener('shumoku:navigate', (e) => {
    const id = e.detail && e.detail.sheetId;
    const sheets = Array.from(root.querySelectorAll('.sheet[data-sheet-id]'));
    if (!sheets.some((sheet) => sheet.dataset.sheetId === id)) return;
    sheets.forEach((sheet) => { sheet.hidden = sheet.dataset.sheetId !== id; });
    const svg = activeSvg();
    if (svg) fit(svg);
  });

  window.addEventListener('load', () => {
    const svg = activeSvg();
    if (svg) fit(svg);
  });
})();
"#;

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + SCRIPT.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>");
    html.push_str(&escape_html(title));
    html.push_str("</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"shumoku-viewer\">\n");
    html.push_str(TOOLBAR);
    html.push('\n');
    html.push_str(body);
    html.push_str("</div>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Wraps a single SVG document in a viewer page.
pub fn render_html(svg: &str, title: &str) -> String {
    let mut body = String::from("<div class=\"sheet\">\n");
    body.push_str(svg);
    body.push_str("\n</div>\n");
    page(title, &body)
}

fn breadcrumb(sheet: &HtmlSheet) -> String {
    let mut nav = String::from("<nav class=\"breadcrumb\">");
    for (i, (id, title)) in sheet.breadcrumb.iter().enumerate() {
        if i > 0 {
            nav.push_str("<span>/</span>");
        }
        if id == &sheet.id {
            nav.push_str("<span class=\"current\">");
            nav.push_str(&escape_html(title));
            nav.push_str("</span>");
        } else {
            nav.push_str("<button type=\"button\" data-navigate=\"");
            nav.push_str(&escape_html(id));
            nav.push_str("\">");
            nav.push_str(&escape_html(title));
            nav.push_str("</button>");
        }
    }
    nav.push_str("</nav>");
    nav
}

/// Viewer page holding every sheet; only the root sheet (or the first one
/// when there is no root) starts visible.
pub fn render_sheets_html(title: &str, sheets: &[HtmlSheet]) -> String {
    let visible = sheets
        .iter()
        .position(|sheet| sheet.id == ROOT_SHEET)
        .unwrap_or(0);
    debug!(sheets = sheets.len(); "Rendering multi-sheet page");

    let mut body = String::new();
    for (i, sheet) in sheets.iter().enumerate() {
        body.push_str("<div class=\"sheet\" data-sheet-id=\"");
        body.push_str(&escape_html(&sheet.id));
        body.push('"');
        if i != visible {
            body.push_str(" hidden");
        }
        body.push_str(">\n");
        if sheet.breadcrumb.len() > 1 {
            body.push_str(&breadcrumb(sheet));
            body.push('\n');
        }
        body.push_str(&sheet.svg);
        body.push_str("\n</div>\n");
    }
    page(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(id: &str, breadcrumb: &[&str]) -> HtmlSheet {
        HtmlSheet {
            id: id.to_string(),
            title: id.to_string(),
            breadcrumb: breadcrumb
                .iter()
                .map(|id| (id.to_string(), id.to_string()))
                .collect(),
            svg: format!("<svg class=\"shumoku\" data-sheet-id=\"{id}\"></svg>"),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_single_page_embeds_svg_and_toolbar() {
        let html = render_html("<svg></svg>", "Lab <1>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Lab &lt;1&gt;</title>"));
        assert!(html.contains("<svg></svg>"));
        assert!(html.contains(r#"data-action="fit""#));
        assert!(html.contains(r#"data-action="reset""#));
    }

    #[test]
    fn test_only_root_sheet_starts_visible() {
        let html = render_sheets_html(
            "Campus",
            &[
                sheet("dc1", &["root", "dc1"]),
                sheet("root", &["root"]),
            ],
        );
        assert!(html.contains(r#"<div class="sheet" data-sheet-id="dc1" hidden>"#));
        assert!(html.contains(r#"<div class="sheet" data-sheet-id="root">"#));
        assert!(html.contains("shumoku:navigate"));
        assert!(html.contains(r#"data-navigate="root""#));
    }
}
