use crate::config::SheetLayout;
use crate::scoring::{build_scoreboard, UserScore};
use crate::status::User;
use crate::table::TrackerTable;

pub struct Page<'a> {
    pub title: &'a str,
    pub layout: &'a SheetLayout,
    pub table: &'a TrackerTable,
    /// Zero-based row to highlight, usually the current calendar month.
    pub current_month: Option<usize>,
}

pub fn render_index(page: &Page<'_>) -> String {
    let board = build_scoreboard(page.table, page.layout);
    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{TITLE}}", &escape_html(page.title))
        .replace("{{SCORE_A}}", &render_score(&board.user_a))
        .replace("{{SCORE_B}}", &render_score(&board.user_b))
        .replace("{{LABEL_A}}", &escape_html(&page.layout.user_a.label))
        .replace("{{LABEL_B}}", &escape_html(&page.layout.user_b.label))
        .replace("{{ROWS}}", &render_rows(page))
}

pub fn render_error(title: &str, message: &str) -> String {
    ERROR_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{MESSAGE}}", &escape_html(message))
}

fn render_score(score: &UserScore) -> String {
    format!(
        r#"<div class="stat" data-user="{user}">
        <span class="label">{label}</span>
        <span class="value"><span class="done">{done}</span>/{total}</span>
        <div class="progress"><div class="bar" style="width: {percent:.1}%"></div></div>
      </div>"#,
        user = score.user,
        label = escape_html(&score.label),
        done = score.done,
        total = score.total,
        percent = score.percent,
    )
}

fn render_rows(page: &Page<'_>) -> String {
    let mut html = String::new();
    for (index, row) in page.table.rows().iter().enumerate() {
        let class = if page.current_month == Some(index) {
            "month current"
        } else {
            "month"
        };
        html.push_str(&format!(
            r#"
        <div class="{class}">{month}</div>"#,
            month = escape_html(&row.month),
        ));
        for user in User::ALL {
            let status = row.status(user);
            html.push_str(&format!(
                r#"
        <form method="post" action="/toggle/{index}/{user}" data-row="{index}" data-user="{user}">
          <button type="submit" class="cell {status}" title="{status}">{icon}</button>
        </form>"#,
                icon = status.icon(),
            ));
        }
    }
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .progress {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .progress .bar {
      height: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .grid {
      display: grid;
      grid-template-columns: 1fr 2fr 2fr;
      gap: 8px 12px;
      align-items: center;
    }

    .grid .head {
      font-weight: 600;
    }

    .month {
      font-weight: 600;
    }

    .month.current {
      color: var(--accent);
    }

    .grid form {
      margin: 0;
    }

    .cell {
      width: 100%;
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 14px;
      background: white;
      padding: 10px;
      font-size: 1.3rem;
      cursor: pointer;
    }

    .cell:active {
      transform: scale(0.98);
    }

    .status {
      font-size: 0.95rem;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>🍩 {{TITLE}}</h1>
    </header>

    <section class="panel">
      {{SCORE_A}}
      {{SCORE_B}}
    </section>

    <section>
      <h2>📅 Calendario de seguimiento</h2>
      <p>Pulsa en el icono para cambiar tu estado.</p>
      <div class="grid">
        <div class="head">Mes</div>
        <div class="head">{{LABEL_A}}</div>
        <div class="head">{{LABEL_B}}</div>{{ROWS}}
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    let clearTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      clearTimeout(clearTimer);
      if (type === 'ok') {
        clearTimer = setTimeout(() => setStatus('', ''), 1500);
      }
    };

    const updateScore = (score) => {
      const card = document.querySelector(`.stat[data-user="${score.user}"]`);
      if (!card) {
        return;
      }
      card.querySelector('.done').textContent = score.done;
      card.querySelector('.bar').style.width = `${score.percent.toFixed(1)}%`;
    };

    const send = async (form) => {
      const res = await fetch('/api/toggle', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ row: Number(form.dataset.row), user: form.dataset.user })
      });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      const data = await res.json();
      const button = form.querySelector('button');
      button.textContent = data.icon;
      button.className = `cell ${data.status}`;
      button.title = data.status;
      updateScore(data.scores.user_a);
      updateScore(data.scores.user_b);
      setStatus(`Estado actualizado a: ${data.icon}`, 'ok');
    };

    document.querySelectorAll('.grid form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        send(form).catch((err) => setStatus(`⚠️ ${err.message}`, 'error'));
      });
    });
  </script>
</body>
</html>
"#;

const ERROR_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <h1>🍩 {{TITLE}}</h1>
    <div class="status" data-type="error">⚠️ {{MESSAGE}}</div>
    <p>Revisa la configuración de la hoja y vuelve a cargar la página.</p>
  </main>
</body>
</html>
"#;
