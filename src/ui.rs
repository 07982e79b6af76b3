use crate::models::{DayView, ProgressSummary, WeekView};
use crate::schedule::Category;

pub struct PageView {
    pub weeks: Vec<WeekView>,
    pub active_week: usize,
    pub progress: ProgressSummary,
    pub dark: bool,
}

const PREVIEW_ITEMS: usize = 3;

pub fn render_index(view: &PageView) -> String {
    let week_nav: String = view
        .weeks
        .iter()
        .enumerate()
        .map(|(index, week)| {
            let class = if index == view.active_week {
                "week-btn active"
            } else {
                "week-btn"
            };
            format!(
                r#"<a class="{class}" href="/?week={index}">{}</a>"#,
                escape_html(week.name)
            )
        })
        .collect();

    let cards: String = view
        .weeks
        .get(view.active_week)
        .map(|week| week.days.iter().map(render_card).collect())
        .unwrap_or_default();

    let progress = format!(
        "Progress: {}%  ({}/{} days)",
        view.progress.percent, view.progress.completed_count, view.progress.total_count
    );

    INDEX_HTML
        .replace("{{BODY_CLASS}}", if view.dark { "dark" } else { "" })
        .replace("{{PROGRESS}}", &progress)
        .replace("{{WEEK_NAV}}", &week_nav)
        .replace("{{CARDS}}", &cards)
}

fn render_card(day: &DayView) -> String {
    let category = match day.category {
        Category::Yellow => "yellow",
        Category::Red => "red",
        Category::Green => "green",
    };
    let (mark, width) = if day.complete { ("✓", "100%") } else { ("", "0%") };

    let preview = if day.annotations.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = day
            .annotations
            .iter()
            .take(PREVIEW_ITEMS)
            .map(|item| escape_html(item))
            .collect();
        format!(
            r#"<div class="vivitsu"><strong>ICAI repeated: </strong><span>{}</span></div>"#,
            items.join(" • ")
        )
    };

    format!(
        r#"<div class="card {category}">
  <div class="card-head">
    <div>
      <div class="title">Day {day_number}</div>
      <div class="meta">{title}</div>
      {preview}
    </div>
    <form method="post" action="/days/{day_number}/toggle">
      <button class="checkbox" type="submit" aria-label="Toggle day {day_number}">{mark}</button>
    </form>
  </div>
  <div class="progress-wrap"><div class="progress" style="width: {width}"></div></div>
  <div class="btn-row">
    <button class="small view-items" type="button" data-day="{day_number}" data-title="{title}">View important sums</button>
  </div>
</div>
"#,
        day_number = day.day,
        title = escape_html(day.title),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>CA Inter 30-Day Tracker</title>
  <style>
    :root {
      --bg: #f6f4ee;
      --ink: #23211d;
      --card: #ffffff;
      --muted: #6b675e;
      --yellow: #f2c94c;
      --red: #eb5757;
      --green: #27ae60;
      --shadow: 0 12px 30px rgba(35, 33, 29, 0.12);
    }

    body.dark {
      --bg: #16171b;
      --ink: #ecebe6;
      --card: #23252b;
      --muted: #a3a09a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    .topbar {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      padding: 18px 24px;
    }

    .top-controls {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    button.small,
    a.small {
      border: 1px solid var(--muted);
      background: transparent;
      color: var(--ink);
      border-radius: 8px;
      padding: 6px 12px;
      font: inherit;
      cursor: pointer;
      text-decoration: none;
    }

    #weeksNav {
      display: flex;
      gap: 8px;
      padding: 0 24px 12px;
      flex-wrap: wrap;
    }

    .week-btn {
      padding: 8px 14px;
      border-radius: 999px;
      color: var(--ink);
      text-decoration: none;
      border: 1px solid var(--muted);
    }

    .week-btn.active {
      background: var(--ink);
      color: var(--bg);
    }

    #tasks {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
      gap: 16px;
      padding: 0 24px 32px;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
      padding: 16px;
      border-left: 6px solid var(--muted);
      display: grid;
      gap: 12px;
    }

    .card.yellow { border-left-color: var(--yellow); }
    .card.red { border-left-color: var(--red); }
    .card.green { border-left-color: var(--green); }

    .card-head {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .title {
      font-weight: 600;
    }

    .meta,
    .vivitsu {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .checkbox {
      width: 32px;
      height: 32px;
      border-radius: 8px;
      border: 2px solid var(--muted);
      background: transparent;
      color: var(--ink);
      font-size: 1.1rem;
      cursor: pointer;
    }

    .progress-wrap {
      height: 6px;
      background: rgba(107, 103, 94, 0.2);
      border-radius: 999px;
      overflow: hidden;
    }

    .progress {
      height: 100%;
      background: var(--green);
    }

    #toasts {
      position: fixed;
      right: 18px;
      bottom: 18px;
      display: grid;
      gap: 8px;
    }

    .toast {
      background: var(--ink);
      color: var(--bg);
      padding: 10px 16px;
      border-radius: 10px;
      box-shadow: var(--shadow);
    }
  </style>
</head>
<body class="{{BODY_CLASS}}">
  <header class="topbar">
    <div>
      <h1>CA Inter 30-Day Tracker</h1>
      <div id="globalProgress">{{PROGRESS}}</div>
    </div>
    <div class="top-controls">
      <button class="small" type="button" id="darkBtn">Dark</button>
      <a class="small" href="/api/backup">Export</a>
      <button class="small" type="button" id="importBtn">Import</button>
      <button class="small" type="button" id="pomodoroBtn">Pomodoro</button>
      <button class="small" type="button" id="stopBtn">Stop</button>
      <button class="small" type="button" id="remindersBtn">Reminders</button>
    </div>
  </header>
  <nav id="weeksNav">{{WEEK_NAV}}</nav>
  <main id="tasks">{{CARDS}}</main>
  <div id="toasts"></div>
  <input type="file" id="fileImport" accept=".json" style="display:none" />
  <script>
    const baseTitle = document.title;
    const toastsEl = document.getElementById('toasts');
    const fileInput = document.getElementById('fileImport');

    const postJson = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderToasts = (toasts) => {
      toastsEl.innerHTML = '';
      toasts.forEach((toast) => {
        const el = document.createElement('div');
        el.className = 'toast';
        el.textContent = toast.message;
        toastsEl.appendChild(el);
      });
    };

    const pollToasts = async () => {
      const res = await fetch('/api/toasts');
      if (res.ok) {
        renderToasts((await res.json()).toasts);
      }
    };

    const playChime = () => {
      try {
        new Audio('/pomodoro-sound.mp3').play().catch(() => {});
      } catch (err) {}
    };

    const pollCountdown = async () => {
      const res = await fetch('/api/countdown');
      if (!res.ok) {
        return;
      }
      const status = await res.json();
      document.title = status.running
        ? `(${Math.ceil(status.remaining_secs / 60)}m) ${baseTitle}`
        : baseTitle;
      if (status.chime) {
        playChime();
      }
    };

    document.getElementById('darkBtn').addEventListener('click', async () => {
      const { dark } = await postJson('/api/dark-mode');
      document.body.classList.toggle('dark', dark);
    });

    document.getElementById('importBtn').addEventListener('click', () => fileInput.click());
    fileInput.addEventListener('change', () => {
      const file = fileInput.files[0];
      if (!file) {
        return;
      }
      const reader = new FileReader();
      reader.onload = async () => {
        const res = await fetch('/api/backup', { method: 'POST', body: reader.result });
        alert(res.ok ? 'Imported backup' : await res.text());
        if (res.ok) {
          window.location.reload();
        }
      };
      reader.readAsText(file);
    });

    document.getElementById('pomodoroBtn').addEventListener('click', () => {
      const minutes = prompt('Pomodoro minutes (work period)', '25');
      if (!minutes) {
        return;
      }
      postJson('/api/countdown/start', { minutes: parseInt(minutes, 10) || 1 })
        .then(pollCountdown)
        .catch((err) => alert(err.message));
    });

    document.getElementById('stopBtn').addEventListener('click', () => {
      postJson('/api/countdown/stop').then(pollCountdown).catch((err) => alert(err.message));
    });

    document.getElementById('remindersBtn').addEventListener('click', () => {
      const time = prompt('Add reminder time (24h HH:MM). You get a notification every minute it matches while the app is open.', '19:00');
      if (!time) {
        return;
      }
      postJson('/api/reminders', { time })
        .then(() => alert('Reminder added: ' + time))
        .catch((err) => alert(err.message));
    });

    document.querySelectorAll('.view-items').forEach((button) => {
      button.addEventListener('click', async () => {
        const day = button.dataset.day;
        const res = await fetch(`/api/days/${day}/annotations`);
        const items = res.ok ? (await res.json()).items : [];
        const text = items.length ? items.join('\n\n') : 'No vivitsu items for this day yet.';
        alert(`Day ${day}: ${button.dataset.title}\n\nImportant Vivitsu items:\n\n${text}`);
      });
    });

    window.addEventListener('focus', () => {
      postJson('/api/focus').then(pollToasts).catch(() => {});
    });

    setInterval(() => pollToasts().catch(() => {}), 1000);
    setInterval(() => pollCountdown().catch(() => {}), 1000);
  </script>
</body>
</html>
"#;
