use crate::dates::shift_month;
use crate::view::{CalendarView, StatCard};

const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn render_index(view: &CalendarView) -> String {
    let (prev_year, prev_month) = shift_month(view.year, view.month, -1);
    let (next_year, next_month) = shift_month(view.year, view.month, 1);

    let summary = &view.summary;
    let working = render_card("working", "Working days", &summary.working);
    let required = render_card("required", "Office required", &summary.required);
    let office = render_card("office", "In office", &summary.office);
    let balance = render_card("balance", "Balance", &summary.balance);

    INDEX_HTML
        .replace("{{TITLE}}", &format!("{} {}", view.month_name, view.year))
        .replace("{{PREV}}", &format!("/calendar/{prev_year}/{}", prev_month - 1))
        .replace("{{NEXT}}", &format!("/calendar/{next_year}/{}", next_month - 1))
        .replace("{{GRID}}", &render_grid(view))
        .replace("{{CARD_WORKING}}", &working)
        .replace("{{CARD_REQUIRED}}", &required)
        .replace("{{CARD_OFFICE}}", &office)
        .replace("{{CARD_BALANCE}}", &balance)
}

fn render_grid(view: &CalendarView) -> String {
    let mut html = String::new();
    for name in WEEKDAY_HEADERS {
        html.push_str(&format!("<div class=\"weekday\">{name}</div>"));
    }
    for _ in 0..view.leading_blanks {
        html.push_str("<div class=\"day empty\"></div>");
    }
    for cell in &view.cells {
        html.push_str(&format!(
            "<div class=\"{classes}\" data-date=\"{date}\"><span class=\"num\">{day}</span>\
             <span class=\"label\" id=\"status-{date}\">{label}</span></div>",
            classes = cell.class_attr(),
            date = cell.date,
            day = cell.day,
            label = cell.label,
        ));
    }
    html
}

fn render_card(name: &str, title: &str, card: &StatCard) -> String {
    format!(
        "<div class=\"{classes}\" id=\"card-{name}\"><span class=\"title\">{title}</span>\
         <span class=\"value\" id=\"stat-{name}\">{value}</span></div>",
        classes = card.class_attr(),
        value = card.value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateKey, Status};
    use crate::stats::DEFAULT_QUOTA_PERCENT;
    use crate::store::StatusStore;

    #[test]
    fn renders_month_with_statuses_and_navigation() {
        let mut store = StatusStore::new();
        store.set_status(DateKey::from_ymd(2024, 1, 3).unwrap(), Some(Status::PublicHoliday));
        let mut view = CalendarView::new(2024, 1);
        view.hydrate(&store, DEFAULT_QUOTA_PERCENT);

        let html = render_index(&view);
        assert!(html.contains("January 2024"));
        assert!(html.contains("href=\"/calendar/2023/11\""));
        assert!(html.contains("href=\"/calendar/2024/1\""));
        assert!(html.contains("class=\"day status-public-holiday\" data-date=\"2024-01-03\""));
        assert!(html.contains(">public holiday</span>"));
        assert!(html.contains("id=\"stat-required\">13</span>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn page_script_guards_destructive_input() {
        let html = render_index(&CalendarView::new(2024, 6));
        let import = html.find("getElementById('import-file')").unwrap();
        let confirm = html.find("confirm('Importing replaces all saved days. Continue?')").unwrap();
        let upload = html.find("fetch('/api/import'").unwrap();
        assert!(import < confirm && confirm < upload);

        let keydown = html.find("addEventListener('keydown'").unwrap();
        let modifiers = html.find("event.ctrlKey || event.metaKey || event.altKey").unwrap();
        let send = html.find("request('POST', '/api/key'").unwrap();
        assert!(keydown < modifiers && modifiers < send);
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Office Days</title>
  <style>
    :root {
      --ink: #2b2a28;
      --muted: #8b857d;
      --card: #ffffff;
      --office: #2f4858;
      --wfh: #86bbd8;
      --holiday: #f6ae2d;
      --absent: #c4c4c4;
      --public: #9c89b8;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #f8f3e6, #f9f2e9);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app { width: min(900px, 100%); display: grid; gap: 24px; }

    .calendar-header { display: flex; align-items: center; justify-content: space-between; }
    .calendar-header h2 { margin: 0; }
    .calendar-header a { color: var(--office); text-decoration: none; font-size: 1.4rem; }

    .stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
    .stat-card { background: var(--card); border-radius: 14px; padding: 14px; display: grid; gap: 6px; border: 2px solid transparent; }
    .stat-card .title { font-size: 0.8rem; text-transform: uppercase; color: var(--muted); }
    .stat-card .value { font-size: 1.6rem; font-weight: 600; }
    .stat-card.status-green { border-color: #3c9d5d; }
    .stat-card.status-red { border-color: #d1495b; }
    .stat-card.status-yellow { border-color: #edae49; }

    .grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 6px; }
    .weekday { text-align: center; font-size: 0.8rem; color: var(--muted); }
    .day { background: var(--card); border-radius: 10px; min-height: 72px; padding: 8px; cursor: pointer; display: grid; align-content: space-between; }
    .day.empty { background: transparent; cursor: default; }
    .day.weekend { opacity: 0.55; }
    .day .label { font-size: 0.75rem; text-transform: capitalize; }
    .day.status-office { background: var(--office); color: white; }
    .day.status-wfh { background: var(--wfh); }
    .day.status-holiday { background: var(--holiday); }
    .day.status-absent { background: var(--absent); }
    .day.status-public-holiday { background: var(--public); color: white; }

    .toolbar { display: flex; gap: 12px; align-items: center; }
    .toolbar a, .toolbar label, .toolbar button { font-size: 0.9rem; color: var(--office); cursor: pointer; background: none; border: none; }
    .toolbar input { display: none; }

    .modal { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.35); display: grid; place-items: center; opacity: 0; transition: opacity 300ms ease; }
    .modal.active { opacity: 1; }
    .modal.hidden { display: none; }
    .modal .panel { background: white; border-radius: 16px; padding: 24px; display: grid; gap: 12px; min-width: 280px; }
    .modal button { border: none; border-radius: 999px; padding: 10px 16px; cursor: pointer; }
  </style>
</head>
<body>
  <main class="app">
    <section class="stats">
      {{CARD_WORKING}}
      {{CARD_REQUIRED}}
      {{CARD_OFFICE}}
      {{CARD_BALANCE}}
    </section>

    <section id="calendar-container">
      <div class="calendar-header">
        <a href="{{PREV}}">&larr;</a>
        <h2>{{TITLE}}</h2>
        <a href="{{NEXT}}">&rarr;</a>
      </div>
      <div class="grid">{{GRID}}</div>
    </section>

    <section class="toolbar">
      <a href="/api/export">Export</a>
      <label for="import-file">Import</label>
      <input id="import-file" type="file" accept="application/json,.json" />
      <button type="button" id="open-shortcuts">Shortcuts</button>
    </section>
  </main>

  <div class="modal hidden" id="status-modal">
    <div class="panel">
      <h3 id="modal-date-display"></h3>
      <button type="button" data-status="office">Office</button>
      <button type="button" data-status="wfh">WFH</button>
      <button type="button" data-status="holiday">Holiday</button>
      <button type="button" data-status="absent">Absent</button>
      <button type="button" data-status="public-holiday">Public holiday</button>
      <button type="button" data-status="">Clear</button>
      <button type="button" id="close-modal">Cancel</button>
    </div>
  </div>

  <div class="modal hidden" id="shortcuts-modal">
    <div class="panel">
      <h3>Keyboard shortcuts</h3>
      <p>Hover a day or open it, then press: <b>O</b> office, <b>W</b> WFH, <b>H</b> holiday,
        <b>A</b> absent, <b>P</b> public holiday, <b>C</b> clear. <b>Esc</b> closes dialogs.</p>
      <button type="button" id="close-shortcuts">Close</button>
    </div>
  </div>

  <script>
    const statusModal = document.getElementById('status-modal');
    const shortcutsModal = document.getElementById('shortcuts-modal');
    let dialogDate = null;

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      return res.json();
    };

    const show = (modal) => {
      modal.classList.remove('hidden');
      requestAnimationFrame(() => modal.classList.add('active'));
    };

    const hide = (modal, settled) => {
      if (modal.classList.contains('hidden')) {
        return;
      }
      modal.classList.remove('active');
      setTimeout(() => {
        modal.classList.add('hidden');
        if (settled) {
          settled();
        }
      }, 300);
    };

    const applyCell = (cell) => {
      const dayEl = document.querySelector(`.day[data-date="${cell.date}"]`);
      if (!dayEl) {
        return;
      }
      dayEl.className = cell.classes.join(' ');
      document.getElementById(`status-${cell.date}`).innerText = cell.label;
    };

    const applySummary = (summary) => {
      ['working', 'required', 'office', 'balance'].forEach((name) => {
        document.getElementById(`card-${name}`).className = summary[name].classes.join(' ');
        document.getElementById(`stat-${name}`).innerText = summary[name].value;
      });
    };

    const applyDialog = (dialog) => {
      const state = dialog.status_dialog.state;
      if (state === 'open') {
        dialogDate = dialog.status_dialog.date;
        document.getElementById('modal-date-display').innerText = dialog.date_display;
        show(statusModal);
      } else if (state === 'closing') {
        hide(statusModal, () => request('POST', '/api/dialog/settled').then(applyDialog).catch(report));
      } else {
        dialogDate = null;
      }
      if (dialog.help_open) {
        show(shortcutsModal);
      } else {
        hide(shortcutsModal);
      }
    };

    const applyUpdate = (update) => {
      if (update.cell) {
        applyCell(update.cell);
      }
      applySummary(update.summary);
      applyDialog(update.dialog);
    };

    const report = (err) => alert(err.message);

    document.querySelectorAll('.day:not(.empty)').forEach((day) => {
      const date = day.getAttribute('data-date');
      day.addEventListener('mouseenter', () => request('POST', '/api/hover', { date }).catch(report));
      day.addEventListener('mouseleave', () => request('POST', '/api/hover', { date: null }).catch(report));
      day.addEventListener('click', () => request('POST', '/api/dialog/open', { date }).then(applyDialog).catch(report));
    });

    statusModal.querySelectorAll('button[data-status]').forEach((button) => {
      button.addEventListener('click', () => {
        const status = button.dataset.status || null;
        request('PUT', '/api/status', { date: dialogDate, status }).then(applyUpdate).catch(report);
      });
    });

    document.getElementById('close-modal').addEventListener('click', () => {
      request('POST', '/api/dialog/close').then(applyDialog).catch(report);
    });
    document.getElementById('open-shortcuts').addEventListener('click', () => {
      request('POST', '/api/help/open').then(applyDialog).catch(report);
    });
    document.getElementById('close-shortcuts').addEventListener('click', () => {
      request('POST', '/api/help/close').then(applyDialog).catch(report);
    });

    window.addEventListener('keydown', (event) => {
      if (event.ctrlKey || event.metaKey || event.altKey) {
        return;
      }
      if (event.target instanceof HTMLInputElement || event.key.length > 1 && event.key !== 'Escape') {
        return;
      }
      request('POST', '/api/key', { key: event.key }).then(applyUpdate).catch(report);
    });

    document.getElementById('import-file').addEventListener('change', async (event) => {
      const file = event.target.files[0];
      if (!file) {
        return;
      }
      if (!confirm('Importing replaces all saved days. Continue?')) {
        event.target.value = '';
        return;
      }
      try {
        const res = await fetch('/api/import', { method: 'POST', body: await file.text() });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const result = await res.json();
        result.cells.forEach(applyCell);
        applySummary(result.summary);
        alert(result.message);
      } catch (err) {
        report(err);
      }
      event.target.value = '';
    });
  </script>
</body>
</html>
"#;
