use crate::commit::{Field, LABEL_MAX_CHARS};
use crate::models::CountdownResponse;

pub fn render_index(view: &CountdownResponse, flagged: &[Field]) -> String {
    let flag_class = |field: Field| {
        if flagged.contains(&field) {
            r#" class="flagged""#
        } else {
            ""
        }
    };

    // Label goes in last so user text is never re-scanned for placeholders.
    INDEX_HTML
        .replace("{{TARGET}}", &view.target)
        .replace("{{DAYS}}", &view.days)
        .replace("{{HOURS}}", &view.hours)
        .replace("{{MINUTES}}", &view.minutes)
        .replace("{{SECONDS}}", &view.seconds)
        .replace("{{LABEL_MAX}}", &LABEL_MAX_CHARS.to_string())
        .replace("{{LABEL_FLAG}}", flag_class(Field::Label))
        .replace("{{DATE_FLAG}}", flag_class(Field::Date))
        .replace("{{LABEL}}", &escape_html(&view.label))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
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
  <title>Countdown</title>
  <style>
    :root {
      --bg: #1f1b24;
      --ink: #ffffff;
      --error: #ff4d4d;
      --focus: #bfa8a6;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      display: flex;
      flex-direction: column;
      align-items: center;
    }

    .event {
      display: flex;
      font-weight: 500;
      font-size: 4rem;
    }

    .timer {
      margin-top: 1rem;
      display: flex;
      flex-direction: row;
      flex-wrap: wrap;
      justify-content: space-between;
    }

    .section {
      display: flex;
      flex-direction: column;
      justify-content: center;
      align-items: center;
      margin: 0 1.8rem;
    }

    .number {
      font-size: 5rem;
      font-variant-numeric: tabular-nums;
    }

    .unit {
      font-size: 1.5rem;
    }

    .input-field {
      margin-top: 16rem;
      display: flex;
    }

    .input-field input {
      background: none;
      color: var(--ink);
      border: 1px solid var(--ink);
      border-radius: 7px;
      padding: .6rem;
      font-size: 1.2rem;
      height: 3rem;
      outline: none;
      transition: border-color 150ms ease;
    }

    .input-field input.invalid {
      border-color: var(--error);
    }

    .input-field input.flagged {
      animation: flag-border 600ms step-end;
    }

    @keyframes flag-border {
      from {
        border-color: var(--error);
      }
    }

    #eventName {
      width: 13rem;
      margin-right: 1rem;
      cursor: pointer;
    }

    #eventName::placeholder {
      color: var(--ink);
      opacity: 0.5;
    }

    #eventDate {
      width: 16.5rem;
    }

    #eventDate::-webkit-calendar-picker-indicator {
      filter: invert(1);
    }

    #eventDate::-webkit-datetime-edit-day-field:focus,
    #eventDate::-webkit-datetime-edit-month-field:focus,
    #eventDate::-webkit-datetime-edit-hour-field:focus,
    #eventDate::-webkit-datetime-edit-minute-field:focus,
    #eventDate::-webkit-datetime-edit-year-field:focus {
      background-color: var(--focus);
      color: var(--ink);
      outline: none;
    }

    .save {
      background: none;
      outline: none;
      border: none;
      margin-left: 1rem;
      color: var(--ink);
      cursor: pointer;
    }

    .save svg {
      width: 2.5rem;
      height: 2.5rem;
    }

    .save:active svg {
      opacity: 0.5;
    }

    @media (max-width: 600px) {
      .event {
        font-size: 2.6rem;
      }
      .number {
        font-size: 3rem;
      }
      .input-field {
        margin-top: 6rem;
        flex-direction: column;
        gap: 1rem;
      }
    }
  </style>
</head>
<body>
  <main class="app" data-target="{{TARGET}}">
    <div class="event" id="label">{{LABEL}}</div>

    <section class="timer">
      <div class="section">
        <div class="number" id="days">{{DAYS}}</div>
        <div class="unit">days</div>
      </div>
      <div class="section">
        <div class="number" id="hours">{{HOURS}}</div>
        <div class="unit">hours</div>
      </div>
      <div class="section">
        <div class="number" id="minutes">{{MINUTES}}</div>
        <div class="unit">minutes</div>
      </div>
      <div class="section">
        <div class="number" id="seconds">{{SECONDS}}</div>
        <div class="unit">seconds</div>
      </div>
    </section>

    <form class="input-field" id="event-form" method="post" action="/event">
      <input id="eventName"{{LABEL_FLAG}} name="label" placeholder="Event name" maxlength="{{LABEL_MAX}}" autocomplete="off" />
      <input id="eventDate"{{DATE_FLAG}} name="date" type="datetime-local" />
      <button class="save" type="submit" aria-label="Save">
        <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.8" stroke-linecap="round" stroke-linejoin="round">
          <path d="M5 3h11l3 3v13a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V3z" />
          <path d="M8 3v5h7V3" />
          <rect x="8" y="13" width="8" height="6" rx="1" />
        </svg>
      </button>
    </form>
  </main>

  <script>
    const labelEl = document.getElementById('label');
    const daysEl = document.getElementById('days');
    const hoursEl = document.getElementById('hours');
    const minutesEl = document.getElementById('minutes');
    const secondsEl = document.getElementById('seconds');
    const form = document.getElementById('event-form');
    const inputs = {
      label: document.getElementById('eventName'),
      date: document.getElementById('eventDate')
    };

    const FLAG_MS = 600;
    const TICK_MS = 1000;

    const flag = (field) => {
      const input = inputs[field];
      if (!input) {
        return;
      }
      input.classList.add('invalid');
      setTimeout(() => input.classList.remove('invalid'), FLAG_MS);
    };

    const updateUI = (data) => {
      labelEl.textContent = data.label;
      daysEl.textContent = data.days;
      hoursEl.textContent = data.hours;
      minutesEl.textContent = data.minutes;
      secondsEl.textContent = data.seconds;
    };

    const refresh = async () => {
      const res = await fetch('/api/countdown');
      if (!res.ok) {
        throw new Error('Unable to load countdown');
      }
      updateUI(await res.json());
    };

    // Offset in effect on the picked date, not today, so DST is honoured.
    const offsetFor = (value) => {
      const picked = new Date(value);
      const at = Number.isNaN(picked.getTime()) ? new Date() : picked;
      return -at.getTimezoneOffset();
    };

    const commit = async () => {
      const res = await fetch('/api/event', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          label: inputs.label.value,
          date: inputs.date.value,
          utc_offset_minutes: offsetFor(inputs.date.value)
        })
      });

      if (res.status === 422) {
        const body = await res.json();
        body.fields.forEach(flag);
        return;
      }
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }

      updateUI(await res.json());
      inputs.label.value = '';
      inputs.date.value = '';
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      commit().catch((err) => console.error(err));
    });

    if (window.location.search) {
      history.replaceState(null, '', '/');
    }

    const interval = setInterval(() => {
      refresh().catch((err) => console.error(err));
    }, TICK_MS);
    window.addEventListener('pagehide', () => clearInterval(interval));
  </script>
</body>
</html>
"#;
