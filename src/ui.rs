use crate::calendar;
use crate::models::{OptionLists, PickerResponse, Selection};
use std::fmt::Display;

const BANNER: &str = "+-------------------+\n¦      내 생일      ¦\n¦   1위 노래 찾기   ¦\n+-------------------+";

pub fn render_index(picker: &PickerResponse) -> Result<String, serde_json::Error> {
    let initial = serde_json::to_string(&picker.selection)?.replace('<', "\\u003c");
    let OptionLists {
        years,
        months,
        days,
        day_disabled,
    } = &picker.options;
    let selection = &picker.selection;

    Ok(INDEX_HTML
        .replace("{{BANNER}}", BANNER)
        .replace(
            "{{YEAR_SELECT}}",
            &render_select("year", "생년", years, &selection.year, false),
        )
        .replace(
            "{{MONTH_SELECT}}",
            &render_select("month", "월", months, &selection.month, false),
        )
        .replace(
            "{{DAY_SELECT}}",
            &render_select("day", "일", days, &selection.day, *day_disabled),
        )
        .replace("{{RESULT}}", &render_result(selection))
        .replace("{{INITIAL}}", &initial))
}

fn render_result(selection: &Selection) -> String {
    let Selection { year, month, day } = selection;
    if calendar::parse_composed(year, month, day).is_none() {
        return String::new();
    }
    let date = format!("{year}-{month}-{day}");
    format!(r#"선택한 날짜: <a href="/?date={date}">{date}</a>"#)
}

fn render_select<T: Display>(
    id: &str,
    empty_label: &str,
    values: &[T],
    selected: &str,
    disabled: bool,
) -> String {
    let mut html = format!(
        r#"<select id="{id}" name="{id}" data-field="{id}"{}>"#,
        if disabled { " disabled" } else { "" }
    );
    html.push_str(&format!(r#"<option value="">{empty_label}</option>"#));
    for value in values {
        let value = value.to_string();
        let marker = if value == selected { " selected" } else { "" };
        html.push_str(&format!(r#"<option value="{value}"{marker}>{value}</option>"#));
    }
    html.push_str("</select>");
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>내 생일 1위 노래 찾기</title>
  <meta name="description" content="내가 태어난 날 1위 노래는?" />
  <style>
    :root {
      --bg: #101010;
      --ink: #e8e8e8;
      --accent: #7cf29c;
      --muted: #8a8a8a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "D2Coding", "Menlo", monospace;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    main {
      width: min(520px, 100%);
      display: grid;
      gap: 28px;
      justify-items: center;
    }

    h1 {
      margin: 0;
      font-size: 1rem;
      font-weight: 400;
      white-space: pre;
      color: var(--accent);
    }

    .picker {
      display: flex;
      gap: 10px;
      width: 100%;
    }

    select {
      flex: 1;
      padding: 10px 12px;
      background: transparent;
      color: var(--ink);
      border: 1px solid var(--muted);
      font: inherit;
    }

    select:disabled {
      opacity: 0.4;
    }

    .result {
      min-height: 1.4em;
      color: var(--muted);
    }

    .result a {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main>
    <h1>{{BANNER}}</h1>
    <form class="picker" id="picker" onsubmit="return false;">
      {{YEAR_SELECT}}
      {{MONTH_SELECT}}
      {{DAY_SELECT}}
    </form>
    <p class="result" id="result">{{RESULT}}</p>
  </main>
  <script>
    let selection = {{INITIAL}};
    const resultEl = document.getElementById('result');
    const selects = {
      year: document.getElementById('year'),
      month: document.getElementById('month'),
      day: document.getElementById('day')
    };
    const emptyLabels = { year: '생년', month: '월', day: '일' };

    const fillSelect = (field, values, selected, disabled) => {
      const el = selects[field];
      el.innerHTML = '';
      const empty = document.createElement('option');
      empty.value = '';
      empty.textContent = emptyLabels[field];
      el.appendChild(empty);
      values.forEach((value) => {
        const option = document.createElement('option');
        option.value = String(value);
        option.textContent = String(value);
        el.appendChild(option);
      });
      el.value = selected;
      el.disabled = Boolean(disabled);
    };

    const clearBirthDate = () => {
      const url = new URL(window.location.href);
      url.searchParams.delete('date');
      window.history.replaceState(null, '', url);
      resultEl.textContent = '';
    };

    const showBirthDate = (date) => {
      const url = new URL(window.location.href);
      url.searchParams.set('date', date);
      window.history.replaceState(null, '', url);
      resultEl.textContent = '';
      const link = document.createElement('a');
      link.href = url.toString();
      link.textContent = date;
      resultEl.append('선택한 날짜: ', link);
    };

    const render = (data) => {
      selection = data.selection;
      fillSelect('year', data.options.years, selection.year, false);
      fillSelect('month', data.options.months, selection.month, false);
      fillSelect('day', data.options.days, selection.day, data.options.day_disabled);
      if (data.birth_date) {
        showBirthDate(data.birth_date);
      } else {
        clearBirthDate();
      }
    };

    // Changes run one at a time; each request starts from the previous response.
    let pending = Promise.resolve();

    const send = async (field, value) => {
      const res = await fetch('/api/picker', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ selection, change: { field, value } })
      });
      if (!res.ok) {
        resultEl.textContent = await res.text();
        return;
      }
      render(await res.json());
    };

    const change = (field, value) => {
      pending = pending
        .then(() => send(field, value))
        .catch((err) => {
          resultEl.textContent = err.message;
        });
      return pending;
    };

    Object.entries(selects).forEach(([field, el]) => {
      el.addEventListener('change', (event) => {
        change(field, event.target.value);
      });
    });
  </script>
</body>
</html>
"#;
