use crate::models::Settings;

pub fn render_index(exercise_names: &[String], settings: &Settings) -> String {
    let options: String = exercise_names
        .iter()
        .map(|name| {
            let name = escape_html(name);
            format!(r#"<option value="{name}">{name}</option>"#)
        })
        .collect();

    INDEX_HTML
        .replace("{{OPTIONS}}", &options)
        .replace("{{UNIT}}", settings.weight_unit.label())
        .replace("{{THEME}}", if settings.dark_mode { "dark" } else { "light" })
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
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
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Your Stats</title>
  <style>
    :root {
      --bg: #f4f1fb;
      --ink: #1f1d2b;
      --muted: #6b6880;
      --card: #ffffff;
      --avg: #7c3aed;
      --max: #2563eb;
      --grid: rgba(31, 29, 43, 0.08);
    }

    [data-theme="dark"] {
      --bg: #1e293b;
      --ink: #e2e8f0;
      --muted: #93c5fd;
      --card: rgba(255, 255, 255, 0.08);
      --grid: rgba(255, 255, 255, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 20px;
      box-shadow: 0 12px 32px rgba(31, 29, 43, 0.12);
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    select, button {
      font: inherit;
      padding: 8px 14px;
      border-radius: 999px;
      border: 1px solid var(--grid);
      background: transparent;
      color: inherit;
      cursor: pointer;
    }

    button.active {
      background: var(--avg);
      border-color: var(--avg);
      color: #fff;
    }

    .summary {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .metric span {
      display: block;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .metric strong {
      font-size: 1.6rem;
    }

    svg {
      width: 100%;
      height: 280px;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 40px 0;
    }

    .legend {
      display: flex;
      gap: 16px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .legend i {
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 50%;
      margin-right: 6px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Your Stats</h1>
      <p class="subtitle">Track your progress</p>
    </header>

    <section class="card controls">
      <select id="exercise">
        <option value="">Choose an exercise</option>
        {{OPTIONS}}
      </select>
      <button data-preset="7d">7 days</button>
      <button data-preset="30d" class="active">30 days</button>
      <button data-preset="90d">90 days</button>
      <button data-preset="1y">1 year</button>
      <button data-preset="all">All</button>
    </section>

    <section class="card summary" id="summary"></section>

    <section class="card">
      <div class="legend">
        <span><i style="background: var(--avg)"></i>Average weight</span>
        <span><i style="background: var(--max)"></i>Max weight</span>
      </div>
      <div id="chart"><p class="empty">Select an exercise to see your progress.</p></div>
    </section>
  </main>

  <script>
    const UNIT = '{{UNIT}}';
    const LBS_PER_KG = 2.20462;
    const exerciseSelect = document.getElementById('exercise');
    const presetButtons = document.querySelectorAll('button[data-preset]');
    const summaryEl = document.getElementById('summary');
    const chartEl = document.getElementById('chart');
    let preset = '30d';

    const display = (kg) => (UNIT === 'lbs' ? kg * LBS_PER_KG : kg);

    const renderSummary = (summary) => {
      if (!summary) {
        summaryEl.innerHTML = '';
        return;
      }
      summaryEl.innerHTML = `
        <div class="metric"><span>Personal record</span><strong>${summary.personal_record_display}</strong></div>
        <div class="metric"><span>Sessions</span><strong>${summary.sessions}</strong></div>
        <div class="metric"><span>Total sets</span><strong>${summary.total_sets}</strong></div>
        <div class="metric"><span>Total reps</span><strong>${summary.total_reps}</strong></div>`;
    };

    const polyline = (points, key, scaleX, scaleY, color) => {
      const coords = points.map((p, i) => `${scaleX(i)},${scaleY(display(p[key]))}`).join(' ');
      const dots = points
        .map((p, i) => `<circle cx="${scaleX(i)}" cy="${scaleY(display(p[key]))}" r="4" fill="${color}"><title>${p.date}: ${display(p[key]).toFixed(1)}${UNIT}</title></circle>`)
        .join('');
      return `<polyline fill="none" stroke="${color}" stroke-width="2.5" points="${coords}" />${dots}`;
    };

    const renderChart = (points) => {
      if (!exerciseSelect.value) {
        chartEl.innerHTML = '<p class="empty">Select an exercise to see your progress.</p>';
        return;
      }
      if (points.length === 0) {
        chartEl.innerHTML = '<p class="empty">No weighted sets logged in this range.</p>';
        return;
      }

      const width = 800;
      const height = 280;
      const pad = 36;
      const values = points.flatMap((p) => [display(p.avgWeight), display(p.maxWeight)]);
      const min = Math.min(...values);
      const max = Math.max(...values);
      const span = max - min || 1;
      const scaleX = (i) => (points.length === 1 ? width / 2 : pad + (i * (width - 2 * pad)) / (points.length - 1));
      const scaleY = (v) => height - pad - ((v - min) / span) * (height - 2 * pad);
      const labels = points
        .map((p, i) => `<text x="${scaleX(i)}" y="${height - 8}" font-size="11" text-anchor="middle" fill="currentColor">${p.date.slice(5)}</text>`)
        .join('');

      chartEl.innerHTML = `
        <svg viewBox="0 0 ${width} ${height}" preserveAspectRatio="none">
          <line x1="${pad}" y1="${height - pad}" x2="${width - pad}" y2="${height - pad}" stroke="var(--grid)" />
          ${polyline(points, 'avgWeight', scaleX, scaleY, 'var(--avg)')}
          ${polyline(points, 'maxWeight', scaleX, scaleY, 'var(--max)')}
          ${labels}
        </svg>`;
    };

    const loadStats = async () => {
      const params = new URLSearchParams({ exercise: exerciseSelect.value, preset });
      const res = await fetch(`/api/stats?${params}`);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Unable to load stats');
      }
      const stats = await res.json();
      renderSummary(stats.summary);
      renderChart(stats.points);
    };

    const refresh = () => {
      loadStats().catch((err) => {
        const message = document.createElement('p');
        message.className = 'empty';
        message.textContent = err.message;
        chartEl.replaceChildren(message);
      });
    };

    presetButtons.forEach((button) => {
      button.addEventListener('click', () => {
        preset = button.dataset.preset;
        presetButtons.forEach((b) => b.classList.toggle('active', b === button));
        refresh();
      });
    });

    exerciseSelect.addEventListener('change', refresh);
  </script>
</body>
</html>
"#;
