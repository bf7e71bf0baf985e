use crate::app::DATASET_ROUTE;
use crate::calendar::day_key;
use crate::models::DateRange;

pub fn render_index(initial: DateRange, picker: DateRange) -> String {
    INDEX_HTML
        .replace("{{INITIAL_START}}", &day_key(initial.start))
        .replace("{{INITIAL_END}}", &day_key(initial.end))
        .replace("{{PICKER_START}}", &day_key(picker.start))
        .replace("{{PICKER_END}}", &day_key(picker.end))
        .replace("{{DATASET_ROUTE}}", DATASET_ROUTE)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Hotel Bookings Dashboard</title>
  <style>
    :root {
      --bg: #294646;
      --ink: #1f2a2a;
      --muted: #6a7777;
      --accent: #007bff;
      --accent-2: #2f8f83;
      --card: #ffffff;
      --line: rgba(31, 42, 42, 0.1);
      --shadow: 0 4px 20px rgba(0, 0, 0, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Arial", sans-serif;
      padding: 32px 16px 48px;
    }

    .container {
      max-width: 900px;
      margin: auto;
      padding: 30px;
      background: var(--card);
      border-radius: 10px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 28px;
    }

    h1 {
      margin: 0;
      text-align: center;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      align-items: center;
      gap: 10px;
    }

    .controls label {
      font-size: 0.9rem;
      color: var(--muted);
    }

    .controls input {
      font: inherit;
      padding: 6px 10px;
      border: 1px solid var(--line);
      border-radius: 6px;
    }

    .controls a {
      color: var(--accent);
      font-size: 0.9rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .stat {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 14px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .chart svg {
      width: 100%;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent-2);
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .sparklines {
      display: flex;
      gap: 20px;
    }

    .sparkline {
      flex: 1;
    }

    .sparkline .chart-line {
      stroke: var(--accent-2);
      stroke-width: 1.5;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @media (max-width: 600px) {
      .sparklines {
        flex-direction: column;
      }
    }
  </style>
</head>
<body>
  <main class="container">
    <h1>Hotel Bookings Dashboard</h1>

    <section class="controls">
      <label for="range-start">From</label>
      <input id="range-start" type="date" value="{{PICKER_START}}" />
      <label for="range-end">To</label>
      <input id="range-end" type="date" value="{{PICKER_END}}" />
      <a href="{{DATASET_ROUTE}}">Download CSV</a>
    </section>

    <section class="panel">
      <div class="stat">
        <span class="label">Range</span>
        <span class="value" id="range-label">--</span>
      </div>
      <div class="stat">
        <span class="label">Bookings</span>
        <span class="value" id="booking-count">0</span>
      </div>
      <div class="stat">
        <span class="label">Visitors</span>
        <span class="value" id="visitor-count">0</span>
      </div>
    </section>

    <section class="chart">
      <h2>Number of Visitors per Day</h2>
      <svg id="time-series" viewBox="0 0 840 300" role="img" aria-label="Visitors per day"></svg>
    </section>

    <section class="chart">
      <h2>Number of Visitors per Country</h2>
      <svg id="countries" viewBox="0 0 840 300" role="img" aria-label="Visitors per country"></svg>
    </section>

    <section class="sparklines">
      <div class="sparkline chart">
        <h2>Adults Visitors</h2>
        <svg id="sparkline-adults" viewBox="0 0 400 120" role="img" aria-label="Adults"></svg>
      </div>
      <div class="sparkline chart">
        <h2>Children Visitors</h2>
        <svg id="sparkline-children" viewBox="0 0 400 120" role="img" aria-label="Children"></svg>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const INITIAL_RANGE = ['{{INITIAL_START}}', '{{INITIAL_END}}'];

    const escapeMarkup = (value) => String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;');

    const scaleFor = (values, height, top, bottom) => {
      const max = Math.max(1, ...values);
      return (value) => height - bottom - (value / max) * (height - top - bottom);
    };

    const yTicks = (values, width, height, paddingX, top, bottom) => {
      const max = Math.max(1, ...values);
      const y = scaleFor(values, height, top, bottom);
      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = Math.round((max * i) / 4);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${value}</text>`;
      }
      return grid;
    };

    const renderLineChart = (svg, points) => {
      const width = 840;
      const height = 300;
      const paddingX = 48;
      const top = 16;
      const bottom = 32;
      const values = points.map((point) => point.value);
      const y = scaleFor(values, height, top, bottom);
      const step = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const x = (index) => paddingX + index * step;

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');
      const labelEvery = Math.max(1, Math.ceil(points.length / 10));
      const labels = points
        .map((point, index) => index % labelEvery === 0
          ? `<text class="chart-label" x="${x(index)}" y="${height - 10}" text-anchor="middle">${escapeMarkup(point.label)}</text>`
          : '')
        .join('');
      const circles = points.length <= 60
        ? points.map((point, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(point.value)}" r="3" />`).join('')
        : '';

      svg.innerHTML = `${yTicks(values, width, height, paddingX, top, bottom)}<path class="chart-line" d="${path}" />${circles}${labels}`;
    };

    const renderBarChart = (svg, bars) => {
      const width = 840;
      const height = 300;
      const paddingX = 48;
      const top = 16;
      const bottom = 32;
      const values = bars.map((bar) => bar.value);
      const y = scaleFor(values, height, top, bottom);
      const slot = (width - paddingX * 2) / bars.length;
      const barWidth = Math.max(2, slot * 0.7);

      const rects = bars
        .map((bar, index) => {
          const x = paddingX + index * slot + (slot - barWidth) / 2;
          const yPos = y(bar.value);
          return `<rect class="chart-bar" x="${x}" y="${yPos}" width="${barWidth}" height="${height - bottom - yPos}"><title>${escapeMarkup(bar.label)}: ${bar.value}</title></rect>`
            + `<text class="chart-label" x="${x + barWidth / 2}" y="${height - 10}" text-anchor="middle">${escapeMarkup(bar.label)}</text>`;
        })
        .join('');

      svg.innerHTML = `${yTicks(values, width, height, paddingX, top, bottom)}${rects}`;
    };

    const renderSparkline = (svg, values) => {
      const width = 400;
      const height = 120;
      const y = scaleFor(values, height, 6, 6);
      const step = values.length > 1 ? width / (values.length - 1) : 0;
      const path = values
        .map((value, index) => `${index === 0 ? 'M' : 'L'} ${(index * step).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');
      svg.innerHTML = `<path class="chart-line" d="${path}" />`;
    };

    class DashboardController {
      constructor() {
        this.timeSeries = document.getElementById('time-series');
        this.countries = document.getElementById('countries');
        this.adults = document.getElementById('sparkline-adults');
        this.children = document.getElementById('sparkline-children');
        this.rangeLabel = document.getElementById('range-label');
        this.bookingCount = document.getElementById('booking-count');
        this.visitorCount = document.getElementById('visitor-count');
        this.status = document.getElementById('status');
        this.pending = 0;
      }

      setStatus(message, type) {
        this.status.textContent = message;
        this.status.dataset.type = type || '';
      }

      async update(start, end) {
        const request = ++this.pending;
        const params = new URLSearchParams({ start, end });
        const res = await fetch(`/api/dashboard?${params}`);
        if (!res.ok) {
          throw new Error((await res.text()) || 'Unable to load dashboard');
        }
        const snapshot = await res.json();
        if (request === this.pending) {
          this.render(snapshot);
          this.setStatus('', '');
        }
      }

      render(snapshot) {
        const daily = snapshot.daily.length
          ? snapshot.daily.map((point) => ({ label: point.date.slice(5), value: point.total_visitors }))
          : [{ label: '', value: 0 }];
        const countries = snapshot.countries.length
          ? snapshot.countries.map((entry) => ({ label: entry.country, value: entry.total_visitors }))
          : [{ label: '', value: 0 }];

        renderLineChart(this.timeSeries, daily);
        renderBarChart(this.countries, countries);
        renderSparkline(this.adults, snapshot.adults.length ? snapshot.adults : [0]);
        renderSparkline(this.children, snapshot.children.length ? snapshot.children : [0]);

        const visitors = snapshot.daily.reduce((sum, point) => sum + point.total_visitors, 0);
        this.rangeLabel.textContent = `${snapshot.start.slice(5)} / ${snapshot.end.slice(5)}`;
        this.bookingCount.textContent = snapshot.record_count;
        this.visitorCount.textContent = visitors;
      }
    }

    const controller = new DashboardController();
    const startInput = document.getElementById('range-start');
    const endInput = document.getElementById('range-end');

    const onRangeChange = () => {
      if (startInput.value && endInput.value) {
        controller.update(startInput.value, endInput.value)
          .catch((err) => controller.setStatus(err.message, 'error'));
      }
    };

    startInput.addEventListener('change', onRangeChange);
    endInput.addEventListener('change', onRangeChange);

    controller.update(...INITIAL_RANGE).catch((err) => controller.setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
