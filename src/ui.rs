use crate::errors::LOAD_FAILED;
use crate::models::RecordRow;
use crate::store::{LoadState, RecordStore};
use crate::survey::{ACTIVITY_OPTIONS, OTHER, OUTDOOR_OPTIONS, SATISFACTION_LEVELS, TIME_SLOTS};

pub fn render_index(store: &RecordStore) -> String {
    INDEX_HTML
        .replace("{{OUTDOOR_OPTIONS}}", &radio_group("outdoor", OUTDOOR_OPTIONS))
        .replace("{{ACTIVITY_OPTIONS}}", &checkbox_group("activity", ACTIVITY_OPTIONS))
        .replace("{{TIME_OPTIONS}}", &radio_group("time", TIME_SLOTS))
        .replace("{{SATISFACTION_OPTIONS}}", &satisfaction_group())
        .replace("{{OTHER}}", OTHER)
        .replace("{{COUNT}}", &store.records().len().to_string())
        .replace("{{RECORDS}}", &render_list(store))
}

/// Server-side list markup; the page script redraws it the same way after each load.
pub fn render_list(store: &RecordStore) -> String {
    match store.state() {
        LoadState::Failed(_) => format!(r#"<p class="load-error">{}</p>"#, escape_html(LOAD_FAILED)),
        LoadState::NotLoaded => r#"<p class="empty">불러오는 중...</p>"#.to_string(),
        LoadState::Ready if store.records().is_empty() => {
            r#"<p class="empty">아직 기록이 없습니다.</p>"#.to_string()
        }
        LoadState::Ready => store.rows().iter().map(render_row).collect(),
    }
}

pub fn render_row(row: &RecordRow) -> String {
    let tags: Vec<String> = row
        .activity_tags
        .iter()
        .map(|tag| format!(r#"<span class="activity-tag">{}</span>"#, escape_html(tag)))
        .collect();
    let satisfaction = format!(
        "{} {} / {}",
        row.satisfaction_emoji, row.satisfaction, row.important
    );

    format!(
        concat!(
            r#"<div class="record-row">"#,
            r#"<div class="record-location">{}</div>"#,
            r#"<div class="record-outdoor">{}</div>"#,
            r#"<div class="record-activity" title="{}">{}</div>"#,
            r#"<div class="record-time">{}</div>"#,
            r#"<div class="record-mood">{}</div>"#,
            r#"<div class="record-satisfaction" title="{}">{}</div>"#,
            r#"<div class="record-recommend">{}</div>"#,
            "</div>"
        ),
        escape_html(&row.location),
        escape_html(&row.outdoor),
        escape_html(&row.activity),
        tags.join(" "),
        escape_html(&row.time),
        escape_html(&row.mood),
        escape_html(&row.important),
        escape_html(satisfaction.trim()),
        escape_html(&row.recommend),
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn radio_group(name: &str, options: &[&str]) -> String {
    options
        .iter()
        .map(|option| {
            format!(
                r#"<label class="choice"><input type="radio" name="{name}" value="{value}" required /> {value}</label>"#,
                value = escape_html(option)
            )
        })
        .collect()
}

fn checkbox_group(name: &str, options: &[&str]) -> String {
    options
        .iter()
        .map(|option| {
            format!(
                r#"<label class="choice"><input type="checkbox" name="{name}" value="{value}" /> {value}</label>"#,
                value = escape_html(option)
            )
        })
        .collect()
}

fn satisfaction_group() -> String {
    SATISFACTION_LEVELS
        .iter()
        .map(|(label, emoji)| {
            format!(
                r#"<label class="choice"><input type="radio" name="satisfaction" value="{label}" required /> {emoji} {label}</label>"#
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>나의 휴식 공간</title>
  <style>
    :root {
      --bg-1: #eef6ee;
      --bg-2: #cfe8d3;
      --ink: #25302a;
      --accent: #4caf50;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6fbf4 60%, #ffffff 100%);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", "Noto Sans KR", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f6b62;
    }

    form {
      display: grid;
      gap: 18px;
    }

    fieldset {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 16px;
      padding: 14px 16px;
      display: flex;
      flex-wrap: wrap;
      gap: 10px 16px;
    }

    legend {
      font-weight: 600;
      padding: 0 6px;
    }

    .choice {
      display: inline-flex;
      align-items: center;
      gap: 6px;
    }

    input[type="text"], textarea {
      width: 100%;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    .etc {
      flex-basis: 100%;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .btn-export {
      background: var(--accent-2);
    }

    .records-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .record-row {
      display: grid;
      grid-template-columns: 1.2fr 0.8fr 2fr 0.8fr 1.2fr 1.6fr 1.4fr;
      gap: 10px;
      padding: 12px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      font-size: 0.95rem;
    }

    .activity-tag {
      display: inline-block;
      background: rgba(76, 175, 80, 0.14);
      color: #2e7d32;
      border-radius: 999px;
      padding: 2px 10px;
      margin: 2px 0;
      font-size: 0.85rem;
    }

    .load-error {
      color: #c63b2b;
    }

    .empty {
      color: #6f6a65;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart-card svg {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-label {
      fill: #6b645d;
      font-size: 11px;
    }

    @media (max-width: 700px) {
      .app {
        padding: 26px 18px;
      }
      .record-row {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>나의 휴식 공간</h1>
      <p class="subtitle">어디에서, 무엇을 하며 쉬는지 기록하고 다른 사람들의 휴식도 둘러보세요.</p>
    </header>

    <section>
      <form id="record-form">
        <label>1. 나만의 휴식 공간은 어디인가요?
          <input type="text" name="location" required />
        </label>
        <fieldset>
          <legend>2. 실내인가요, 야외인가요?</legend>
          {{OUTDOOR_OPTIONS}}
          <input class="etc" type="text" name="outdoor_etc" placeholder="{{OTHER}} 선택 시 직접 입력" />
        </fieldset>
        <fieldset>
          <legend>3. 그곳에서 주로 하는 활동 (여러 개 선택)</legend>
          {{ACTIVITY_OPTIONS}}
          <input class="etc" type="text" name="activity_etc" placeholder="{{OTHER}} 선택 시 직접 입력" />
        </fieldset>
        <fieldset>
          <legend>4. 얼마나 머무나요?</legend>
          {{TIME_OPTIONS}}
          <input class="etc" type="text" name="time_etc" placeholder="{{OTHER}} 선택 시 직접 입력" />
        </fieldset>
        <label>5. 그곳에서의 기분은?
          <input type="text" name="mood" />
        </label>
        <fieldset>
          <legend>6. 만족도</legend>
          {{SATISFACTION_OPTIONS}}
        </fieldset>
        <label>7. 휴식 공간에서 가장 중요한 것은?
          <input type="text" name="important" />
        </label>
        <label>8. 다른 사람에게 추천하고 싶은 점
          <input type="text" name="recommend" />
        </label>
        <label>9. 그곳에서의 기억
          <textarea name="memory" rows="3"></textarea>
        </label>
        <button type="submit">나의 휴식 공간 기록</button>
      </form>
    </section>

    <section>
      <div class="records-header">
        <h2>모두의 휴식 공간 (<span id="record-count">{{COUNT}}</span>)</h2>
        <button class="btn-export" id="export-excel" type="button">엑셀로 내보내기</button>
      </div>
      <div id="records-container">{{RECORDS}}</div>
    </section>

    <section class="charts">
      <div class="chart-card">
        <h2 id="activity-title">휴식 활동 선호도</h2>
        <svg id="activity-chart" viewBox="0 0 600 260" role="img" aria-label="활동 통계"></svg>
      </div>
      <div class="chart-card">
        <h2 id="time-title">휴식 시간대 비율</h2>
        <svg id="time-chart" viewBox="0 0 600 260" role="img" aria-label="시간대 통계"></svg>
      </div>
    </section>
  </main>

  <script>
    const recordForm = document.getElementById('record-form');
    const recordsContainer = document.getElementById('records-container');
    const recordCount = document.getElementById('record-count');
    const exportButton = document.getElementById('export-excel');
    const activityChartEl = document.getElementById('activity-chart');
    const timeChartEl = document.getElementById('time-chart');
    const activityTitle = document.getElementById('activity-title');
    const timeTitle = document.getElementById('time-title');
    const svgNs = 'http://www.w3.org/2000/svg';

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const svgEl = (tag, attrs, text) => {
      const node = document.createElementNS(svgNs, tag);
      Object.entries(attrs).forEach(([key, value]) => node.setAttribute(key, value));
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const showLoadError = (message) => {
      recordsContainer.replaceChildren(el('p', 'load-error', message));
    };

    const renderList = (listing) => {
      recordCount.textContent = listing.count;
      if (!listing.records.length) {
        recordsContainer.replaceChildren(el('p', 'empty', '아직 기록이 없습니다.'));
        return;
      }
      const rows = listing.records.map((record) => {
        const row = el('div', 'record-row');
        row.append(el('div', 'record-location', record.location));
        row.append(el('div', 'record-outdoor', record.outdoor));
        const activity = el('div', 'record-activity');
        activity.title = record.activity;
        record.activity_tags.forEach((tag, index) => {
          if (index > 0) activity.append(' ');
          activity.append(el('span', 'activity-tag', tag));
        });
        row.append(activity);
        row.append(el('div', 'record-time', record.time));
        row.append(el('div', 'record-mood', record.mood));
        const satisfaction = el(
          'div',
          'record-satisfaction',
          `${record.satisfaction_emoji} ${record.satisfaction} / ${record.important}`.trim()
        );
        satisfaction.title = record.important;
        row.append(satisfaction);
        row.append(el('div', 'record-recommend', record.recommend));
        return row;
      });
      recordsContainer.replaceChildren(...rows);
    };

    const emptyChart = (svg) => {
      svg.replaceChildren(svgEl('text', { class: 'chart-label', x: '50%', y: '50%', 'text-anchor': 'middle' }, '데이터가 없습니다'));
    };

    const drawBarChart = (svg, chart) => {
      svg.replaceChildren();
      if (!chart.bars.length) {
        emptyChart(svg);
        return;
      }
      const width = 600;
      const height = 260;
      const left = 36;
      const bottom = 40;
      const top = 16;
      const max = Math.max(...chart.bars.map((bar) => bar.count));
      const slot = (width - left - 12) / chart.bars.length;
      const scale = (height - top - bottom) / max;

      for (let i = 0; i <= max; i += Math.max(1, Math.ceil(max / 4))) {
        const y = height - bottom - i * scale;
        svg.append(svgEl('line', { x1: left, y1: y, x2: width - 12, y2: y, stroke: 'rgba(47,72,88,0.12)' }));
        svg.append(svgEl('text', { class: 'chart-label', x: left - 8, y: y + 4, 'text-anchor': 'end' }, String(i)));
      }

      chart.bars.forEach((bar, index) => {
        const barHeight = bar.count * scale;
        const x = left + index * slot + slot * 0.15;
        svg.append(svgEl('rect', {
          x,
          y: height - bottom - barHeight,
          width: slot * 0.7,
          height: barHeight,
          fill: chart.color,
          stroke: chart.border_color,
          'stroke-width': 1
        }));
        svg.append(svgEl('text', {
          class: 'chart-label',
          x: x + slot * 0.35,
          y: height - bottom + 16,
          'text-anchor': 'middle'
        }, bar.label));
      });
    };

    const drawPieChart = (svg, chart) => {
      svg.replaceChildren();
      if (!chart.slices.length) {
        emptyChart(svg);
        return;
      }
      const cx = 200;
      const cy = 130;
      const r = 110;
      const total = chart.slices.reduce((sum, slice) => sum + slice.count, 0);
      let angle = -Math.PI / 2;

      chart.slices.forEach((slice, index) => {
        const sweep = (slice.count / total) * Math.PI * 2;
        if (chart.slices.length === 1) {
          svg.append(svgEl('circle', { cx, cy, r, fill: slice.color }));
        } else {
          const x1 = cx + r * Math.cos(angle);
          const y1 = cy + r * Math.sin(angle);
          const x2 = cx + r * Math.cos(angle + sweep);
          const y2 = cy + r * Math.sin(angle + sweep);
          const large = sweep > Math.PI ? 1 : 0;
          svg.append(svgEl('path', {
            d: `M ${cx} ${cy} L ${x1} ${y1} A ${r} ${r} 0 ${large} 1 ${x2} ${y2} Z`,
            fill: slice.color,
            stroke: 'white',
            'stroke-width': 2
          }));
        }
        angle += sweep;

        const legendY = 40 + index * 22;
        svg.append(svgEl('rect', { x: 360, y: legendY - 11, width: 14, height: 14, fill: slice.color }));
        svg.append(svgEl('text', { class: 'chart-label', x: 382, y: legendY }, `${slice.label} (${slice.count})`));
      });
    };

    const renderCharts = async () => {
      const res = await fetch('/api/charts');
      if (!res.ok) {
        return;
      }
      const charts = await res.json();
      activityTitle.textContent = charts.activity.title;
      timeTitle.textContent = charts.time.title;
      drawBarChart(activityChartEl, charts.activity);
      drawPieChart(timeChartEl, charts.time);
    };

    const loadRecords = async () => {
      try {
        const res = await fetch('/api/records');
        if (!res.ok) {
          throw new Error(await res.text());
        }
        renderList(await res.json());
        await renderCharts();
      } catch (error) {
        console.error('Error loading records:', error);
        showLoadError(error.message || '데이터를 불러오는 데 실패했습니다.');
      }
    };

    const collectForm = () => {
      const formData = new FormData(recordForm);
      const text = (name) => (formData.get(name) || '').toString();
      return {
        location: text('location'),
        outdoor: text('outdoor'),
        outdoor_etc: text('outdoor_etc'),
        activity: formData.getAll('activity').map(String),
        activity_etc: text('activity_etc'),
        time: text('time'),
        time_etc: text('time_etc'),
        mood: text('mood'),
        satisfaction: text('satisfaction'),
        important: text('important'),
        recommend: text('recommend'),
        memory: text('memory')
      };
    };

    recordForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      const submitButton = recordForm.querySelector('button[type="submit"]');
      submitButton.disabled = true;
      submitButton.textContent = '저장 중...';

      try {
        const res = await fetch('/api/records', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(collectForm())
        });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const result = await res.json();
        alert(result.message);
        recordForm.reset();
        if (result.listing) {
          renderList(result.listing);
          await renderCharts();
        } else {
          showLoadError('데이터를 불러오는 데 실패했습니다. 설정을 확인하세요.');
        }
      } catch (error) {
        console.error('Error submitting record:', error);
        alert(error.message || '기록 저장에 실패했습니다.');
      } finally {
        submitButton.disabled = false;
        submitButton.textContent = '나의 휴식 공간 기록';
      }
    });

    exportButton.addEventListener('click', async () => {
      try {
        const res = await fetch('/export.xlsx');
        if (!res.ok) {
          alert(await res.text());
          return;
        }
        const blob = await res.blob();
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = 'my_relaxation_space_records.xlsx';
        link.click();
        URL.revokeObjectURL(link.href);
      } catch (error) {
        console.error('Error exporting records:', error);
        alert('엑셀 내보내기에 실패했습니다. 인터넷 연결을 확인하세요.');
      }
    });

    loadRecords();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn row_shows_each_tag_and_satisfaction() {
        let row = RecordRow::from(&Record {
            location: "<script>".to_string(),
            activity: "독서, 명상".to_string(),
            satisfaction: "좋음".to_string(),
            important: "조용함".to_string(),
            ..Record::default()
        });
        let html = render_row(&row);

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert_eq!(html.matches(r#"class="activity-tag""#).count(), 2);
        assert!(html.contains("😊 좋음 / 조용함"));
    }

    #[test]
    fn failed_load_replaces_list_with_error() {
        let mut store = RecordStore::default();
        store.replace(vec![Record {
            location: "카페".to_string(),
            ..Record::default()
        }]);
        store.fail("boom");

        let html = render_list(&store);
        assert!(html.contains("load-error"));
        assert!(!html.contains("record-row"));
    }

    #[test]
    fn index_renders_form_vocabulary() {
        let html = render_index(&RecordStore::default());
        for option in TIME_SLOTS.iter().chain(OUTDOOR_OPTIONS).chain(ACTIVITY_OPTIONS) {
            assert!(html.contains(&format!(r#"value="{option}""#)));
        }
        assert!(!html.contains("{{"));
    }

    #[test]
    fn export_script_reports_network_errors() {
        let html = render_index(&RecordStore::default());
        let start = html.find("exportButton.addEventListener").unwrap();
        let handler = &html[start..];
        let fetch = handler.find("fetch('/export.xlsx')").unwrap();
        let guard = handler.find("try {").unwrap();
        assert!(guard < fetch);
        assert!(handler.contains("Error exporting records"));
    }
}
