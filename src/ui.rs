use crate::chart;
use crate::models::{
    AirTravel, BAG_COUNT_RANGE, BagSize, BodyType, CLOTHES_RANGE, Cooking, DAILY_HOURS_RANGE, DISTANCE_RANGE, Diet,
    GROCERY_RANGE, Heating, Level, Sex, Shower, Survey, Transport, Vehicle, YesNo,
};
use crate::scoring::{self, Rating};
use crate::session::Outcome;
use std::fmt::Display;

pub fn render_form(draft: Option<&Survey>, error: Option<&str>) -> String {
    let defaults = Survey::default();
    let s = draft.unwrap_or(&defaults);

    let error_html = error
        .map(|message| format!(r#"<div class="alert" role="alert">{}</div>"#, escape(message)))
        .unwrap_or_default();

    let personal = [
        select("body_type", "Body Type", BodyType::ALL, s.body_type),
        select("sex", "Sex", Sex::ALL, s.sex),
        select("diet", "Diet", Diet::ALL, s.diet),
        select("shower", "How Often You Shower", Shower::ALL, s.shower),
        select("social", "Social Activity", Level::ALL, s.social),
    ]
    .concat();
    let sustainability = [
        select("energy_efficiency", "Energy Efficient Appliances?", YesNo::ALL, s.energy_efficiency),
        select("recycling", "Do You Recycle?", YesNo::ALL, s.recycling),
    ]
    .concat();
    let home = [
        select("heating", "Heating Energy Source", Heating::ALL, s.heating),
        select("cooking", "Cooking With", Cooking::ALL, s.cooking),
        number("tv_hours", "TV/PC Hours per Day", DAILY_HOURS_RANGE, s.tv_hours),
        number("internet", "Internet Hours per Day", DAILY_HOURS_RANGE, s.internet),
    ]
    .concat();
    let consumption = [
        number("grocery", "Monthly Grocery Bill (₹)", GROCERY_RANGE, s.grocery),
        number("clothes", "New Clothes per Month", CLOTHES_RANGE, s.clothes),
    ]
    .concat();
    let transportation = [
        select("transport", "Transport Type", Transport::ALL, s.transport),
        select("vehicle", "Vehicle Type", Vehicle::ALL, s.vehicle),
        number("distance", "Monthly Vehicle Distance (km)", DISTANCE_RANGE, s.distance),
        select("flights", "Air Travel Frequency", AirTravel::ALL, s.flights),
    ]
    .concat();
    let waste = [
        select("bag_size", "Waste Bag Size", BagSize::ALL, s.bag_size),
        number("bag_count", "Bags per Week", BAG_COUNT_RANGE, s.bag_count),
    ]
    .concat();

    let body = FORM_HTML
        .replace("{{ERROR}}", &error_html)
        .replace("{{PERSONAL}}", &personal)
        .replace("{{SUSTAINABILITY}}", &sustainability)
        .replace("{{HOME}}", &home)
        .replace("{{CONSUMPTION}}", &consumption)
        .replace("{{TRANSPORTATION}}", &transportation)
        .replace("{{WASTE}}", &waste);
    page(&body)
}

pub fn render_results(outcome: &Outcome) -> String {
    let rating = Rating::for_footprint(outcome.footprint);
    let score = scoring::eco_score(outcome.footprint);
    let progress = (score / 100.0).clamp(0.0, 1.0) * 100.0;
    let breakdown = scoring::breakdown(&outcome.survey);

    let chart_html = match chart::pie(&breakdown) {
        Some(pie) => pie.to_svg(),
        None => r#"<p class="info">No significant emissions detected in breakdown categories.</p>"#.to_string(),
    };

    let body = RESULTS_HTML
        .replace("{{FOOTPRINT}}", &format!("{:.0}", outcome.footprint))
        .replace("{{TIP}}", &escape(rating.tip()))
        .replace("{{TIP_COLOR}}", rating.color())
        .replace("{{SCORE}}", &format!("{score:.1}"))
        .replace("{{PROGRESS}}", &format!("{progress:.1}"))
        .replace("{{CHART}}", &chart_html);
    page(&body)
}

fn page(body: &str) -> String {
    PAGE_HTML.replace("{{BODY}}", body)
}

fn select<T: Display + PartialEq + Copy>(name: &str, label: &str, options: &[T], selected: T) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let value = escape(&option.to_string());
            let marker = if *option == selected { " selected" } else { "" };
            format!(r#"<option value="{value}"{marker}>{value}</option>"#)
        })
        .collect();
    format!(
        r#"<label class="field"><span>{}</span><select name="{name}" id="{name}">{options}</select></label>"#,
        escape(label)
    )
}

fn number(name: &str, label: &str, (min, max): (u32, u32), value: u32) -> String {
    format!(
        r#"<label class="field"><span>{}</span><input type="number" name="{name}" id="{name}" min="{min}" max="{max}" step="1" value="{value}" required /></label>"#,
        escape(label)
    )
}

pub fn escape(text: &str) -> String {
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

const FORM_HTML: &str = r#"
    <section class="card">
      <h2>📋 Tell us about your lifestyle</h2>
      {{ERROR}}
      <form id="carbon-form" method="post" action="/predict">
        <div class="columns">
          <div class="column">
            <h3>👤 Personal Info</h3>
            {{PERSONAL}}
            <h3>♻️ Sustainability</h3>
            {{SUSTAINABILITY}}
          </div>
          <div class="column">
            <h3>🏠 Home &amp; Energy</h3>
            {{HOME}}
            <h3>🛍️ Consumption</h3>
            {{CONSUMPTION}}
          </div>
          <div class="column">
            <h3>🚗 Transportation</h3>
            {{TRANSPORTATION}}
            <h3>🗑️ Waste</h3>
            {{WASTE}}
          </div>
        </div>
        <button class="primary" id="submit-btn" type="submit">🔍 Calculate My Carbon Footprint</button>
        <p class="status" id="status"></p>
      </form>
    </section>
    <script>
      const form = document.getElementById('carbon-form');
      form.addEventListener('submit', () => {
        document.getElementById('submit-btn').disabled = true;
        document.getElementById('status').textContent = '🔄 Calculating your carbon footprint...';
      });
    </script>
"#;

const RESULTS_HTML: &str = r#"
    <section class="card headline">
      <h2>🌱 Your Carbon Footprint Results</h2>
      <p class="footprint" id="footprint">{{FOOTPRINT}} kg CO₂</p>
      <p class="per-year">per year</p>
    </section>

    <section class="tip" style="--tip: {{TIP_COLOR}};">
      <h3>{{TIP}}</h3>
    </section>

    <section class="results">
      <div class="card metric">
        <span class="label">💚 Eco Score</span>
        <span class="value" id="eco-score">{{SCORE}}/100</span>
        <div class="progress"><div class="bar" style="width: {{PROGRESS}}%;"></div></div>
      </div>
      <div class="card chart">
        <h3>🥧 Footprint Breakdown</h3>
        {{CHART}}
      </div>
    </section>

    <form method="post" action="/reset">
      <button class="primary" type="submit">🔄 Calculate Again</button>
    </form>
    <script>
      window.scrollTo({ top: 0, behavior: 'smooth' });
    </script>
"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Carbon Coach</title>
  <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🌍</text></svg>" />
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap');

    :root {
      --bg: #f0fdf4;
      --green: #10b981;
      --green-dark: #059669;
      --green-deep: #047857;
      --ink: #065f46;
      --card: white;
      --shadow: 0 10px 30px rgba(0, 0, 0, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: #1f2937;
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    main {
      width: min(1200px, 100%);
      margin: 0 auto;
      padding: 2rem 1rem;
      display: grid;
      gap: 2rem;
    }

    .main-header {
      background: linear-gradient(135deg, var(--green) 0%, var(--green-dark) 100%);
      border: 3px solid #34d399;
      border-radius: 20px;
      box-shadow: 0 20px 40px rgba(16, 185, 129, 0.3);
      color: white;
      padding: 2rem 1rem;
      text-align: center;
      animation: slideDown 0.8s ease-out;
    }

    .main-header h1 {
      margin: 0;
      font-size: 3rem;
      font-weight: 700;
      text-shadow: 2px 2px 4px rgba(0, 0, 0, 0.3);
    }

    .main-header p {
      margin: 0.5rem 0 0;
      color: #d1fae5;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 2rem;
    }

    #carbon-form {
      border-top: 3px solid #22c55e;
      padding-top: 1rem;
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 1.5rem;
    }

    .column h3 {
      margin: 1rem 0 0.5rem;
    }

    .field {
      display: grid;
      gap: 0.35rem;
      margin-bottom: 0.8rem;
      font-size: 0.95rem;
    }

    select,
    input[type="number"] {
      border: 1px solid #a7f3d0;
      border-radius: 15px;
      padding: 0.6rem 0.8rem;
      font: inherit;
      transition: all 0.3s ease;
    }

    select:hover {
      transform: translateY(-1px);
    }

    button.primary {
      margin-top: 1rem;
      border: 2px solid transparent;
      border-radius: 999px;
      padding: 0.9rem 1.6rem;
      font: inherit;
      font-weight: 600;
      color: white;
      background: linear-gradient(135deg, var(--green-dark) 0%, var(--green-deep) 100%);
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button.primary:hover {
      transform: translateY(-3px);
      box-shadow: 0 15px 30px rgba(16, 185, 129, 0.4);
      border-color: var(--green);
    }

    button.primary:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .alert {
      background: #fee2e2;
      border-left: 5px solid #dc2626;
      border-radius: 10px;
      color: #991b1b;
      padding: 1rem 1.25rem;
      margin: 1rem 0;
    }

    .status {
      min-height: 1.2em;
      color: var(--green-deep);
    }

    .headline {
      text-align: center;
    }

    .headline h2 {
      color: #2e8b57;
      margin: 0 0 1rem;
    }

    .footprint {
      color: #ff6b35;
      font-size: 3rem;
      font-weight: 700;
      margin: 0;
    }

    .per-year {
      color: #666;
      font-size: 1.2rem;
    }

    .tip {
      background: color-mix(in srgb, var(--tip) 12%, transparent);
      border-left: 5px solid var(--tip);
      border-radius: 10px;
      padding: 1.5rem;
    }

    .tip h3 {
      margin: 0;
      color: var(--tip);
    }

    .results {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 2rem;
    }

    .metric .label {
      display: block;
      color: var(--green-deep);
      font-weight: 500;
    }

    .metric .value {
      display: block;
      color: var(--ink);
      font-size: 2.5rem;
      font-weight: 700;
      margin: 0.5rem 0 1rem;
    }

    .progress {
      background: #d1fae5;
      border-radius: 999px;
      height: 12px;
      overflow: hidden;
    }

    .progress .bar {
      background: var(--green);
      height: 100%;
    }

    .pie {
      width: 100%;
      height: auto;
    }

    .pie-title {
      font-size: 16px;
      font-weight: 700;
    }

    .pie-percent {
      fill: white;
      font-size: 12px;
      font-weight: 700;
    }

    .pie-label {
      font-size: 13px;
    }

    .info {
      background: #e0f2fe;
      border-radius: 10px;
      color: #075985;
      padding: 1rem;
    }

    @keyframes slideDown {
      from {
        opacity: 0;
        transform: translateY(-18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .main-header h1 {
        font-size: 2.2rem;
      }
      button.primary {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main>
    <header class="main-header">
      <h1>🌍 Carbon Coach</h1>
      <p>Discover your carbon footprint and get personalized climate tips</p>
      <p>Powered by IBM Watson ML 🚀</p>
    </header>
{{BODY}}
  </main>
</body>
</html>
"#;
