//! Self-contained HTML dashboard rendering
//!
//! No external assets: styling is inlined and the tremor chart is plain
//! SVG, so the file can be opened from disk or attached to a review email.

use super::SessionReport;

/// Render the full report page.
pub fn render(report: &SessionReport) -> String {
    let info = &report.session_info;
    let metrics = &report.metrics;
    let perf = &metrics.performance;

    let mut cards = vec![
        card("Overall Performance", &format!("{:.1}", perf.overall_score), "/100"),
        card("Head Stability", &format!("{:.1}", metrics.motion.head_stability_score), "/10"),
        card("Average Tremor", &format!("{:.3}", metrics.motion.avg_tremor), ""),
        card("Visual Stability", &format!("{:.1}", metrics.stability.visual_stability), "/10"),
        card("Est. Heart Rate", &metrics.stress.avg_heart_rate.to_string(), " bpm"),
        card("Peak Stress", &format!("{:.1}", metrics.stress.peak_stress_level), "/10"),
        card("Session Duration", &format!("{:.1}", info.duration_s), " s"),
    ];
    if let Some(kin) = metrics.hand_tracking.as_ref().and_then(|h| h.kinematics.as_ref()) {
        cards.push(card("Path Length", &format!("{:.2}", kin.path_length_m), " m"));
        cards.push(card("Hand Smoothness", &format!("{:.1}", kin.smoothness_score), "/10"));
        cards.push(card("Movement Efficiency", &format!("{:.2}", kin.efficiency), ""));
    }
    if let Some(eye) = metrics.eye_tracking.as_ref() {
        cards.push(card("Gaze Stability", &format!("{:.1}", eye.gaze_stability), "/10"));
        cards.push(card("Saccades", &format!("{:.1}", eye.saccades_per_second), "/s"));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Surgical Training Analysis - {name}</title>
<style>
  body {{ font-family: -apple-system, "Segoe UI", sans-serif; background: #f4f6f8; color: #263238; margin: 0; }}
  .container {{ max-width: 960px; margin: 0 auto; padding: 24px; }}
  h1 {{ font-size: 1.6em; }}
  .metrics-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }}
  .metric-card {{ background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }}
  .metric-label {{ font-size: 0.8em; color: #607d8b; text-transform: uppercase; letter-spacing: 0.05em; }}
  .metric-value {{ font-size: 1.8em; font-weight: 600; margin-top: 4px; }}
  .metric-unit {{ font-size: 0.5em; color: #90a4ae; }}
  .section {{ background: #fff; border-radius: 8px; padding: 16px 20px; margin-top: 20px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }}
  .badge {{ display: inline-block; padding: 2px 10px; border-radius: 10px; color: #fff; font-size: 0.85em; }}
  .badge-excellent {{ background: #2e7d32; }}
  .badge-good {{ background: #558b2f; }}
  .badge-fair {{ background: #ef6c00; }}
  .badge-poor {{ background: #c62828; }}
  .priority-HIGH {{ color: #c62828; font-weight: 700; }}
  .priority-MEDIUM {{ color: #ef6c00; font-weight: 600; }}
  .priority-LOW {{ color: #607d8b; }}
  table {{ width: 100%; border-collapse: collapse; }}
  th, td {{ text-align: left; padding: 8px; border-bottom: 1px solid #eceff1; vertical-align: top; }}
  footer {{ color: #90a4ae; font-size: 0.8em; margin-top: 24px; }}
</style>
</head>
<body>
<div class="container">
  <h1>Surgical Training Analysis</h1>
  <p>Session <strong>{name}</strong> &middot; rating {badge}</p>
  <div class="metrics-grid">
{cards}
  </div>
{tremor_chart}
{recommendations}
  <div class="section">
    <h2>Summary</h2>
    <p><strong>Key strengths:</strong></p>
    {strengths}
    <p><strong>Areas for improvement:</strong></p>
    {improvements}
  </div>
  <footer>
    <p>Heart-rate and stress figures are {stress_origin}, not physiological measurements.</p>
    <p>Data recorded: {frames} frames | {duration:.1} seconds | generated {generated}</p>
  </footer>
</div>
</body>
</html>
"#,
        name = escape(&info.session_name),
        badge = performance_badge(perf.overall_score),
        cards = cards.join("\n"),
        tremor_chart = tremor_chart(&metrics.motion.tremor_per_frame),
        recommendations = recommendations_section(report),
        strengths = bullet_list(&strengths(report), "Continue building core skills"),
        improvements = bullet_list(&improvements(report), "Maintain current performance level"),
        stress_origin = if metrics.stress.simulated {
            "simulated placeholders (no IMU data was available)"
        } else {
            "estimates derived from motion variability"
        },
        frames = info.num_frames,
        duration = info.duration_s,
        generated = report.generated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn card(label: &str, value: &str, unit: &str) -> String {
    format!(
        "    <div class=\"metric-card\"><div class=\"metric-label\">{}</div>\
         <div class=\"metric-value\">{}<span class=\"metric-unit\">{}</span></div></div>",
        label, value, unit
    )
}

fn performance_badge(score: f64) -> &'static str {
    if score >= 80.0 {
        r#"<span class="badge badge-excellent">Excellent</span>"#
    } else if score >= 60.0 {
        r#"<span class="badge badge-good">Good</span>"#
    } else if score >= 40.0 {
        r#"<span class="badge badge-fair">Fair</span>"#
    } else {
        r#"<span class="badge badge-poor">Needs Improvement</span>"#
    }
}

/// Inline SVG sparkline of tremor magnitude per frame.
fn tremor_chart(tremor: &[f64]) -> String {
    if tremor.len() < 2 {
        return String::new();
    }

    let width = 880.0;
    let height = 120.0;
    let max = tremor.iter().cloned().fold(f64::MIN, f64::max).max(1e-9);
    let points: Vec<String> = tremor
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i as f64 / (tremor.len() - 1) as f64 * width;
            let y = height - (v / max) * (height - 10.0);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    format!(
        r##"  <div class="section">
    <h2>Tremor Over Time</h2>
    <svg viewBox="0 0 {w} {h}" width="100%" height="{h}" preserveAspectRatio="none">
      <polyline fill="none" stroke="#1976d2" stroke-width="1.5" points="{points}"/>
    </svg>
  </div>"##,
        w = width,
        h = height,
        points = points.join(" "),
    )
}

fn recommendations_section(report: &SessionReport) -> String {
    if report.recommendations.is_empty() {
        return r#"  <div class="section">
    <h2>Priority Training Areas</h2>
    <p>No significant gaps against the expert benchmarks. Keep practicing at this level.</p>
  </div>"#
            .to_string();
    }

    let rows: Vec<String> = report
        .recommendations
        .iter()
        .map(|r| {
            format!(
                "      <tr><td class=\"priority-{p}\">{p}</td><td>{area}</td>\
                 <td>{issue}</td><td>{advice}</td></tr>",
                p = r.priority,
                area = escape(&r.area),
                issue = escape(&r.issue),
                advice = escape(&r.advice),
            )
        })
        .collect();

    format!(
        r#"  <div class="section">
    <h2>Priority Training Areas</h2>
    <table>
      <tr><th>Priority</th><th>Area</th><th>Gap</th><th>Advice</th></tr>
{rows}
    </table>
  </div>"#,
        rows = rows.join("\n"),
    )
}

fn strengths(report: &SessionReport) -> Vec<&'static str> {
    let metrics = &report.metrics;
    let mut strengths = Vec::new();
    if metrics.motion.head_stability_score >= 7.0 {
        strengths.push("Excellent head stability");
    }
    if metrics.motion.avg_tremor < 0.05 {
        strengths.push("Minimal hand tremor");
    }
    if metrics.stress.peak_stress_level < 5.0 {
        strengths.push("Good stress management");
    }
    strengths
}

fn improvements(report: &SessionReport) -> Vec<&'static str> {
    let metrics = &report.metrics;
    let mut improvements = Vec::new();
    if metrics.motion.head_stability_score < 5.0 {
        improvements.push("Work on maintaining steady head position");
    }
    if metrics.motion.avg_tremor > 0.1 {
        improvements.push("Practice hand steadiness exercises");
    }
    if metrics.stress.peak_stress_level > 7.0 {
        improvements.push("Develop stress management techniques");
    }
    improvements
}

fn bullet_list(items: &[&str], fallback: &str) -> String {
    if items.is_empty() {
        return format!("    <p>{}</p>", fallback);
    }
    let lis: Vec<String> = items.iter().map(|i| format!("      <li>{}</li>", i)).collect();
    format!("    <ul>\n{}\n    </ul>", lis.join("\n"))
}

/// Minimal HTML escaping for user-controlled strings.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_badges() {
        assert!(performance_badge(85.0).contains("Excellent"));
        assert!(performance_badge(65.0).contains("Good"));
        assert!(performance_badge(45.0).contains("Fair"));
        assert!(performance_badge(20.0).contains("Needs Improvement"));
    }

    #[test]
    fn test_tremor_chart_needs_two_points() {
        assert!(tremor_chart(&[]).is_empty());
        assert!(tremor_chart(&[0.1]).is_empty());
        assert!(tremor_chart(&[0.1, 0.2]).contains("polyline"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
