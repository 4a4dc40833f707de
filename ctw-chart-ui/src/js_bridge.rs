//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions are split across `assets/js/*.js` and loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module provides safe Rust wrappers that serialize data and call those globals.

use ctw_data::export::ExportFile;
use ctw_store::Theme;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('CTW JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// A JS string literal for `value`.
fn js_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart files declare `function renderLineChart(...)` and friends. They
/// are evaluated at global scope via an indirect `eval()` once D3 is ready
/// and then promoted to `window.*` explicitly.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, LINE_CHART_JS, BAR_CHART_JS].join("\n");

    let store_js = format!("window.__ctwChartScripts = {};", js_literal(&all_js));
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__ctwChartsReady || window.__ctwChartsPending) return;
            window.__ctwChartsPending = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__ctwChartScripts);
                    delete window.__ctwChartScripts;
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof renderBarChart !== 'undefined') window.renderBarChart = renderBarChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__ctwChartsReady = true;
                    console.log('CTW charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Poll until the chart scripts are ready and the container exists, then
/// call `window[function]`.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let id = js_literal(container_id);
    let data = js_literal(data_json);
    let config = js_literal(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__ctwChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({id}, {data}, {config});
                    }} catch(e) {{ console.error('[CTW] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render a multi-series line chart (zone trends, predictions, projections).
pub fn render_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderLineChart", container_id, data_json, config_json);
}

/// Render a grouped or single-series bar chart (sources, comparisons, costs).
pub fn render_bar_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderBarChart", container_id, data_json, config_json);
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById({}); if (el) el.innerHTML = '';",
        js_literal(container_id)
    ));
}

/// Offer an export to the browser as a file download.
pub fn download_json(file: &ExportFile) {
    call_js(&format!(
        r#"
        var blob = new Blob([{contents}], {{ type: 'application/json' }});
        var url = URL.createObjectURL(blob);
        var link = document.createElement('a');
        link.href = url;
        link.download = {name};
        document.body.appendChild(link);
        link.click();
        document.body.removeChild(link);
        URL.revokeObjectURL(url);
        "#,
        contents = js_literal(&file.contents),
        name = js_literal(&file.file_name),
    ));
}

/// Set the `dark` class on the document root to match the theme.
pub fn apply_theme(theme: Theme) {
    call_js(&format!(
        "document.documentElement.classList.toggle('dark', {});",
        theme == Theme::Dark
    ));
}
