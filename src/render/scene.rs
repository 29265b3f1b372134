use super::*;
use crate::layout::Rect;
use crate::primitives::{
    CodeLine, LineTone, StatusKind, TerminalLine, arrow, card, code_snippet, metric, status,
    terminal_block, title_bar,
};
use crate::scene::SceneType;

/// Draws one of the fixed technical compositions with `title` in the caption
/// bar along the bottom edge.
pub fn render_scene(
    scene: SceneType,
    title: &str,
    theme: &Theme,
    width: f32,
    height: f32,
) -> String {
    let mut body = match scene {
        SceneType::Architecture => architecture(theme),
        SceneType::Scaling => scaling(theme),
        SceneType::Database => database(theme),
        SceneType::Deployment => deployment(theme),
        SceneType::Security => security(theme),
        SceneType::Debugging => debugging(theme),
        SceneType::Testing => testing(theme),
        SceneType::Performance => performance(theme),
        SceneType::Api => api(theme),
        SceneType::Monitoring => monitoring(theme),
        SceneType::Frontend => frontend(theme),
        SceneType::Success => success(theme),
        SceneType::Error => error(theme),
        SceneType::Default => fallback(theme),
    };
    body.push_str(&title_bar(title, width, height, theme));
    svg_document(width, height, theme, &body)
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x, y, w, h)
}

fn architecture(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(80.0, 100.0, 120.0, 100.0),
        "globe",
        "Client",
        t,
        Some(t.cyan.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(290.0, 100.0, 120.0, 100.0),
        "server",
        "Server",
        t,
        Some(t.blue.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(500.0, 100.0, 120.0, 100.0),
        "database",
        "Database",
        t,
        Some(t.purple.as_str()),
        None,
    ));
    s.push_str(&arrow((200.0, 150.0), (290.0, 150.0), &t.cyan, Some("HTTP"), false, t));
    s.push_str(&arrow((410.0, 150.0), (500.0, 150.0), &t.purple, Some("SQL"), false, t));
    s.push_str(&metric(80.0, 250.0, "Latency", "12", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(210.0, 250.0, "Uptime", "99.9", "%", t, Some(t.green.as_str())));
    s.push_str(&status(360.0, 280.0, StatusKind::Ok, "All systems operational", t));
    s
}

fn scaling(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(290.0, 50.0, 120.0, 80.0),
        "cloud",
        "Load Balancer",
        t,
        Some(t.cyan.as_str()),
        None,
    ));
    let nodes = [
        (80.0, "Node 1", &t.green),
        (220.0, "Node 2", &t.green),
        (360.0, "Node 3", &t.green),
        (500.0, "Node 4", &t.orange),
    ];
    for (x, label, color) in nodes {
        s.push_str(&card(
            rect(x, 180.0, 100.0, 80.0),
            "server",
            label,
            t,
            Some(color.as_str()),
            None,
        ));
        s.push_str(&arrow((350.0, 130.0), (x + 50.0, 180.0), &t.cyan, None, false, t));
    }
    s.push_str(&metric(150.0, 290.0, "RPS", "45K", "", t, Some(t.blue.as_str())));
    s.push_str(&metric(290.0, 290.0, "Nodes", "4", "", t, Some(t.green.as_str())));
    s.push_str(&metric(430.0, 290.0, "CPU", "72", "%", t, Some(t.orange.as_str())));
    s
}

fn database(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(180.0, 80.0, 140.0, 100.0),
        "database",
        "Primary",
        t,
        Some(t.purple.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(380.0, 80.0, 140.0, 100.0),
        "database",
        "Replica",
        t,
        Some(t.cyan.as_str()),
        None,
    ));
    s.push_str(&arrow((320.0, 130.0), (380.0, 130.0), &t.green, Some("sync"), false, t));
    s.push_str(&metric(80.0, 220.0, "QPS", "2.3K", "", t, Some(t.purple.as_str())));
    s.push_str(&metric(210.0, 220.0, "Latency", "4", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(340.0, 220.0, "Connections", "128", "", t, Some(t.blue.as_str())));
    s.push_str(&metric(470.0, 220.0, "Cache Hit", "94", "%", t, Some(t.green.as_str())));
    s.push_str(&status(200.0, 320.0, StatusKind::Ok, "Replication healthy", t));
    s.push_str(&status(400.0, 320.0, StatusKind::Ok, "Replica in sync", t));
    s
}

fn deployment(t: &Theme) -> String {
    let mut s = String::new();
    let stages = [
        (60.0, "code", "Code", &t.muted),
        (200.0, "git", "Build", &t.orange),
        (340.0, "target", "Test", &t.blue),
        (480.0, "rocket", "Deploy", &t.green),
    ];
    for (x, icon_name, label, color) in stages {
        s.push_str(&card(
            rect(x, 120.0, 100.0, 80.0),
            icon_name,
            label,
            t,
            Some(color.as_str()),
            None,
        ));
    }
    // Each arrow takes the colour of the stage it leaves.
    for pair in stages.windows(2) {
        let (from_x, _, _, color) = pair[0];
        let (to_x, _, _, _) = pair[1];
        s.push_str(&arrow((from_x + 100.0, 160.0), (to_x, 160.0), color, None, false, t));
    }
    s.push_str(&metric(140.0, 240.0, "Build", "2.3", "min", t, Some(t.orange.as_str())));
    s.push_str(&metric(290.0, 240.0, "Tests", "141", "", t, Some(t.green.as_str())));
    s.push_str(&metric(440.0, 240.0, "Coverage", "87", "%", t, Some(t.blue.as_str())));
    s.push_str(&status(280.0, 330.0, StatusKind::Ok, "Pipeline passed • Ready for production", t));
    s
}

fn security(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(80.0, 120.0, 120.0, 90.0),
        "globe",
        "Internet",
        t,
        Some(t.muted.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(290.0, 120.0, 120.0, 90.0),
        "shield",
        "Firewall",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(500.0, 120.0, 120.0, 90.0),
        "lock",
        "Auth",
        t,
        Some(t.purple.as_str()),
        None,
    ));
    s.push_str(&arrow((200.0, 165.0), (290.0, 165.0), &t.muted, Some("HTTPS"), false, t));
    s.push_str(&arrow((410.0, 165.0), (500.0, 165.0), &t.green, Some("mTLS"), false, t));
    s.push_str(&metric(100.0, 250.0, "Blocked", "847", "", t, Some(t.red.as_str())));
    s.push_str(&metric(250.0, 250.0, "Auth Rate", "99.2", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(400.0, 250.0, "Threats", "0", "", t, Some(t.green.as_str())));
    s.push_str(&status(280.0, 340.0, StatusKind::Ok, "Zero Trust • All traffic encrypted", t));
    s
}

fn debugging(t: &Theme) -> String {
    let mut s = String::new();
    let code = [
        CodeLine::plain("async function fetch() {"),
        CodeLine::highlighted("  const res = await api.get();"),
        CodeLine::plain("  return res.data;"),
        CodeLine::plain("}"),
    ];
    s.push_str(&code_snippet(rect(40.0, 50.0, 300.0, 130.0), &code, "debug.ts", t));
    let output = [
        TerminalLine::new("node debug.ts", LineTone::Normal),
        TerminalLine::new("TypeError: Cannot read undefined", LineTone::Error),
        TerminalLine::new("    at fetch (debug.ts:2)", LineTone::Error),
    ];
    s.push_str(&terminal_block(rect(360.0, 50.0, 300.0, 130.0), &output, t));
    s.push_str(&card(
        rect(150.0, 220.0, 120.0, 80.0),
        "alert",
        "Bug Found",
        t,
        Some(t.red.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(430.0, 220.0, 120.0, 80.0),
        "check",
        "Fixed",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s.push_str(&arrow((270.0, 260.0), (430.0, 260.0), &t.orange, Some("debug"), false, t));
    s.push_str(&status(280.0, 340.0, StatusKind::Ok, "Issue resolved", t));
    s
}

fn testing(t: &Theme) -> String {
    let mut s = String::new();
    let code = [
        CodeLine::plain("describe(\"API\", () => {"),
        CodeLine::highlighted("  it(\"returns 200\", async () => {"),
        CodeLine::plain("    expect(res.status).toBe(200);"),
        CodeLine::plain("  });"),
    ];
    s.push_str(&code_snippet(rect(40.0, 50.0, 280.0, 120.0), &code, "api.test.ts", t));
    s.push_str(&metric(360.0, 50.0, "Passed", "141", "", t, Some(t.green.as_str())));
    s.push_str(&metric(490.0, 50.0, "Failed", "1", "", t, Some(t.red.as_str())));
    s.push_str(&metric(360.0, 120.0, "Coverage", "87", "%", t, Some(t.blue.as_str())));
    s.push_str(&metric(490.0, 120.0, "Duration", "4.2", "s", t, Some(t.muted.as_str())));
    s.push_str(&card(
        rect(150.0, 220.0, 120.0, 80.0),
        "target",
        "Unit",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(310.0, 220.0, 120.0, 80.0),
        "layers",
        "Integration",
        t,
        Some(t.blue.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(470.0, 220.0, 120.0, 80.0),
        "globe",
        "E2E",
        t,
        Some(t.purple.as_str()),
        None,
    ));
    s.push_str(&status(280.0, 340.0, StatusKind::Ok, "All test suites passed", t));
    s
}

fn performance(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&metric(80.0, 60.0, "P99 Latency", "23", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(210.0, 60.0, "RPS", "45K", "", t, Some(t.blue.as_str())));
    s.push_str(&metric(340.0, 60.0, "Error Rate", "0.1", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(470.0, 60.0, "CPU", "45", "%", t, Some(t.orange.as_str())));
    let output = [
        TerminalLine::new("$ perf analyze --profile", LineTone::Normal),
        TerminalLine::new("Hotspot: db.query() - 45% CPU", LineTone::Error),
        TerminalLine::new("✓ Optimized: -65% latency", LineTone::Ok),
    ];
    s.push_str(&terminal_block(rect(120.0, 150.0, 460.0, 100.0), &output, t));
    s.push_str(&card(
        rect(200.0, 280.0, 120.0, 70.0),
        "zap",
        "Optimized",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(380.0, 280.0, 120.0, 70.0),
        "activity",
        "Monitoring",
        t,
        Some(t.blue.as_str()),
        None,
    ));
    s
}

fn api(t: &Theme) -> String {
    let mut s = String::new();
    let request = [
        CodeLine::plain("GET /api/v2/users HTTP/1.1"),
        CodeLine::highlighted("Authorization: Bearer ***"),
        CodeLine::plain("Accept: application/json"),
    ];
    s.push_str(&code_snippet(rect(40.0, 50.0, 300.0, 120.0), &request, "request.http", t));
    let response = [
        CodeLine::plain("200 OK (12ms)"),
        CodeLine::highlighted("{ \"users\": [...] }"),
        CodeLine::plain("Content-Type: application/json"),
    ];
    s.push_str(&code_snippet(rect(360.0, 50.0, 300.0, 120.0), &response, "response", t));
    s.push_str(&metric(80.0, 200.0, "RPS", "8.4K", "", t, Some(t.blue.as_str())));
    s.push_str(&metric(210.0, 200.0, "P99", "45", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(340.0, 200.0, "Errors", "0.01", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(470.0, 200.0, "Cache", "78", "%", t, Some(t.cyan.as_str())));
    s.push_str(&status(280.0, 300.0, StatusKind::Ok, "API healthy • Rate limit OK", t));
    s
}

fn monitoring(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&metric(80.0, 50.0, "Uptime", "99.99", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(210.0, 50.0, "Alerts", "0", "", t, Some(t.green.as_str())));
    s.push_str(&metric(340.0, 50.0, "P95", "23", "ms", t, Some(t.blue.as_str())));
    s.push_str(&metric(470.0, 50.0, "Memory", "62", "%", t, Some(t.orange.as_str())));
    s.push_str(&card(
        rect(120.0, 150.0, 120.0, 80.0),
        "activity",
        "Metrics",
        t,
        Some(t.blue.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(290.0, 150.0, 120.0, 80.0),
        "eye",
        "Traces",
        t,
        Some(t.purple.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(460.0, 150.0, 120.0, 80.0),
        "terminal",
        "Logs",
        t,
        Some(t.cyan.as_str()),
        None,
    ));
    s.push_str(&metric(80.0, 270.0, "Events", "1.2M", "/day", t, Some(t.muted.as_str())));
    s.push_str(&metric(210.0, 270.0, "Retention", "30", "days", t, Some(t.muted.as_str())));
    s.push_str(&status(380.0, 300.0, StatusKind::Ok, "All systems healthy", t));
    s
}

fn frontend(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&metric(80.0, 50.0, "LCP", "1.2", "s", t, Some(t.green.as_str())));
    s.push_str(&metric(210.0, 50.0, "FID", "45", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(340.0, 50.0, "CLS", "0.02", "", t, Some(t.green.as_str())));
    s.push_str(&metric(470.0, 50.0, "TTI", "2.1", "s", t, Some(t.orange.as_str())));
    let code = [
        CodeLine::plain("const App = () => {"),
        CodeLine::highlighted("  return <Suspense fallback={<Loader />}>"),
        CodeLine::plain("    <MainContent />"),
        CodeLine::plain("  </Suspense>;"),
    ];
    s.push_str(&code_snippet(rect(150.0, 140.0, 400.0, 100.0), &code, "App.tsx", t));
    s.push_str(&card(
        rect(200.0, 280.0, 120.0, 70.0),
        "globe",
        "Browser",
        t,
        Some(t.cyan.as_str()),
        None,
    ));
    s.push_str(&card(
        rect(380.0, 280.0, 120.0, 70.0),
        "zap",
        "Optimized",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s
}

fn success(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(290.0, 60.0, 120.0, 100.0),
        "check",
        "Success!",
        t,
        Some(t.green.as_str()),
        None,
    ));
    s.push_str(&metric(80.0, 200.0, "Uptime", "100", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(210.0, 200.0, "Users", "12.4K", "", t, Some(t.blue.as_str())));
    s.push_str(&metric(340.0, 200.0, "Revenue", "+24", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(470.0, 200.0, "NPS", "72", "", t, Some(t.purple.as_str())));
    s.push_str(&status(200.0, 320.0, StatusKind::Ok, "Deployment successful", t));
    s.push_str(&status(400.0, 320.0, StatusKind::Ok, "Zero downtime", t));
    s
}

fn error(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(290.0, 50.0, 120.0, 90.0),
        "alert",
        "Incident",
        t,
        Some(t.red.as_str()),
        None,
    ));
    let output = [
        TerminalLine::new("$ kubectl logs pod/api-7d8f9", LineTone::Normal),
        TerminalLine::new("ERROR: OOMKilled - Exit code 137", LineTone::Error),
        TerminalLine::new("Memory limit exceeded: 512Mi", LineTone::Error),
    ];
    s.push_str(&terminal_block(rect(150.0, 160.0, 400.0, 100.0), &output, t));
    s.push_str(&metric(100.0, 290.0, "Status", "503", "", t, Some(t.red.as_str())));
    s.push_str(&metric(240.0, 290.0, "Errors", "2.3K", "", t, Some(t.red.as_str())));
    s.push_str(&metric(380.0, 290.0, "MTTR", "4.2", "min", t, Some(t.orange.as_str())));
    s.push_str(&status(280.0, 370.0, StatusKind::Error, "Service degraded • Investigating", t));
    s
}

fn fallback(t: &Theme) -> String {
    let mut s = String::new();
    s.push_str(&card(
        rect(290.0, 80.0, 120.0, 100.0),
        "layers",
        "System",
        t,
        Some(t.blue.as_str()),
        None,
    ));
    s.push_str(&metric(80.0, 220.0, "Requests", "8.2K", "/s", t, Some(t.blue.as_str())));
    s.push_str(&metric(220.0, 220.0, "Latency", "12", "ms", t, Some(t.green.as_str())));
    s.push_str(&metric(360.0, 220.0, "Errors", "0.1", "%", t, Some(t.green.as_str())));
    s.push_str(&metric(500.0, 220.0, "Uptime", "99.9", "%", t, Some(t.green.as_str())));
    s.push_str(&status(280.0, 340.0, StatusKind::Ok, "All systems operational", t));
    s
}
