use crate::ir::tag_enum;

tag_enum! {
    /// Technical-illustration categories, in detector tie-break order.
    pub enum SceneType {
        Architecture => "architecture",
        Scaling => "scaling",
        Database => "database",
        Deployment => "deployment",
        Security => "security",
        Debugging => "debugging",
        Testing => "testing",
        Performance => "performance",
        Api => "api",
        Monitoring => "monitoring",
        Frontend => "frontend",
        Success => "success",
        Error => "error",
        Default => "default",
    }
    default = Default;
}

const KEYWORDS: &[(SceneType, &[&str])] = &[
    (
        SceneType::Architecture,
        &[
            "architecture",
            "design",
            "pattern",
            "system",
            "infrastructure",
            "microservice",
            "distributed",
        ],
    ),
    (
        SceneType::Scaling,
        &[
            "scale",
            "load",
            "traffic",
            "kubernetes",
            "k8s",
            "container",
            "docker",
            "cluster",
            "replicas",
            "horizontal",
            "auto-scaling",
        ],
    ),
    (
        SceneType::Database,
        &[
            "database",
            "sql",
            "postgres",
            "mysql",
            "mongo",
            "query",
            "migration",
            "schema",
            "orm",
            "redis",
            "cache",
            "replication",
        ],
    ),
    (
        SceneType::Deployment,
        &[
            "deploy",
            "ci",
            "cd",
            "pipeline",
            "release",
            "ship",
            "production",
            "staging",
            "github actions",
            "jenkins",
            "devops",
        ],
    ),
    (
        SceneType::Security,
        &[
            "security",
            "auth",
            "authentication",
            "jwt",
            "oauth",
            "encrypt",
            "ssl",
            "tls",
            "firewall",
            "vulnerability",
            "zero trust",
        ],
    ),
    (
        SceneType::Debugging,
        &[
            "debug",
            "bug",
            "error",
            "fix",
            "issue",
            "trace",
            "breakpoint",
            "crash",
            "exception",
            "troubleshoot",
            "root cause",
        ],
    ),
    (
        SceneType::Testing,
        &[
            "test",
            "jest",
            "vitest",
            "playwright",
            "cypress",
            "coverage",
            "unit",
            "integration",
            "e2e",
            "tdd",
            "mock",
        ],
    ),
    (
        SceneType::Performance,
        &[
            "performance",
            "optimize",
            "speed",
            "latency",
            "cache",
            "profil",
            "benchmark",
            "bottleneck",
            "memory",
            "cpu",
        ],
    ),
    (
        SceneType::Api,
        &[
            "api", "rest", "graphql", "endpoint", "gateway", "grpc", "webhook", "http", "request",
            "response",
        ],
    ),
    (
        SceneType::Monitoring,
        &[
            "monitor",
            "observ",
            "metric",
            "log",
            "alert",
            "grafana",
            "datadog",
            "prometheus",
            "dashboard",
            "trace",
        ],
    ),
    (
        SceneType::Frontend,
        &[
            "frontend",
            "react",
            "vue",
            "angular",
            "svelte",
            "css",
            "tailwind",
            "component",
            "ui",
            "web vitals",
            "lcp",
            "fid",
        ],
    ),
    (
        SceneType::Success,
        &[
            "success",
            "complete",
            "done",
            "achieve",
            "launch",
            "milestone",
            "shipped",
            "celebrate",
            "win",
        ],
    ),
    (
        SceneType::Error,
        &[
            "fail", "crash", "down", "outage", "incident", "500", "503", "timeout", "oom",
            "killed", "alert",
        ],
    ),
];

/// Classifies free text into a scene by keyword substring scoring.
///
/// A keyword found in the combined text scores 3 when the title also contains
/// it, 1 otherwise. Ties keep the category listed first.
pub fn detect_scene(title: &str, content: &str) -> SceneType {
    let title_lower = title.to_lowercase();
    let text = format!("{title} {content}").to_lowercase();

    let mut best = SceneType::Default;
    let mut best_score = 0;
    for (scene, keywords) in KEYWORDS {
        let score: u32 = keywords
            .iter()
            .filter(|kw| text.contains(**kw))
            .map(|kw| if title_lower.contains(kw) { 3 } else { 1 })
            .sum();
        if score > best_score {
            best = *scene;
            best_score = score;
        }
    }
    tracing::debug!(scene = %best, score = best_score, "detected scene");
    best
}

pub fn available_scenes() -> Vec<SceneType> {
    SceneType::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_keywords_drive_detection() {
        assert_eq!(detect_scene("Database Optimization", ""), SceneType::Database);
        assert_eq!(detect_scene("Kubernetes Deployment", ""), SceneType::Scaling);
        assert_eq!(detect_scene("Error Handling", ""), SceneType::Debugging);
        assert_eq!(
            detect_scene("Microservice Architecture", "with distributed design"),
            SceneType::Architecture
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(
            detect_scene("POSTGRES QUERY TUNING", ""),
            detect_scene("postgres query tuning", "")
        );
    }

    #[test]
    fn keyword_free_input_is_default() {
        assert_eq!(detect_scene("", ""), SceneType::Default);
        assert_eq!(detect_scene("Hello", "world"), SceneType::Default);
    }

    #[test]
    fn content_only_matches_score_lower_than_title_matches() {
        // "security" in the title (3) beats two content hits for testing (2).
        assert_eq!(
            detect_scene("Security review", "jest and mocks"),
            SceneType::Security
        );
    }

    #[test]
    fn scenes_list_in_tie_break_order() {
        let scenes = available_scenes();
        assert_eq!(scenes.len(), 14);
        assert_eq!(scenes[0], SceneType::Architecture);
        assert_eq!(scenes[13], SceneType::Default);
        assert_eq!("api".parse::<SceneType>(), Ok(SceneType::Api));
    }
}
