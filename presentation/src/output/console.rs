//! Console output formatter for board results

use colored::Colorize;
use raincloud_application::ProviderHealth;
use raincloud_domain::{BoardMember, CompletionResponse, Discussion, single_line, truncate};

/// Width of a brief answer preview, in bytes.
const BRIEF_WIDTH: usize = 100;

/// Formats discussions and direct responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete discussion
    pub fn format(discussion: &Discussion) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Board Discussion"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Query:".cyan().bold(),
            discussion.query
        ));

        if discussion.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                "No board member could answer (all providers unavailable).".red()
            ));
        }

        for response in &discussion.responses {
            output.push_str(&format!(
                "\n{}\n{}\n{}\n",
                format!("── {} ({}) ──", response.name, response.role)
                    .yellow()
                    .bold(),
                format!(
                    "{} · {} · {}ms · {} tokens",
                    response.provider,
                    response.model,
                    response.latency_ms,
                    response.tokens()
                )
                .dimmed(),
                response.response
            ));
        }

        output.push_str(&Self::section_header("Totals"));
        output.push_str(&Self::totals(discussion));
        output.push_str(&Self::footer());

        output
    }

    /// One line per answering member
    pub fn format_brief(discussion: &Discussion) -> String {
        let mut output = String::new();
        for response in &discussion.responses {
            output.push_str(&format!(
                "{} {}\n",
                format!("[{}]", response.role).yellow().bold(),
                truncate(&single_line(&response.response), BRIEF_WIDTH)
            ));
        }
        output.push_str(&Self::totals(discussion));
        output
    }

    /// Format as JSON
    pub fn format_json(discussion: &Discussion) -> String {
        serde_json::to_string_pretty(discussion).unwrap_or_else(|_| "{}".to_string())
    }

    /// A direct response: the answer followed by a provenance line
    pub fn format_direct(response: &CompletionResponse) -> String {
        format!(
            "{}\n\n{}\n",
            response.content,
            format!(
                "{} · {} · {}ms · {} tokens",
                response.provider, response.model, response.latency_ms, response.usage.total_tokens
            )
            .dimmed()
        )
    }

    pub fn format_direct_json(response: &CompletionResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// The configured board, in order
    pub fn format_members(members: &[BoardMember]) -> String {
        let mut output = Self::section_header("Board Members");
        for member in members {
            let chain: Vec<&str> = member.provider_chain().collect();
            output.push_str(&format!(
                "  {:<10} {:<28} {}\n",
                member.id.bold(),
                member.role,
                chain.join(" → ").dimmed()
            ));
            if !member.expertise.is_empty() {
                output.push_str(&format!("  {:<10} {}\n", "", member.expertise.dimmed()));
            }
        }
        output
    }

    pub fn format_provider_health(report: &[ProviderHealth]) -> String {
        if report.is_empty() {
            return format!(
                "{}\n",
                "No providers configured (set an API key, e.g. ANTHROPIC_API_KEY)".yellow()
            );
        }

        let mut output = Self::section_header("Providers");
        for health in report {
            let status = if health.healthy {
                "healthy".green()
            } else {
                "unavailable".red()
            };
            output.push_str(&format!("  {:<14} {}\n", health.provider, status));
        }
        output
    }

    fn totals(discussion: &Discussion) -> String {
        format!(
            "{} {} answered · {}ms · {} tokens · ${:.6}\n",
            "Totals:".cyan().bold(),
            discussion.responses.len(),
            discussion.total_latency_ms,
            discussion.total_tokens(),
            discussion.total_cost
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincloud_domain::{BoardResponse, TokenUsage};

    fn discussion() -> Discussion {
        let completion = |content: &str| CompletionResponse {
            content: content.to_string(),
            model: "m".to_string(),
            usage: TokenUsage::new(100, 50),
            provider: "anthropic".to_string(),
            latency_ms: 0,
        };
        Discussion {
            query: "Should we raise prices?".to_string(),
            responses: vec![
                BoardResponse::from_completion("ceo", "Alex", "CEO", completion("Yes,\nmodestly."), 120),
                BoardResponse::from_completion("cfo", "Dana", "CFO", completion("Only with data."), 90),
            ],
            total_latency_ms: 130,
            total_cost: 0.0003,
        }
    }

    #[test]
    fn test_full_contains_every_answer() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&discussion());
        assert!(text.contains("Query: Should we raise prices?"));
        assert!(text.contains("── Alex (CEO) ──"));
        assert!(text.contains("Only with data."));
        assert!(text.contains("2 answered · 130ms · 300 tokens"));
    }

    #[test]
    fn test_brief_is_one_line_per_member() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_brief(&discussion());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[CEO] Yes, modestly.");
        assert_eq!(lines[1], "[CFO] Only with data.");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_round_trips() {
        let original = discussion();
        let json = ConsoleFormatter::format_json(&original);
        let parsed: Discussion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
        assert!(json.contains("\"totalLatencyMs\": 130"));
    }

    #[test]
    fn test_empty_discussion_is_reported() {
        colored::control::set_override(false);
        let empty = Discussion {
            query: "q".to_string(),
            responses: vec![],
            total_latency_ms: 5,
            total_cost: 0.0,
        };
        assert!(ConsoleFormatter::format(&empty).contains("No board member could answer"));
    }

    #[test]
    fn test_provider_health() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_provider_health(&[
            ProviderHealth {
                provider: "anthropic".to_string(),
                healthy: true,
            },
            ProviderHealth {
                provider: "openai".to_string(),
                healthy: false,
            },
        ]);
        assert!(text.contains("anthropic      healthy"));
        assert!(text.contains("openai         unavailable"));
    }
}
