//! Board members from TOML (`[[members]]` array) and the built-in board

use raincloud_domain::BoardMember;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMemberConfig {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub expertise: String,
    pub system_prompt: String,
    pub preferred_provider: String,
    #[serde(default)]
    pub fallback_providers: Vec<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_priority() -> u32 {
    99
}

impl FileMemberConfig {
    pub fn to_member(&self) -> BoardMember {
        BoardMember::new(&self.id, &self.name, &self.role, &self.preferred_provider)
            .with_expertise(&self.expertise)
            .with_system_prompt(&self.system_prompt)
            .with_fallbacks(self.fallback_providers.iter().cloned())
            .with_temperature(self.temperature)
            .with_priority(self.priority)
    }

    /// Every provider id this member may use, preferred first.
    pub fn provider_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.preferred_provider.as_str())
            .chain(self.fallback_providers.iter().map(String::as_str))
    }
}

#[allow(clippy::too_many_arguments)]
fn seat(
    id: &str,
    name: &str,
    role: &str,
    expertise: &str,
    system_prompt: &str,
    preferred: &str,
    fallbacks: &[&str],
    temperature: f32,
    priority: u32,
) -> FileMemberConfig {
    FileMemberConfig {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        expertise: expertise.to_string(),
        system_prompt: system_prompt.to_string(),
        preferred_provider: preferred.to_string(),
        fallback_providers: fallbacks.iter().map(|s| s.to_string()).collect(),
        temperature,
        priority,
    }
}

/// The built-in seven-seat board.
pub fn default_board() -> Vec<FileMemberConfig> {
    vec![
        seat(
            "chairman",
            "The Chairman",
            "Chairman",
            "Governance, board oversight, final decisions",
            "You are the Chairman of the board. You make final decisions after hearing from all members. You are decisive, fair, and consider all perspectives.",
            "anthropic",
            &["openai", "google"],
            0.5,
            0,
        ),
        seat(
            "ceo",
            "Chief Executive Officer",
            "CEO",
            "Strategy, vision, execution",
            "You are the CEO. You develop strategy, coordinate board members, and focus on long-term vision and execution.",
            "anthropic",
            &["openai", "google"],
            0.7,
            1,
        ),
        seat(
            "cfo",
            "Chief Financial Officer",
            "CFO",
            "Finance, budgeting, capital allocation",
            "You are the CFO. You analyze financial implications, manage budgets, assess ROI, and ensure fiscal responsibility.",
            "openai",
            &["anthropic", "google"],
            0.3,
            2,
        ),
        seat(
            "cto",
            "Chief Technology Officer",
            "CTO",
            "Architecture, engineering, security, scalability",
            "You are the CTO. You evaluate technical architecture, assess feasibility, recommend technologies, and ensure scalability.",
            "anthropic",
            &["openai", "huggingface"],
            0.4,
            3,
        ),
        seat(
            "cpo",
            "Chief Product Officer",
            "Chief Product Officer",
            "Product vision, user experience, roadmap",
            "You are the CPO. You focus on user experience, product vision, feature prioritization, and market fit.",
            "openai",
            &["anthropic", "google"],
            0.6,
            4,
        ),
        seat(
            "cmo",
            "Chief Marketing Officer",
            "Chief Marketing Officer",
            "Brand, growth, customer acquisition",
            "You are the CMO. You develop marketing strategy, brand positioning, customer acquisition, and growth tactics.",
            "google",
            &["openai", "anthropic"],
            0.8,
            5,
        ),
        seat(
            "ned",
            "Non-Executive Director",
            "Non-Executive Director",
            "Risk, compliance, independent oversight",
            "You are an independent Non-Executive Director. You challenge assumptions, assess risk and compliance, and hold the executives to account.",
            "huggingface",
            &["anthropic", "openai"],
            0.5,
            6,
        ),
    ]
}
