//! Scoring rubric sent to the evaluator: what each category means and how scores map to bands.

use crate::models::feedback::RubricCategory;

#[derive(Debug, Clone)]
pub struct RubricCriterion {
    pub category: RubricCategory,
    pub description: String,
}

/// An inclusive score range with its verbal label, e.g. 70–85 "Good performance".
#[derive(Debug, Clone)]
pub struct ScoreBand {
    pub min: u8,
    pub max: u8,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct RubricConfig {
    /// One entry per category, in canonical order.
    pub criteria: Vec<RubricCriterion>,
    pub bands: Vec<ScoreBand>,
}

impl Default for RubricConfig {
    fn default() -> Self {
        let criteria = RubricCategory::ALL
            .iter()
            .map(|category| RubricCriterion {
                category: *category,
                description: default_description(*category).to_string(),
            })
            .collect();

        let bands = [
            (0, 30, "Poor performance"),
            (30, 50, "Below average"),
            (50, 70, "Average performance"),
            (70, 85, "Good performance"),
            (85, 100, "Exceptional performance"),
        ]
        .into_iter()
        .map(|(min, max, label)| ScoreBand {
            min,
            max,
            label: label.to_string(),
        })
        .collect();

        Self { criteria, bands }
    }
}

fn default_description(category: RubricCategory) -> &'static str {
    match category {
        RubricCategory::CommunicationSkills => {
            "Clear articulation, structured responses, minimal filler words, professional tone"
        }
        RubricCategory::TechnicalKnowledge => {
            "Accurate domain knowledge, specific examples, depth of understanding"
        }
        RubricCategory::ProblemSolving => {
            "Logical thinking process, systematic approach, creative solutions"
        }
        RubricCategory::CulturalFit => {
            "Values alignment, team compatibility, company understanding"
        }
        RubricCategory::ConfidenceAndClarity => {
            "Assertive responses, clear viewpoints, no excessive hesitation"
        }
        RubricCategory::TeamworkAndCollaboration => {
            "Examples of working with others, collaboration mindset"
        }
        RubricCategory::Adaptability => {
            "Handling unexpected questions, adjusting approach, flexibility"
        }
        RubricCategory::TimeManagement => {
            "Concise relevant answers, avoiding rambling, efficient communication"
        }
        RubricCategory::LeadershipPotential => {
            "Initiative examples, decision-making, inspiring others"
        }
    }
}

impl RubricConfig {
    /// Numbered `N. "Name": description` lines for the prompt.
    pub fn render_criteria(&self) -> String {
        self.criteria
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. \"{}\": {}", i + 1, c.category.as_str(), c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_bands(&self) -> String {
        self.bands
            .iter()
            .map(|b| format!("- {}: {}-{}", b.label, b.min, b.max))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
